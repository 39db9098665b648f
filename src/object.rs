//! Object tags identifying pattern properties.

use super::value::{Value, ValueType};
use core::fmt;
use hashbrown::HashMap;

/// Tag naming a pattern property such as the family or the weight.
///
/// Built-in objects occupy `1..FIRST_CUSTOM_OBJECT`. Tags from
/// [`FIRST_CUSTOM_OBJECT`](Object::FIRST_CUSTOM) upwards are assigned to
/// custom objects by an [`ObjectRegistry`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Object(pub u16);

macro_rules! builtin_objects {
    ($($(#[$doc:meta])* $id:ident = $tag:expr, $name:literal, $ty:ident;)*) => {
        impl Object {
            $($(#[$doc])* pub const $id: Self = Self($tag);)*
        }

        const BUILTINS: &[(&str, Constraint)] = &[
            $(($name, Constraint::$ty),)*
        ];
    };
}

builtin_objects! {
    /// Family name.
    FAMILY = 1, "family", String;
    /// Languages of the family names.
    FAMILY_LANG = 2, "familylang", String;
    /// Style name.
    STYLE = 3, "style", String;
    /// Languages of the style names.
    STYLE_LANG = 4, "stylelang", String;
    /// Full name.
    FULLNAME = 5, "fullname", String;
    /// Languages of the full names.
    FULLNAME_LANG = 6, "fullnamelang", String;
    /// Slant, one of the `SLANT_*` constants.
    SLANT = 7, "slant", Integer;
    /// Weight on the fontconfig scale.
    WEIGHT = 8, "weight", Range;
    /// Width on the fontconfig scale.
    WIDTH = 9, "width", Range;
    /// Point size.
    SIZE = 10, "size", Range;
    ASPECT = 11, "aspect", Double;
    /// Pixel size.
    PIXEL_SIZE = 12, "pixelsize", Double;
    /// Spacing, one of the `SPACING_*` constants.
    SPACING = 13, "spacing", Integer;
    /// Foundry name.
    FOUNDRY = 14, "foundry", String;
    ANTIALIAS = 15, "antialias", Bool;
    HINT_STYLE = 16, "hintstyle", Integer;
    HINTING = 17, "hinting", Bool;
    VERTICAL_LAYOUT = 18, "verticallayout", Bool;
    AUTOHINT = 19, "autohint", Bool;
    GLOBAL_ADVANCE = 20, "globaladvance", Bool;
    /// Path of the font file.
    FILE = 21, "file", String;
    /// Face and instance identifier within the file.
    INDEX = 22, "index", Integer;
    RASTERIZER = 23, "rasterizer", String;
    /// True if the face has outlines.
    OUTLINE = 24, "outline", Bool;
    /// True if the face can be scaled.
    SCALABLE = 25, "scalable", Bool;
    DPI = 26, "dpi", Double;
    RGBA = 27, "rgba", Integer;
    SCALE = 28, "scale", Double;
    MINSPACE = 29, "minspace", Bool;
    CHAR_WIDTH = 30, "charwidth", Integer;
    CHAR_HEIGHT = 31, "charheight", Integer;
    MATRIX = 32, "matrix", Matrix;
    /// Unicode coverage.
    CHARSET = 33, "charset", Charset;
    /// Supported languages.
    LANG = 34, "lang", Langset;
    /// Font revision from the `head` table.
    FONT_VERSION = 35, "fontversion", Integer;
    /// Layout capabilities.
    CAPABILITY = 36, "capability", String;
    /// Name of the loader that recognized the file.
    FONT_FORMAT = 37, "fontformat", String;
    EMBOLDEN = 38, "embolden", Bool;
    EMBEDDED_BITMAP = 39, "embeddedbitmap", Bool;
    /// True if the style looks decorative.
    DECORATIVE = 40, "decorative", Bool;
    LCD_FILTER = 41, "lcdfilter", Integer;
    /// Language used to select names.
    NAME_LANG = 42, "namelang", String;
    FONT_FEATURES = 43, "fontfeatures", String;
    /// Name of the running program.
    PRGNAME = 44, "prgname", String;
    HASH = 45, "hash", String;
    /// PostScript name.
    POSTSCRIPT_NAME = 46, "postscriptname", String;
    /// True if the face has color glyphs.
    COLOR = 47, "color", Bool;
    /// True if the face uses a symbol character map.
    SYMBOL = 48, "symbol", Bool;
    FONT_VARIATIONS = 49, "fontvariations", String;
    /// True for the pattern describing a variable font as a whole.
    VARIABLE = 50, "variable", Bool;
    /// True if the face carries hinting instructions.
    FONT_HAS_HINT = 51, "fonthashint", Bool;
    ORDER = 52, "order", Integer;
}

impl Object {
    /// First tag available to custom objects.
    pub const FIRST_CUSTOM: u16 = BUILTINS.len() as u16 + 1;

    /// Returns the built-in object with the given name.
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTINS
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|i| Self(i as u16 + 1))
    }

    /// Returns the name of a built-in object.
    pub fn name(self) -> Option<&'static str> {
        self.builtin().map(|b| b.0)
    }

    /// Returns true if this is a built-in object.
    pub fn is_builtin(self) -> bool {
        self.0 != 0 && self.0 < Self::FIRST_CUSTOM
    }

    /// Returns the type constraint for values of this object.
    pub fn constraint(self) -> Constraint {
        self.builtin().map(|b| b.1).unwrap_or(Constraint::Any)
    }

    /// Returns true if `value` may be stored under this object.
    ///
    /// Tag 0 is reserved and accepts nothing.
    pub fn accepts(self, value: &Value) -> bool {
        self.0 != 0 && self.constraint().accepts(value.ty())
    }

    /// Iterator over all built-in objects in tag order.
    pub fn builtins() -> impl Iterator<Item = Self> + Clone {
        (1..Self::FIRST_CUSTOM).map(Self)
    }

    fn builtin(self) -> Option<&'static (&'static str, Constraint)> {
        BUILTINS.get((self.0 as usize).checked_sub(1)?)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "object{}", self.0),
        }
    }
}

/// Value type constraint associated with an object.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Constraint {
    Integer,
    Double,
    String,
    Bool,
    Matrix,
    Charset,
    Langset,
    Range,
    /// Custom objects accept any value.
    Any,
}

impl Constraint {
    /// Returns true if a value of type `ty` satisfies the constraint.
    pub fn accepts(self, ty: ValueType) -> bool {
        use ValueType as T;
        match self {
            Self::Any => true,
            Self::Integer | Self::Double => matches!(ty, T::Integer | T::Float),
            Self::Range => matches!(ty, T::Range | T::Integer | T::Float),
            Self::Langset => matches!(ty, T::Langset | T::String),
            Self::String => ty == T::String,
            Self::Bool => ty == T::Bool,
            Self::Matrix => ty == T::Matrix,
            Self::Charset => ty == T::Charset,
        }
    }
}

/// Mapping between custom object names and tags.
#[derive(Clone, Default, Debug)]
pub struct ObjectRegistry {
    names: Vec<String>,
    map: HashMap<String, Object>,
}

impl ObjectRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the object for `name`, registering a new custom object if the
    /// name is unknown.
    pub fn register(&mut self, name: &str) -> Object {
        if let Some(object) = self.lookup(name) {
            return object;
        }
        let object = Object(Object::FIRST_CUSTOM + self.names.len() as u16);
        self.names.push(name.to_owned());
        self.map.insert(name.to_ascii_lowercase(), object);
        object
    }

    /// Returns the built-in or registered custom object for `name`.
    pub fn lookup(&self, name: &str) -> Option<Object> {
        Object::from_name(name).or_else(|| self.map.get(&name.to_ascii_lowercase()).copied())
    }

    /// Returns the name of the object.
    pub fn name(&self, object: Object) -> Option<&str> {
        if let Some(name) = object.name() {
            return Some(name);
        }
        let index = object.0.checked_sub(Object::FIRST_CUSTOM)? as usize;
        self.names.get(index).map(|s| s.as_str())
    }

    /// Returns the number of registered custom objects.
    pub fn custom_count(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_round_trip() {
        for object in Object::builtins() {
            let name = object.name().unwrap();
            assert_eq!(Object::from_name(name), Some(object));
        }
        assert_eq!(Object::from_name("Family"), Some(Object::FAMILY));
        assert_eq!(Object::ORDER.0 + 1, Object::FIRST_CUSTOM);
    }

    #[test]
    fn constraints() {
        assert!(Object::WEIGHT.constraint().accepts(ValueType::Integer));
        assert!(Object::WEIGHT.constraint().accepts(ValueType::Range));
        assert!(!Object::FAMILY.constraint().accepts(ValueType::Integer));
        assert!(Object::LANG.constraint().accepts(ValueType::String));
        assert!(!Object::SLANT.constraint().accepts(ValueType::Void));
        assert!(Object(Object::FIRST_CUSTOM).constraint().accepts(ValueType::Void));
        assert!(Object(Object::FIRST_CUSTOM).accepts(&Value::Integer(1)));
        assert!(!Object(0).accepts(&Value::Integer(1)));
    }

    #[test]
    fn custom_objects_are_sequential() {
        let mut registry = ObjectRegistry::new();
        let a = registry.register("myfeature");
        let b = registry.register("other");
        assert_eq!(a.0, Object::FIRST_CUSTOM);
        assert_eq!(b.0, Object::FIRST_CUSTOM + 1);
        assert_eq!(registry.register("MyFeature"), a);
        assert_eq!(registry.lookup("family"), Some(Object::FAMILY));
        assert_eq!(registry.name(b), Some("other"));
        assert_eq!(registry.custom_count(), 2);
    }
}

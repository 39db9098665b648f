//! Numeric constants for weight, width, slant and related objects.

use super::object::Object;

pub const WEIGHT_THIN: i32 = 0;
pub const WEIGHT_EXTRALIGHT: i32 = 40;
pub const WEIGHT_LIGHT: i32 = 50;
pub const WEIGHT_DEMILIGHT: i32 = 55;
pub const WEIGHT_BOOK: i32 = 75;
pub const WEIGHT_REGULAR: i32 = 80;
pub const WEIGHT_MEDIUM: i32 = 100;
pub const WEIGHT_DEMIBOLD: i32 = 180;
pub const WEIGHT_BOLD: i32 = 200;
pub const WEIGHT_EXTRABOLD: i32 = 205;
pub const WEIGHT_BLACK: i32 = 210;
pub const WEIGHT_EXTRABLACK: i32 = 215;

pub const WIDTH_ULTRACONDENSED: i32 = 50;
pub const WIDTH_EXTRACONDENSED: i32 = 63;
pub const WIDTH_CONDENSED: i32 = 75;
pub const WIDTH_SEMICONDENSED: i32 = 87;
pub const WIDTH_NORMAL: i32 = 100;
pub const WIDTH_SEMIEXPANDED: i32 = 113;
pub const WIDTH_EXPANDED: i32 = 125;
pub const WIDTH_EXTRAEXPANDED: i32 = 150;
pub const WIDTH_ULTRAEXPANDED: i32 = 200;

pub const SLANT_ROMAN: i32 = 0;
pub const SLANT_ITALIC: i32 = 100;
pub const SLANT_OBLIQUE: i32 = 110;

pub const PROPORTIONAL: i32 = 0;
pub const DUAL: i32 = 90;
pub const MONO: i32 = 100;
pub const CHARCELL: i32 = 110;

/// Sentinel `FONTVERSION` of queries so that newer fonts sort first.
pub const FONT_VERSION_ANY: i32 = 0x7fff_ffff;

/// Named constant usable in font names and rule expressions.
#[derive(Copy, Clone, Debug)]
pub struct Constant {
    pub name: &'static str,
    pub object: Object,
    pub value: i32,
}

const fn c(name: &'static str, object: Object, value: i32) -> Constant {
    Constant {
        name,
        object,
        value,
    }
}

#[rustfmt::skip]
static CONSTANTS: &[Constant] = &[
    c("thin", Object::WEIGHT, WEIGHT_THIN),
    c("extralight", Object::WEIGHT, WEIGHT_EXTRALIGHT),
    c("ultralight", Object::WEIGHT, WEIGHT_EXTRALIGHT),
    c("demilight", Object::WEIGHT, WEIGHT_DEMILIGHT),
    c("semilight", Object::WEIGHT, WEIGHT_DEMILIGHT),
    c("light", Object::WEIGHT, WEIGHT_LIGHT),
    c("book", Object::WEIGHT, WEIGHT_BOOK),
    c("regular", Object::WEIGHT, WEIGHT_REGULAR),
    c("normal", Object::WEIGHT, WEIGHT_REGULAR),
    c("medium", Object::WEIGHT, WEIGHT_MEDIUM),
    c("demibold", Object::WEIGHT, WEIGHT_DEMIBOLD),
    c("semibold", Object::WEIGHT, WEIGHT_DEMIBOLD),
    c("bold", Object::WEIGHT, WEIGHT_BOLD),
    c("extrabold", Object::WEIGHT, WEIGHT_EXTRABOLD),
    c("ultrabold", Object::WEIGHT, WEIGHT_EXTRABOLD),
    c("black", Object::WEIGHT, WEIGHT_BLACK),
    c("heavy", Object::WEIGHT, WEIGHT_BLACK),
    c("roman", Object::SLANT, SLANT_ROMAN),
    c("italic", Object::SLANT, SLANT_ITALIC),
    c("oblique", Object::SLANT, SLANT_OBLIQUE),
    c("ultracondensed", Object::WIDTH, WIDTH_ULTRACONDENSED),
    c("extracondensed", Object::WIDTH, WIDTH_EXTRACONDENSED),
    c("condensed", Object::WIDTH, WIDTH_CONDENSED),
    c("semicondensed", Object::WIDTH, WIDTH_SEMICONDENSED),
    c("semiexpanded", Object::WIDTH, WIDTH_SEMIEXPANDED),
    c("expanded", Object::WIDTH, WIDTH_EXPANDED),
    c("extraexpanded", Object::WIDTH, WIDTH_EXTRAEXPANDED),
    c("ultraexpanded", Object::WIDTH, WIDTH_ULTRAEXPANDED),
    c("proportional", Object::SPACING, PROPORTIONAL),
    c("dual", Object::SPACING, DUAL),
    c("mono", Object::SPACING, MONO),
    c("charcell", Object::SPACING, CHARCELL),
    c("unknown", Object::RGBA, 0),
    c("rgb", Object::RGBA, 1),
    c("bgr", Object::RGBA, 2),
    c("vrgb", Object::RGBA, 3),
    c("vbgr", Object::RGBA, 4),
    c("none", Object::RGBA, 5),
    c("hintnone", Object::HINT_STYLE, 0),
    c("hintslight", Object::HINT_STYLE, 1),
    c("hintmedium", Object::HINT_STYLE, 2),
    c("hintfull", Object::HINT_STYLE, 3),
    c("lcdnone", Object::LCD_FILTER, 0),
    c("lcddefault", Object::LCD_FILTER, 1),
    c("lcdlight", Object::LCD_FILTER, 2),
    c("lcdlegacy", Object::LCD_FILTER, 3),
];

/// Returns the named constant, ignoring case.
pub fn constant(name: &str) -> Option<&'static Constant> {
    CONSTANTS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Returns the name of the first constant with the given object and value.
pub fn constant_name(object: Object, value: i32) -> Option<&'static str> {
    CONSTANTS
        .iter()
        .find(|c| c.object == object && c.value == value)
        .map(|c| c.name)
}

/// Mapping from OpenType weights to the fontconfig scale.
const WEIGHT_MAP: [(f64, f64); 13] = [
    (0.0, 0.0),
    (100.0, 0.0),
    (200.0, 40.0),
    (300.0, 50.0),
    (350.0, 55.0),
    (380.0, 75.0),
    (400.0, 80.0),
    (500.0, 100.0),
    (600.0, 180.0),
    (700.0, 200.0),
    (800.0, 205.0),
    (900.0, 210.0),
    (1000.0, 215.0),
];

fn lerp(x: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    y1 + (x - x1) * dy / dx
}

/// Converts an OpenType weight class to the fontconfig scale.
///
/// Returns `None` for negative weights. Values above 1000 clamp.
pub fn weight_from_opentype(ot: f64) -> Option<f64> {
    if ot < 0.0 || ot.is_nan() {
        return None;
    }
    let ot = ot.min(WEIGHT_MAP[WEIGHT_MAP.len() - 1].0);
    let mut i = 1;
    while ot > WEIGHT_MAP[i].0 {
        i += 1;
    }
    if ot == WEIGHT_MAP[i].0 {
        return Some(WEIGHT_MAP[i].1);
    }
    let (x1, y1) = WEIGHT_MAP[i - 1];
    let (x2, y2) = WEIGHT_MAP[i];
    Some(lerp(ot, x1, x2, y1, y2))
}

/// Converts a fontconfig weight to an OpenType weight class.
pub fn weight_to_opentype(fc: f64) -> Option<f64> {
    if !(0.0..=WEIGHT_MAP[WEIGHT_MAP.len() - 1].1).contains(&fc) {
        return None;
    }
    let mut i = 1;
    while fc > WEIGHT_MAP[i].1 {
        i += 1;
    }
    if fc == WEIGHT_MAP[i].1 {
        return Some(WEIGHT_MAP[i].0);
    }
    let (x1, y1) = WEIGHT_MAP[i - 1];
    let (x2, y2) = WEIGHT_MAP[i];
    Some(lerp(fc, y1, y2, x1, x2))
}

/// Width for the OS/2 `usWidthClass` values 1 through 9.
pub fn width_from_class(class: u16) -> Option<i32> {
    Some(match class {
        1 => WIDTH_ULTRACONDENSED,
        2 => WIDTH_EXTRACONDENSED,
        3 => WIDTH_CONDENSED,
        4 => WIDTH_SEMICONDENSED,
        5 => WIDTH_NORMAL,
        6 => WIDTH_SEMIEXPANDED,
        7 => WIDTH_EXPANDED,
        8 => WIDTH_EXTRAEXPANDED,
        9 => WIDTH_ULTRAEXPANDED,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opentype_weights() {
        assert_eq!(weight_from_opentype(400.0), Some(80.0));
        assert_eq!(weight_from_opentype(700.0), Some(WEIGHT_BOLD as f64));
        assert_eq!(weight_from_opentype(450.0), Some(90.0));
        assert_eq!(weight_from_opentype(5000.0), Some(215.0));
        assert_eq!(weight_from_opentype(50.0), Some(0.0));
        assert_eq!(weight_from_opentype(-1.0), None);
        assert_eq!(weight_to_opentype(200.0), Some(700.0));
        assert_eq!(weight_to_opentype(90.0), Some(450.0));
    }

    #[test]
    fn named_constants() {
        let bold = constant("Bold").unwrap();
        assert_eq!(bold.object, Object::WEIGHT);
        assert_eq!(bold.value, WEIGHT_BOLD);
        assert_eq!(constant("mono").unwrap().object, Object::SPACING);
        assert!(constant("wobbly").is_none());
        assert_eq!(constant_name(Object::SLANT, SLANT_ITALIC), Some("italic"));
    }

    #[test]
    fn width_classes() {
        assert_eq!(width_from_class(5), Some(WIDTH_NORMAL));
        assert_eq!(width_from_class(9), Some(WIDTH_ULTRAEXPANDED));
        assert_eq!(width_from_class(0), None);
    }
}

//! Contract between the scanner and font format loaders.

use crate::error::Result;

pub use feta::{Encoding, NamedInstance, Os2, StringId, Tag, VariationAxis, Variations};

/// Properties a loader knows about a face without reading its tables.
#[derive(Clone, Default, Debug)]
pub struct FaceSummary {
    pub family: Option<String>,
    pub style: Option<String>,
    pub italic: bool,
    pub bold: bool,
    /// True if the face can be drawn at any size.
    pub scalable: bool,
    /// True if the face has outline glyphs.
    pub outline: bool,
    pub color: bool,
    /// Pixel sizes of the embedded bitmap strikes.
    pub strikes: Vec<f64>,
}

/// Undecoded entry of a name table.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub bytes: Vec<u8>,
}

/// Character map selected by the loader.
#[derive(Clone, Debug)]
pub struct Charmap {
    pub encoding: Encoding,
    /// `(codepoint, glyph)` pairs in codepoint order, as encoded.
    pub mappings: Vec<(u32, u16)>,
}

/// Value of a BDF property.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BdfProperty {
    Atom(String),
    Integer(i32),
    Cardinal(u32),
}

impl BdfProperty {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i as i64),
            Self::Cardinal(c) => Some(*c as i64),
            Self::Atom(_) => None,
        }
    }
}

/// A single face opened by a [`Loader`].
///
/// Only [`summary`](Face::summary) and [`charmap`](Face::charmap) are
/// required; formats without a given structure keep the defaults.
pub trait Face {
    fn summary(&self) -> FaceSummary;

    fn charmap(&self) -> Option<Charmap>;

    /// Advance width of a glyph in font units.
    fn advance(&self, _glyph: u16) -> Option<u16> {
        None
    }

    fn postscript_name(&self) -> Option<String> {
        None
    }

    fn names(&self) -> Vec<NameRecord> {
        Vec::new()
    }

    fn os2(&self) -> Option<Os2> {
        None
    }

    /// `head` font revision as 16.16 fixed point.
    fn font_revision(&self) -> Option<i32> {
        None
    }

    fn has_table(&self, _tag: &[u8; 4]) -> bool {
        false
    }

    fn script_tags(&self) -> Vec<Tag> {
        Vec::new()
    }

    fn variations(&self) -> Variations {
        Variations::default()
    }

    fn bdf_property(&self, _name: &str) -> Option<BdfProperty> {
        None
    }
}

/// Recognizes one font format.
pub trait Loader: Send + Sync {
    /// Value stored in `FONTFORMAT` for faces from this loader.
    fn format(&self) -> &'static str;

    /// Opens every face in `data`, or fails with
    /// [`Error::InvalidFont`](crate::Error::InvalidFont) if the data is not
    /// in this format.
    fn load<'a>(&self, data: &'a [u8]) -> Result<Vec<Box<dyn Face + 'a>>>;
}

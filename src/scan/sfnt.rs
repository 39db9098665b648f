//! Loaders for OpenType fonts and collections.

use super::face::{Charmap, Face, FaceSummary, Loader, NameRecord, Os2, Tag, Variations};
use crate::error::{Error, Result};
use feta::raw::types::GlyphId;
use feta::{FileRef, FontRef, GlyphMetrics, MetadataProvider, StringId};

const OUTLINE_TABLES: [&[u8; 4]; 3] = [b"glyf", b"CFF ", b"CFF2"];
const BITMAP_TABLES: [&[u8; 4]; 3] = [b"CBDT", b"EBDT", b"sbix"];
const COLOR_TABLES: [&[u8; 4]; 4] = [b"COLR", b"CBDT", b"sbix", b"SVG "];

/// Face backed by an sfnt font.
pub struct SfntFace<'a> {
    font: FontRef<'a>,
    metrics: GlyphMetrics<'a>,
}

impl<'a> SfntFace<'a> {
    pub fn new(font: FontRef<'a>) -> Self {
        let metrics = font.glyph_metrics();
        Self { font, metrics }
    }

    fn has_any(&self, tags: &[&[u8; 4]]) -> bool {
        tags.iter().any(|tag| self.font.has_table(tag))
    }

    fn is_cff(&self) -> bool {
        self.has_any(&[b"CFF ", b"CFF2"])
    }

    /// First decodable, non-blank string with the given id.
    fn unicode_name(&self, id: StringId) -> Option<String> {
        self.font
            .localized_strings()
            .iter()
            .filter(|s| s.id() == id)
            .map(|s| s.chars().collect::<String>())
            .find(|s| !s.trim().is_empty())
    }
}

impl Face for SfntFace<'_> {
    fn summary(&self) -> FaceSummary {
        let attrs = self.font.attributes();
        let outline = self.has_any(&OUTLINE_TABLES);
        let scalable = outline || self.has_any(&[b"CBDT", b"sbix"]);
        let strikes = if self.has_any(&BITMAP_TABLES) {
            self.font.strikes().into_iter().map(f64::from).collect()
        } else {
            Vec::new()
        };
        FaceSummary {
            family: self.unicode_name(StringId::FAMILY_NAME),
            style: self.unicode_name(StringId::SUBFAMILY_NAME),
            italic: attrs.is_italic(),
            bold: attrs.is_bold(),
            scalable,
            outline,
            color: self.has_any(&COLOR_TABLES),
            strikes,
        }
    }

    fn charmap(&self) -> Option<Charmap> {
        let charmap = self.font.charmap();
        Some(Charmap {
            encoding: charmap.encoding()?,
            mappings: charmap
                .mappings()
                .into_iter()
                .map(|(ch, glyph)| (ch, glyph.to_u16()))
                .collect(),
        })
    }

    fn advance(&self, glyph: u16) -> Option<u16> {
        if self.metrics.is_empty() {
            return None;
        }
        Some(self.metrics.advance_width(GlyphId::new(glyph)))
    }

    fn names(&self) -> Vec<NameRecord> {
        self.font
            .localized_strings()
            .iter()
            .map(|s| NameRecord {
                platform_id: s.platform_id(),
                encoding_id: s.encoding_id(),
                language_id: s.language_id(),
                name_id: s.id().0,
                bytes: s.bytes().to_vec(),
            })
            .collect()
    }

    fn os2(&self) -> Option<Os2> {
        self.font.attributes().os2
    }

    fn font_revision(&self) -> Option<i32> {
        self.font.attributes().head.map(|head| head.revision)
    }

    fn has_table(&self, tag: &[u8; 4]) -> bool {
        self.font.has_table(tag)
    }

    fn script_tags(&self) -> Vec<Tag> {
        self.font.script_tags()
    }

    fn variations(&self) -> Variations {
        self.font.variations()
    }
}

/// Opens every font of a file or collection; the flavor of the first
/// font decides which loader claims the file.
fn load_sfnt(data: &[u8], cff: bool) -> Result<Vec<Box<dyn Face + '_>>> {
    let fonts = match FileRef::new(data).map_err(|_| Error::InvalidFont)? {
        FileRef::Font(font) => vec![font],
        FileRef::Collection(collection) => (0..collection.len())
            .map(|index| collection.get(index).map_err(|_| Error::InvalidFont))
            .collect::<Result<Vec<_>>>()?,
    };
    let faces: Vec<_> = fonts.into_iter().map(SfntFace::new).collect();
    if !faces.first().is_some_and(|first| first.is_cff() == cff) {
        return Err(Error::InvalidFont);
    }
    Ok(faces
        .into_iter()
        .map(|face| Box::new(face) as Box<dyn Face + '_>)
        .collect())
}

/// Loader for sfnt fonts with TrueType outlines or no outlines at all.
#[derive(Copy, Clone, Default, Debug)]
pub struct TrueTypeLoader;

impl Loader for TrueTypeLoader {
    fn format(&self) -> &'static str {
        "TrueType"
    }

    fn load<'a>(&self, data: &'a [u8]) -> Result<Vec<Box<dyn Face + 'a>>> {
        load_sfnt(data, false)
    }
}

/// Loader for sfnt fonts with `CFF ` or `CFF2` outlines.
#[derive(Copy, Clone, Default, Debug)]
pub struct CffLoader;

impl Loader for CffLoader {
    fn format(&self) -> &'static str {
        "CFF"
    }

    fn load<'a>(&self, data: &'a [u8]) -> Result<Vec<Box<dyn Face + 'a>>> {
        load_sfnt(data, true)
    }
}

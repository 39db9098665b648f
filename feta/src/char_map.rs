use alloc::vec::Vec;
use read_fonts::{
    tables::cmap::{Cmap, CmapSubtable, PlatformId},
    types::GlyphId,
    TableProvider,
};

/// Encoding of the selected character map subtable.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Encoding {
    Unicode,
    /// Microsoft symbol encoding; characters usually live in
    /// `U+F000..U+F0FF`.
    Symbol,
}

struct Map<'a> {
    map: CmapSubtable<'a>,
    is_symbol: bool,
}

impl<'a> Map<'a> {
    fn new(map: CmapSubtable<'a>, is_symbol: bool) -> Self {
        Self { map, is_symbol }
    }

    fn map(&self, codepoint: u32) -> Option<GlyphId> {
        match &self.map {
            CmapSubtable::Format4(subtable) => subtable.map_codepoint(codepoint),
            CmapSubtable::Format12(subtable) => subtable.map_codepoint(codepoint),
            _ => None,
        }
    }
}

/// Mapping of codepoints to nominal glyph identifiers.
pub struct Charmap<'a> {
    map: Option<Map<'a>>,
}

impl<'a> Charmap<'a> {
    /// Creates a new character map from the specified table provider.
    pub fn new(font: &impl TableProvider<'a>) -> Self {
        let map = font
            .cmap()
            .ok()
            .and_then(|cmap| find_symbol_or_unicode_subtable(&cmap));
        Self { map }
    }

    /// Returns the encoding of the selected subtable or `None` if the font
    /// has no usable subtable.
    pub fn encoding(&self) -> Option<Encoding> {
        self.map.as_ref().map(|map| {
            if map.is_symbol {
                Encoding::Symbol
            } else {
                Encoding::Unicode
            }
        })
    }

    /// Maps a codepoint to a nominal glyph identifier. Returns `None` if a mapping does
    /// not exist.
    pub fn map(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let map = self.map.as_ref()?;
        map.map(codepoint.into())
            .filter(|glyph_id| glyph_id.to_u16() != 0)
    }

    /// Returns every `(codepoint, glyph)` pair of the subtable with a
    /// non-zero glyph. Codepoints are reported as encoded, without symbol
    /// remapping.
    pub fn mappings(&self) -> Vec<(u32, GlyphId)> {
        let mut out = Vec::new();
        let Some(map) = self.map.as_ref() else {
            return out;
        };
        match &map.map {
            CmapSubtable::Format4(subtable) => {
                for (start, end) in subtable.start_code().iter().zip(subtable.end_code()) {
                    let (start, end) = (start.get() as u32, end.get() as u32);
                    // The final segment only maps 0xFFFF to the missing glyph.
                    for codepoint in start..=end.min(0xFFFE) {
                        if let Some(glyph_id) = self.map(codepoint) {
                            out.push((codepoint, glyph_id));
                        }
                    }
                }
            }
            CmapSubtable::Format12(subtable) => {
                for group in subtable.groups() {
                    let start = group.start_char_code();
                    let end = group.end_char_code().min(0x10FFFF);
                    let first_glyph = group.start_glyph_id();
                    for codepoint in start..=end {
                        let glyph = first_glyph.saturating_add(codepoint - start);
                        if glyph != 0 && glyph <= u16::MAX as u32 {
                            out.push((codepoint, GlyphId::new(glyph as u16)));
                        }
                    }
                }
            }
            _ => {}
        }
        out
    }
}

/// Find the best subtable that supports a Unicode mapping.
///
/// The strategy is a combination of those used in FreeType and HarfBuzz.
fn find_symbol_or_unicode_subtable<'a>(cmap: &Cmap<'a>) -> Option<Map<'a>> {
    const ENCODING_MS_SYMBOL: u16 = 0;
    const ENCODING_MS_UNICODE_CS: u16 = 1;
    const ENCODING_MS_ID_UCS_4: u16 = 10;
    const ENCODING_APPLE_ID_UNICODE_32: u16 = 4;
    let records = cmap.encoding_records();
    let usable = |subtable: &CmapSubtable| {
        matches!(
            subtable,
            CmapSubtable::Format4(_) | CmapSubtable::Format12(_)
        )
    };
    // HarfBuzz prefers a symbol subtable.
    for rec in records {
        if let (PlatformId::Windows, ENCODING_MS_SYMBOL) = (rec.platform_id(), rec.encoding_id()) {
            if let Ok(subtable) = rec.subtable(cmap.offset_data()) {
                if usable(&subtable) {
                    return Some(Map::new(subtable, true));
                }
            }
        }
    }
    // First, search for a UCS4 mapping.
    // According to FreeType, the most interesting table (Windows, UCS4) often appears
    // last, so search in reverse order.
    for rec in records.iter().rev() {
        if let (PlatformId::Windows, ENCODING_MS_ID_UCS_4)
        | (PlatformId::Unicode, ENCODING_APPLE_ID_UNICODE_32) = (rec.platform_id(), rec.encoding_id())
        {
            if let Ok(subtable) = rec.subtable(cmap.offset_data()) {
                if usable(&subtable) {
                    return Some(Map::new(subtable, false));
                }
            }
        }
    }
    // Now simply search for any Unicode mapping, again in reverse.
    for rec in records.iter().rev() {
        match (rec.platform_id(), rec.encoding_id()) {
            (PlatformId::ISO, _)
            | (PlatformId::Unicode, _)
            | (PlatformId::Windows, ENCODING_MS_ID_UCS_4)
            | (PlatformId::Windows, ENCODING_MS_UNICODE_CS) => {
                if let Ok(subtable) = rec.subtable(cmap.offset_data()) {
                    if usable(&subtable) {
                        return Some(Map::new(subtable, false));
                    }
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_font::{be, TestFont};
    use crate::{FontRef, MetadataProvider};

    /// Builds a cmap with a single format 4 subtable mapping `start..=end`
    /// to glyphs starting at 1.
    fn cmap4(encoding: u16, start: u16, end: u16) -> Vec<u8> {
        let delta = 1u16.wrapping_sub(start);
        let subtable_len = 16 + 8 * 2;
        let mut subtable = be(&[4, subtable_len, 0, 4, 0, 0, 0]);
        subtable.extend(be(&[end, 0xFFFF, 0, start, 0xFFFF, delta, 1, 0, 0]));
        let mut cmap = be(&[0, 1, 3, encoding]);
        cmap.extend_from_slice(&12u32.to_be_bytes());
        cmap.extend(subtable);
        cmap
    }

    #[test]
    fn unicode_format4() {
        let data = TestFont::new().table(b"cmap", cmap4(1, 0x41, 0x43)).build();
        let font = FontRef::new(&data).unwrap();
        let charmap = font.charmap();
        assert_eq!(charmap.encoding(), Some(Encoding::Unicode));
        assert_eq!(charmap.map(0x42u32).map(|g| g.to_u16()), Some(2));
        assert_eq!(charmap.map(0x44u32), None);
        let mappings: Vec<_> = charmap
            .mappings()
            .into_iter()
            .map(|(c, g)| (c, g.to_u16()))
            .collect();
        assert_eq!(mappings, [(0x41, 1), (0x42, 2), (0x43, 3)]);
    }

    #[test]
    fn symbol_subtable() {
        let data = TestFont::new()
            .table(b"cmap", cmap4(0, 0xF041, 0xF042))
            .build();
        let font = FontRef::new(&data).unwrap();
        let charmap = font.charmap();
        assert_eq!(charmap.encoding(), Some(Encoding::Symbol));
        assert_eq!(charmap.mappings().len(), 2);
    }

    #[test]
    fn missing_cmap() {
        let data = TestFont::new().table(b"head", vec![0; 54]).build();
        let font = FontRef::new(&data).unwrap();
        assert_eq!(font.charmap().encoding(), None);
        assert!(font.charmap().mappings().is_empty());
    }
}

/*!
Font metadata reader.

Exposes the parts of an OpenType font that describe it rather than render
it: name records, `OS/2` and `head` attributes, the nominal character map,
advance widths, variation axes and named instances, layout scripts and
bitmap strikes.
*/

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod attributes;
mod char_map;
mod glyph_metrics;
mod layout;
mod localized_strings;
mod variations;

#[cfg(test)]
mod test_font;

/// Raw primitives for parsing font data.
pub extern crate read_fonts as raw;

pub use raw::{types::Tag, CollectionRef, FileRef, FontRef};

pub use attributes::{Attributes, Head, Os2};
pub use char_map::{Charmap, Encoding};
pub use glyph_metrics::GlyphMetrics;
pub use localized_strings::{locale, LocalizedString, LocalizedStringCollection, StringId};
pub use variations::{NamedInstance, VariationAxis, Variations};

use alloc::vec::Vec;

/// Interface for types that can provide font metadata.
pub trait MetadataProvider<'a>: raw::TableProvider<'a> + Sized {
    /// Returns the collection of raw name table strings.
    fn localized_strings(&self) -> LocalizedStringCollection<'a> {
        LocalizedStringCollection::new(self)
    }

    /// Returns the `OS/2` and `head` attributes.
    fn attributes(&self) -> Attributes {
        attributes::from_font(self)
    }

    /// Returns the codepoint to nominal glyph identifier mapping.
    fn charmap(&self) -> Charmap<'a> {
        Charmap::new(self)
    }

    /// Returns the horizontal glyph metrics in font units.
    fn glyph_metrics(&self) -> GlyphMetrics<'a> {
        GlyphMetrics::new(self)
    }

    /// Returns the variation axes and named instances.
    fn variations(&self) -> Variations {
        Variations::new(self)
    }

    /// Returns the script tags declared by the `GSUB` and `GPOS` tables,
    /// sorted and without duplicates.
    fn script_tags(&self) -> Vec<Tag> {
        layout::script_tags(self)
    }

    /// Returns the vertical pixels per em of each embedded bitmap strike.
    fn strikes(&self) -> Vec<u8> {
        layout::strikes(self)
    }

    /// Returns the number of glyphs declared by the `maxp` table.
    fn glyph_count(&self) -> u16 {
        self.maxp().map(|maxp| maxp.num_glyphs()).unwrap_or(0)
    }

    /// Returns true if the font contains a table with the given tag.
    fn has_table(&self, tag: &[u8; 4]) -> bool {
        self.data_for_tag(Tag::new(tag)).is_some()
    }
}

impl<'a, T> MetadataProvider<'a> for T where T: raw::TableProvider<'a> {}

//! Script lists of the layout tables and embedded bitmap strikes.

use alloc::vec::Vec;
use read_fonts::{types::Tag, TableProvider};

pub fn script_tags<'a>(font: &impl TableProvider<'a>) -> Vec<Tag> {
    let lists = [
        font.gsub().ok().and_then(|gsub| gsub.script_list().ok()),
        font.gpos().ok().and_then(|gpos| gpos.script_list().ok()),
    ];
    let mut tags: Vec<Tag> = lists
        .iter()
        .flatten()
        .flat_map(|list| list.script_records().iter().map(|record| record.script_tag()))
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

pub fn strikes<'a>(font: &impl TableProvider<'a>) -> Vec<u8> {
    let sizes = match font.cblc() {
        Ok(cblc) => cblc.bitmap_sizes(),
        Err(_) => match font.eblc() {
            Ok(eblc) => eblc.bitmap_sizes(),
            Err(_) => return Vec::new(),
        },
    };
    sizes.iter().map(|size| size.ppem_y()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_font::{be, TestFont};
    use crate::{FontRef, MetadataProvider};

    fn layout(scripts: &[&[u8; 4]]) -> Vec<u8> {
        let mut data = be(&[1, 0, 10, 0, 0]);
        data.extend(be(&[scripts.len() as u16]));
        for tag in scripts {
            data.extend_from_slice(*tag);
            data.extend(be(&[0]));
        }
        data
    }

    #[test]
    fn scripts_are_merged() {
        let data = TestFont::new()
            .table(b"GSUB", layout(&[b"latn", b"arab"]))
            .table(b"GPOS", layout(&[b"latn", b"DFLT"]))
            .build();
        let font = FontRef::new(&data).unwrap();
        let tags: Vec<_> = font.script_tags();
        assert_eq!(
            tags,
            [Tag::new(b"DFLT"), Tag::new(b"arab"), Tag::new(b"latn")]
        );
    }

    #[test]
    fn bitmap_strikes() {
        let mut eblc = vec![0, 2, 0, 0];
        eblc.extend_from_slice(&2u32.to_be_bytes());
        for ppem in [13u8, 16] {
            let mut size = vec![0; 48];
            size[44] = ppem;
            size[45] = ppem;
            eblc.extend(size);
        }
        let data = TestFont::new().table(b"EBLC", eblc).build();
        let font = FontRef::new(&data).unwrap();
        assert_eq!(font.strikes(), [13, 16]);
        assert!(font.script_tags().is_empty());
    }
}

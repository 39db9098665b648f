use alloc::vec::Vec;
use read_fonts::{types::Tag, TableProvider};

use crate::StringId;

/// Variation axis.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct VariationAxis {
    pub tag: Tag,
    pub min: f64,
    pub default: f64,
    pub max: f64,
    pub name_id: StringId,
}

/// Named instance of a variable font.
#[derive(Clone, PartialEq, Debug)]
pub struct NamedInstance {
    pub subfamily_name_id: StringId,
    pub postscript_name_id: Option<StringId>,
    /// User space coordinates, one per axis.
    pub coords: Vec<f64>,
}

/// Axes and named instances from the `fvar` table.
#[derive(Clone, Default, Debug)]
pub struct Variations {
    pub axes: Vec<VariationAxis>,
    pub instances: Vec<NamedInstance>,
}

impl Variations {
    pub fn new<'a>(font: &impl TableProvider<'a>) -> Self {
        let Ok(fvar) = font.fvar() else {
            return Self::default();
        };
        let axes = fvar
            .axes()
            .unwrap_or_default()
            .iter()
            .map(|axis| VariationAxis {
                tag: axis.axis_tag(),
                min: axis.min_value().to_f64(),
                default: axis.default_value().to_f64(),
                max: axis.max_value().to_f64(),
                name_id: StringId(axis.axis_name_id().to_u16()),
            })
            .collect();
        let instances = fvar
            .instances()
            .map(|instances| {
                instances
                    .iter()
                    .filter_map(|instance| instance.ok())
                    .map(|instance| NamedInstance {
                        subfamily_name_id: StringId(instance.subfamily_name_id.to_u16()),
                        postscript_name_id: instance
                            .post_script_name_id
                            .map(|id| StringId(id.to_u16())),
                        coords: instance
                            .coordinates
                            .iter()
                            .map(|coord| coord.get().to_f64())
                            .collect(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { axes, instances }
    }

    /// Returns the axis with the specified tag.
    pub fn axis(&self, tag: Tag) -> Option<&VariationAxis> {
        self.axes.iter().find(|axis| axis.tag == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_font::{be, TestFont};
    use crate::{FontRef, MetadataProvider};

    fn fixed(value: i32) -> Vec<u8> {
        (value << 16).to_be_bytes().to_vec()
    }

    #[test]
    fn axes_and_instances() {
        // One wght axis, two instances with postscript names.
        let mut fvar = be(&[1, 0, 16, 2, 1, 20, 2, 10]);
        fvar.extend_from_slice(b"wght");
        fvar.extend(fixed(100));
        fvar.extend(fixed(400));
        fvar.extend(fixed(900));
        fvar.extend(be(&[0, 256]));
        for (name, weight, ps) in [(258, 400, 300), (259, 700, 301)] {
            fvar.extend(be(&[name, 0]));
            fvar.extend(fixed(weight));
            fvar.extend(be(&[ps]));
        }
        let data = TestFont::new().table(b"fvar", fvar).build();
        let font = FontRef::new(&data).unwrap();
        let vars = font.variations();
        let wght = vars.axis(Tag::new(b"wght")).unwrap();
        assert_eq!((wght.min, wght.default, wght.max), (100.0, 400.0, 900.0));
        assert_eq!(wght.name_id, StringId(256));
        assert_eq!(vars.instances.len(), 2);
        assert_eq!(vars.instances[1].subfamily_name_id, StringId(259));
        assert_eq!(vars.instances[1].postscript_name_id, Some(StringId(301)));
        assert_eq!(vars.instances[1].coords, [700.0]);
    }

    #[test]
    fn no_fvar() {
        let data = TestFont::new().table(b"head", vec![0; 54]).build();
        let font = FontRef::new(&data).unwrap();
        assert!(font.variations().is_empty());
        assert!(font.variations().instances.is_empty());
    }
}

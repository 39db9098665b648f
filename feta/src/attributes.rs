use read_fonts::{tables, TableProvider};

/// Fields of the `OS/2` table that describe the face.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Os2 {
    pub version: u16,
    pub weight_class: u16,
    pub width_class: u16,
    pub fs_selection: u16,
    /// Four character vendor identifier, zero filled when absent.
    pub vendor_id: [u8; 4],
    /// Code page ranges; zero before version 1.
    pub code_page_range: [u32; 2],
    /// Lower and upper optical point sizes in twentieths of a point.
    /// Present from version 5.
    pub optical_point_size: Option<(u16, u16)>,
}

impl Os2 {
    const FS_SELECTION_ITALIC: u16 = 1;
    const FS_SELECTION_BOLD: u16 = 1 << 5;

    fn new(os2: &tables::os2::Os2) -> Self {
        Self {
            version: os2.version(),
            weight_class: os2.us_weight_class(),
            width_class: os2.us_width_class(),
            fs_selection: os2.fs_selection().bits(),
            vendor_id: os2.ach_vend_id().to_be_bytes(),
            code_page_range: [
                os2.ul_code_page_range_1().unwrap_or(0),
                os2.ul_code_page_range_2().unwrap_or(0),
            ],
            optical_point_size: os2
                .us_lower_optical_point_size()
                .zip(os2.us_upper_optical_point_size()),
        }
    }
}

/// Fields of the `head` table that describe the face.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Head {
    /// Font revision as a 16.16 fixed point number.
    pub revision: i32,
    pub units_per_em: u16,
    pub mac_style: u16,
}

impl Head {
    const MAC_STYLE_BOLD: u16 = 1;
    const MAC_STYLE_ITALIC: u16 = 2;

    fn new(head: &tables::head::Head) -> Self {
        Self {
            revision: head.font_revision().to_bits(),
            units_per_em: head.units_per_em(),
            mac_style: head.mac_style().bits(),
        }
    }
}

/// Style attributes from the `OS/2` and `head` tables.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Attributes {
    pub os2: Option<Os2>,
    pub head: Option<Head>,
}

impl Attributes {
    /// Returns true if the face is flagged italic.
    pub fn is_italic(&self) -> bool {
        match (&self.os2, &self.head) {
            (Some(os2), _) => os2.fs_selection & Os2::FS_SELECTION_ITALIC != 0,
            (None, Some(head)) => head.mac_style & Head::MAC_STYLE_ITALIC != 0,
            _ => false,
        }
    }

    /// Returns true if the face is flagged bold.
    pub fn is_bold(&self) -> bool {
        match (&self.os2, &self.head) {
            (Some(os2), _) => os2.fs_selection & Os2::FS_SELECTION_BOLD != 0,
            (None, Some(head)) => head.mac_style & Head::MAC_STYLE_BOLD != 0,
            _ => false,
        }
    }
}

pub fn from_font<'a>(font: &impl TableProvider<'a>) -> Attributes {
    Attributes {
        os2: font.os2().ok().as_ref().map(Os2::new),
        head: font.head().ok().as_ref().map(Head::new),
    }
}

//! Builds minimal sfnt binaries for tests.

pub struct TestFont {
    tables: Vec<([u8; 4], Vec<u8>)>,
}

impl TestFont {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn table(mut self, tag: &[u8; 4], data: Vec<u8>) -> Self {
        self.tables.push((*tag, data));
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.tables.sort_by(|a, b| a.0.cmp(&b.0));
        let mut out = Vec::new();
        out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
        out.extend_from_slice(&(self.tables.len() as u16).to_be_bytes());
        out.extend_from_slice(&[0; 6]);
        let mut offset = 12 + 16 * self.tables.len();
        for (tag, data) in &self.tables {
            out.extend_from_slice(tag);
            out.extend_from_slice(&0u32.to_be_bytes());
            out.extend_from_slice(&(offset as u32).to_be_bytes());
            out.extend_from_slice(&(data.len() as u32).to_be_bytes());
            offset += (data.len() + 3) & !3;
        }
        for (_, data) in &self.tables {
            out.extend_from_slice(data);
            out.resize((out.len() + 3) & !3, 0);
        }
        out
    }
}

pub fn be(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Builds a format 0 name table from
/// `(platform, encoding, language, name id, bytes)` records.
pub fn name_table(records: &[(u16, u16, u16, u16, Vec<u8>)]) -> Vec<u8> {
    let storage = 6 + records.len() * 12;
    let mut out = be(&[0, records.len() as u16, storage as u16]);
    let mut strings = Vec::new();
    for (platform, encoding, language, id, bytes) in records {
        out.extend(be(&[
            *platform,
            *encoding,
            *language,
            *id,
            bytes.len() as u16,
            strings.len() as u16,
        ]));
        strings.extend_from_slice(bytes);
    }
    out.extend(strings);
    out
}

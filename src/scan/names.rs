//! Name table decoding.

use super::face::NameRecord;
use encoding_rs::{Encoding, BIG5, EUC_KR, GBK, MACINTOSH, SHIFT_JIS, UTF_16BE};

pub const PLATFORM_UNICODE: u16 = 0;
pub const PLATFORM_MAC: u16 = 1;
pub const PLATFORM_ISO: u16 = 2;
pub const PLATFORM_MS: u16 = 3;

/// Platforms in the order their names are collected.
pub const PLATFORM_ORDER: [u16; 4] = [PLATFORM_MS, PLATFORM_UNICODE, PLATFORM_MAC, PLATFORM_ISO];

pub const NAME_FAMILY: u16 = 1;
pub const NAME_SUBFAMILY: u16 = 2;
pub const NAME_FULL: u16 = 4;
pub const NAME_POSTSCRIPT: u16 = 6;
pub const NAME_TRADEMARK: u16 = 7;
pub const NAME_MANUFACTURER: u16 = 8;
pub const NAME_TYPOGRAPHIC_FAMILY: u16 = 16;
pub const NAME_TYPOGRAPHIC_SUBFAMILY: u16 = 17;
pub const NAME_MAC_FULL: u16 = 18;
pub const NAME_WWS_FAMILY: u16 = 21;
pub const NAME_WWS_SUBFAMILY: u16 = 22;

/// Name ids in the order their names are collected.
pub const NAME_ORDER: [u16; 10] = [
    NAME_WWS_FAMILY,
    NAME_TYPOGRAPHIC_FAMILY,
    NAME_FAMILY,
    NAME_MAC_FULL,
    NAME_FULL,
    NAME_WWS_SUBFAMILY,
    NAME_TYPOGRAPHIC_SUBFAMILY,
    NAME_SUBFAMILY,
    NAME_TRADEMARK,
    NAME_MANUFACTURER,
];

const MAC_LANG_ENGLISH: u16 = 0;
const MS_LANG_ENGLISH_US: u16 = 0x409;
const MS_LANG_JAPANESE: u16 = 0x411;

/// Name records sorted for lookup by platform and name id.
pub struct Names {
    records: Vec<NameRecord>,
}

impl Names {
    /// Sorts by platform, name id, encoding, English first, then language.
    /// Ties keep the table order.
    pub fn new(mut records: Vec<NameRecord>) -> Self {
        records.sort_by_key(|r| {
            (
                r.platform_id,
                r.name_id,
                r.encoding_id,
                !is_english(r),
                r.language_id,
            )
        });
        Self { records }
    }

    /// Returns the run of records with the given platform and name id.
    pub fn find(&self, platform_id: u16, name_id: u16) -> &[NameRecord] {
        let key = (platform_id, name_id);
        let start = self
            .records
            .partition_point(|r| (r.platform_id, r.name_id) < key);
        let len = self.records[start..]
            .iter()
            .take_while(|r| (r.platform_id, r.name_id) == key)
            .count();
        &self.records[start..start + len]
    }

    /// Returns the first decodable string for `name_id`, trying platforms in
    /// collection order.
    pub fn first(&self, name_id: u16) -> Option<String> {
        PLATFORM_ORDER
            .iter()
            .flat_map(|&platform| self.find(platform, name_id))
            .find_map(decode)
    }
}

fn is_english(record: &NameRecord) -> bool {
    match record.platform_id {
        PLATFORM_MAC => record.language_id == MAC_LANG_ENGLISH,
        PLATFORM_MS => record.language_id == MS_LANG_ENGLISH_US,
        _ => false,
    }
}

enum Decoder {
    Text(&'static Encoding),
    Latin1,
    Ascii,
}

fn decoder(record: &NameRecord) -> Option<Decoder> {
    use Decoder::*;
    Some(match (record.platform_id, record.encoding_id) {
        (PLATFORM_UNICODE, _) => Text(UTF_16BE),
        (PLATFORM_MAC, 0) => {
            // Some fonts store Windows language ids in Roman records.
            if record.language_id >= 0x100 {
                match record.language_id {
                    MS_LANG_JAPANESE => Text(SHIFT_JIS),
                    MS_LANG_ENGLISH_US => Ascii,
                    _ => return None,
                }
            } else if looks_japanese(&record.bytes) {
                Text(SHIFT_JIS)
            } else {
                Text(MACINTOSH)
            }
        }
        (PLATFORM_MAC, 1) => Text(SHIFT_JIS),
        (PLATFORM_MAC, 2) => Text(BIG5),
        (PLATFORM_MAC, 3) => Text(EUC_KR),
        (PLATFORM_MAC, 25) => Text(GBK),
        (PLATFORM_ISO, 0) => Ascii,
        (PLATFORM_ISO, 1) => Text(UTF_16BE),
        (PLATFORM_ISO, 2) => Latin1,
        (PLATFORM_MS, 0 | 1 | 10) => Text(UTF_16BE),
        (PLATFORM_MS, 2) => Text(SHIFT_JIS),
        (PLATFORM_MS, 3) => Text(GBK),
        (PLATFORM_MS, 4) => Text(BIG5),
        (PLATFORM_MS, 5) => Text(EUC_KR),
        _ => return None,
    })
}

fn looks_japanese(bytes: &[u8]) -> bool {
    let high = bytes.iter().filter(|b| **b & 0x80 != 0).count();
    high * 2 > bytes.len() - high
}

/// Decodes a name record, returning the trimmed string.
///
/// Records in unsupported encodings, with malformed data or that are empty
/// after trimming yield `None`.
pub fn decode(record: &NameRecord) -> Option<String> {
    let bytes = &record.bytes[..];
    let text = match decoder(record)? {
        Decoder::Text(encoding) => {
            // Windows double byte encodings are often padded to 16 bits.
            let unpadded;
            let bytes = if record.platform_id == PLATFORM_MS && encoding != UTF_16BE {
                unpadded = bytes.iter().copied().filter(|b| *b != 0).collect::<Vec<_>>();
                &unpadded[..]
            } else {
                bytes
            };
            let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
            if had_errors {
                return None;
            }
            text.into_owned()
        }
        Decoder::Latin1 => bytes.iter().map(|b| *b as char).collect(),
        Decoder::Ascii => {
            if !bytes.is_ascii() {
                return None;
            }
            bytes.iter().map(|b| *b as char).collect()
        }
    };
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    (!text.is_empty()).then(|| text.to_owned())
}

/// Returns the language tag of a name record, `und` when unknown.
pub fn language(record: &NameRecord) -> &'static str {
    let platform = if record.platform_id == PLATFORM_MAC && record.language_id >= 0x100 {
        PLATFORM_MS
    } else {
        record.platform_id
    };
    feta::locale(platform, record.language_id).unwrap_or("und")
}

const NOTICE_FOUNDRIES: &[(&str, &str)] = &[
    ("Adobe", "adobe"),
    ("Bigelow", "b&h"),
    ("Bitstream", "bitstream"),
    ("Font21", "hwan"),
    ("HanYang System", "hanyang"),
    ("IBM", "ibm"),
    ("International Typeface Corporation", "itc"),
    ("LINOTYPE-HELL", "linotype"),
    ("Linotype", "linotype"),
    ("Microsoft", "microsoft"),
    ("Monotype", "monotype"),
    ("Omega", "omega"),
    ("Tiro Typeworks", "tiro"),
    ("URW", "urw"),
    ("XFree86", "xfree86"),
];

/// Guesses a foundry from a trademark or manufacturer notice.
pub fn notice_foundry(notice: &str) -> Option<&'static str> {
    NOTICE_FOUNDRIES
        .iter()
        .find(|(needle, _)| notice.contains(needle))
        .map(|(_, foundry)| *foundry)
}

/// Derives a foundry from the OS/2 vendor id.
pub fn vendor_foundry(vendor_id: &[u8; 4]) -> Option<String> {
    let vendor = vendor_id
        .iter()
        .take_while(|b| **b != 0)
        .map(|b| *b as char)
        .collect::<String>();
    let vendor = vendor.trim_end();
    (!vendor.is_empty()).then(|| vendor.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(platform_id: u16, encoding_id: u16, language_id: u16, name_id: u16, bytes: &[u8]) -> NameRecord {
        NameRecord {
            platform_id,
            encoding_id,
            language_id,
            name_id,
            bytes: bytes.to_vec(),
        }
    }

    fn utf16(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
    }

    #[test]
    fn decoding() {
        let ms = record(3, 1, 0x409, 1, &utf16(" Noto Sans "));
        assert_eq!(decode(&ms).as_deref(), Some("Noto Sans"));
        assert_eq!(language(&ms), "en");
        let mac = record(1, 0, 0, 1, b"Caf\x8e");
        assert_eq!(decode(&mac).as_deref(), Some("Café"));
        let sjis = record(1, 1, 11, 1, b"\x83\x65\x83\x58\x83\x67");
        assert_eq!(decode(&sjis).as_deref(), Some("テスト"));
        assert_eq!(language(&sjis), "ja");
        let latin1 = record(2, 2, 0, 1, b"Se\xf1or");
        assert_eq!(decode(&latin1).as_deref(), Some("Señor"));
        assert_eq!(language(&latin1), "und");
        assert_eq!(decode(&record(3, 6, 0x412, 1, b"abc")), None);
        assert_eq!(decode(&record(2, 0, 0, 1, b"\xff")), None);
        assert_eq!(decode(&record(3, 1, 0x409, 1, &utf16("  "))), None);
    }

    #[test]
    fn mac_roman_heuristics() {
        // Mostly high bytes reads as Shift-JIS.
        let r = record(1, 0, 0, 1, b"\x83\x65\x83\x58");
        assert_eq!(decode(&r).as_deref(), Some("テス"));
        let r = record(1, 0, 0x411, 1, b"\x83\x65");
        assert_eq!(decode(&r).as_deref(), Some("テ"));
        assert_eq!(language(&r), "ja");
        assert_eq!(decode(&record(1, 0, 0x412, 1, b"abc")), None);
    }

    #[test]
    fn sorted_lookup() {
        let names = Names::new(vec![
            record(3, 1, 0x407, 1, &utf16("Deutsch")),
            record(1, 0, 0, 1, b"Mac"),
            record(3, 1, 0x409, 2, &utf16("Regular")),
            record(3, 1, 0x409, 1, &utf16("English")),
        ]);
        let family: Vec<_> = names.find(3, 1).iter().filter_map(decode).collect();
        assert_eq!(family, ["English", "Deutsch"]);
        assert_eq!(names.find(3, 4).len(), 0);
        assert_eq!(names.first(1).as_deref(), Some("English"));
        assert_eq!(names.first(2).as_deref(), Some("Regular"));
        assert_eq!(names.first(6), None);
    }

    #[test]
    fn foundries() {
        assert_eq!(notice_foundry("Copyright Bigelow & Holmes"), Some("b&h"));
        assert_eq!(notice_foundry("Made by nobody"), None);
        assert_eq!(vendor_foundry(b"ADBE").as_deref(), Some("ADBE"));
        assert_eq!(vendor_foundry(b"PfEd").as_deref(), Some("PfEd"));
        assert_eq!(vendor_foundry(b"B&H ").as_deref(), Some("B&H"));
        assert_eq!(vendor_foundry(&[0; 4]), None);
    }
}

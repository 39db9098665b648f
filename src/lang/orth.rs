//! Orthography database.
//!
//! Each entry lists the code points a font must cover to be considered as
//! supporting the language. Entries are sorted by tag so lookups can use a
//! binary search.

type Ranges = &'static [(u32, u32)];

/// Language with the code point ranges that make up its orthography.
pub struct Orthography {
    pub lang: &'static str,
    pub ranges: &'static [Ranges],
}

impl Orthography {
    /// Returns an iterator over every required code point.
    pub fn chars(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges
            .iter()
            .flat_map(|ranges| ranges.iter())
            .flat_map(|&(start, end)| start..=end)
    }
}

const LATIN: Ranges = &[(0x41, 0x5A), (0x61, 0x7A)];
const AF: Ranges = &[(0xEA, 0xEB), (0xEE, 0xEF), (0xF4, 0xF4), (0xFB, 0xFB)];
const AZ: Ranges = &[(0xE7, 0xE7), (0xF6, 0xF6), (0xFC, 0xFC), (0x11F, 0x11F), (0x131, 0x131), (0x15F, 0x15F), (0x259, 0x259)];
const CA: Ranges = &[(0xE0, 0xE0), (0xE7, 0xE9), (0xED, 0xED), (0xEF, 0xEF), (0xF2, 0xF3), (0xFA, 0xFA), (0xFC, 0xFC)];
const CS: Ranges = &[
    (0xE1, 0xE1), (0xE9, 0xE9), (0xED, 0xED), (0xF3, 0xF3), (0xFA, 0xFA), (0xFD, 0xFD),
    (0x10D, 0x10D), (0x10F, 0x10F), (0x11B, 0x11B), (0x148, 0x148), (0x159, 0x159),
    (0x161, 0x161), (0x165, 0x165), (0x16F, 0x16F), (0x17E, 0x17E),
];
const CY: Ranges = &[(0xE2, 0xE2), (0xEA, 0xEA), (0xEE, 0xEE), (0xF4, 0xF4), (0xFB, 0xFB), (0x175, 0x175), (0x177, 0x177)];
const NORDIC: Ranges = &[(0xE5, 0xE6), (0xF8, 0xF8)];
const DE: Ranges = &[(0xDF, 0xDF), (0xE4, 0xE4), (0xF6, 0xF6), (0xFC, 0xFC)];
const EO: Ranges = &[(0x109, 0x109), (0x11D, 0x11D), (0x125, 0x125), (0x135, 0x135), (0x15D, 0x15D), (0x16D, 0x16D)];
const ES: Ranges = &[(0xE1, 0xE1), (0xE9, 0xE9), (0xED, 0xED), (0xF1, 0xF1), (0xF3, 0xF3), (0xFA, 0xFA), (0xFC, 0xFC)];
const ET: Ranges = &[(0xE4, 0xE4), (0xF5, 0xF6), (0xFC, 0xFC), (0x161, 0x161), (0x17E, 0x17E)];
const FI: Ranges = &[(0xE4, 0xE5), (0xF6, 0xF6)];
const FO: Ranges = &[(0xE1, 0xE1), (0xE6, 0xE6), (0xED, 0xED), (0xF0, 0xF0), (0xF3, 0xF3), (0xF8, 0xF8), (0xFA, 0xFA), (0xFD, 0xFD)];
const FR: Ranges = &[
    (0xE0, 0xE0), (0xE2, 0xE2), (0xE6, 0xEB), (0xEE, 0xEF), (0xF4, 0xF4), (0xF9, 0xF9),
    (0xFB, 0xFC), (0xFF, 0xFF), (0x153, 0x153),
];
const GA: Ranges = &[(0xE1, 0xE1), (0xE9, 0xE9), (0xED, 0xED), (0xF3, 0xF3), (0xFA, 0xFA)];
const HA: Ranges = &[(0x199, 0x199), (0x253, 0x253), (0x257, 0x257)];
const HR: Ranges = &[(0x107, 0x107), (0x10D, 0x10D), (0x111, 0x111), (0x161, 0x161), (0x17E, 0x17E)];
const HU: Ranges = &[(0xE1, 0xE1), (0xE9, 0xE9), (0xED, 0xED), (0xF3, 0xF3), (0xF6, 0xF6), (0xFA, 0xFA), (0xFC, 0xFC), (0x151, 0x151), (0x171, 0x171)];
const IS: Ranges = &[(0xE1, 0xE1), (0xE6, 0xE6), (0xE9, 0xE9), (0xED, 0xED), (0xF0, 0xF0), (0xF3, 0xF3), (0xF6, 0xF6), (0xFA, 0xFA), (0xFD, 0xFE)];
const IT: Ranges = &[(0xE0, 0xE0), (0xE8, 0xE9), (0xEC, 0xEC), (0xF2, 0xF2), (0xF9, 0xF9)];
const LT: Ranges = &[(0x105, 0x105), (0x10D, 0x10D), (0x117, 0x117), (0x119, 0x119), (0x12F, 0x12F), (0x161, 0x161), (0x16B, 0x16B), (0x173, 0x173), (0x17E, 0x17E)];
const LV: Ranges = &[(0x101, 0x101), (0x10D, 0x10D), (0x113, 0x113), (0x123, 0x123), (0x12B, 0x12B), (0x137, 0x137), (0x13C, 0x13C), (0x146, 0x146), (0x161, 0x161), (0x16B, 0x16B), (0x17E, 0x17E)];
const MACRON: Ranges = &[(0x101, 0x101), (0x113, 0x113), (0x12B, 0x12B), (0x14D, 0x14D), (0x16B, 0x16B)];
const MT: Ranges = &[(0x10B, 0x10B), (0x121, 0x121), (0x127, 0x127), (0x17C, 0x17C)];
const NL: Ranges = &[(0xEB, 0xEB), (0xEF, 0xEF)];
const PL: Ranges = &[(0xF3, 0xF3), (0x105, 0x105), (0x107, 0x107), (0x119, 0x119), (0x142, 0x142), (0x144, 0x144), (0x15B, 0x15B), (0x17A, 0x17A), (0x17C, 0x17C)];
const PT: Ranges = &[(0xE0, 0xE3), (0xE7, 0xE7), (0xE9, 0xEA), (0xED, 0xED), (0xF3, 0xF5), (0xFA, 0xFA)];
const RO: Ranges = &[(0xE2, 0xE2), (0xEE, 0xEE), (0x103, 0x103), (0x219, 0x219), (0x21B, 0x21B)];
const SE: Ranges = &[(0xE1, 0xE1), (0x10D, 0x10D), (0x111, 0x111), (0x14B, 0x14B), (0x161, 0x161), (0x167, 0x167), (0x17E, 0x17E)];
const SK: Ranges = &[(0xE1, 0xE1), (0xE4, 0xE4), (0xE9, 0xE9), (0xED, 0xED), (0xF3, 0xF4), (0xFA, 0xFA), (0xFD, 0xFD), (0x10D, 0x10D), (0x10F, 0x10F), (0x13A, 0x13A), (0x13E, 0x13E), (0x148, 0x148), (0x155, 0x155), (0x161, 0x161), (0x165, 0x165), (0x17E, 0x17E)];
const SL: Ranges = &[(0x10D, 0x10D), (0x161, 0x161), (0x17E, 0x17E)];
const SQ: Ranges = &[(0xE7, 0xE7), (0xEB, 0xEB)];
const TR: Ranges = &[(0xE7, 0xE7), (0xF6, 0xF6), (0xFC, 0xFC), (0x11F, 0x11F), (0x131, 0x131), (0x15F, 0x15F)];
const VI: Ranges = &[(0x103, 0x103), (0x111, 0x111), (0x1A1, 0x1A1), (0x1B0, 0x1B0), (0x1EA1, 0x1EF9)];
const YO: Ranges = &[(0x1EB9, 0x1EB9), (0x1ECD, 0x1ECD), (0x1E63, 0x1E63)];

const CYRILLIC: Ranges = &[(0x430, 0x44F)];
const BE: Ranges = &[(0x456, 0x456), (0x45E, 0x45E)];
const UK: Ranges = &[(0x454, 0x454), (0x456, 0x457), (0x491, 0x491)];
const SR: Ranges = &[(0x452, 0x452), (0x458, 0x45B), (0x45F, 0x45F)];
const KK: Ranges = &[(0x493, 0x493), (0x49B, 0x49B), (0x4A3, 0x4A3), (0x4AF, 0x4AF), (0x4B1, 0x4B1), (0x4BB, 0x4BB), (0x4D9, 0x4D9), (0x4E9, 0x4E9)];
const KY: Ranges = &[(0x4A3, 0x4A3), (0x4AF, 0x4AF), (0x4E9, 0x4E9)];
const TG: Ranges = &[(0x493, 0x493), (0x49B, 0x49B), (0x4B3, 0x4B3), (0x4B7, 0x4B7), (0x4E3, 0x4E3), (0x4EF, 0x4EF)];
const TT: Ranges = &[(0x497, 0x497), (0x4A3, 0x4A3), (0x4AF, 0x4AF), (0x4BB, 0x4BB), (0x4D9, 0x4D9), (0x4E9, 0x4E9)];
const MN: Ranges = &[(0x4AF, 0x4AF), (0x4E9, 0x4E9)];
const KU_CYRILLIC: Ranges = &[(0x4BB, 0x4BB), (0x4D9, 0x4D9), (0x4E9, 0x4E9), (0x51B, 0x51B), (0x51D, 0x51D)];
const KU_LATIN: Ranges = &[(0xE7, 0xE7), (0xEA, 0xEA), (0xEE, 0xEE), (0xFB, 0xFB), (0x15F, 0x15F)];

const GREEK: Ranges = &[(0x3B1, 0x3C9)];
const ARMENIAN: Ranges = &[(0x561, 0x586)];
const GEORGIAN: Ranges = &[(0x10D0, 0x10F0)];
const HEBREW: Ranges = &[(0x5D0, 0x5EA)];
const ARABIC: Ranges = &[(0x621, 0x63A), (0x641, 0x64A)];
const PERSIAN: Ranges = &[(0x67E, 0x67E), (0x686, 0x686), (0x698, 0x698), (0x6A9, 0x6A9), (0x6AF, 0x6AF), (0x6CC, 0x6CC)];
const KU_ARABIC: Ranges = &[(0x695, 0x695), (0x6B5, 0x6B5), (0x6C6, 0x6C6), (0x6CE, 0x6CE)];
const URDU: Ranges = &[(0x679, 0x679), (0x688, 0x688), (0x691, 0x691), (0x6BA, 0x6BA), (0x6C1, 0x6C1), (0x6D2, 0x6D2)];
const PASHTO: Ranges = &[(0x67C, 0x67C), (0x681, 0x681), (0x685, 0x685), (0x689, 0x689), (0x693, 0x693), (0x696, 0x696), (0x69A, 0x69A), (0x6BC, 0x6BC)];
const UYGHUR: Ranges = &[(0x6C7, 0x6C8), (0x6CB, 0x6CB), (0x6D0, 0x6D0), (0x6D5, 0x6D5)];
const SINDHI: Ranges = &[(0x67A, 0x67B), (0x67D, 0x67D), (0x683, 0x684), (0x687, 0x687), (0x68A, 0x68A), (0x68D, 0x68D)];
const SYRIAC: Ranges = &[(0x710, 0x72C)];
const DEVANAGARI: Ranges = &[(0x905, 0x914), (0x915, 0x939), (0x93E, 0x94D)];
const BENGALI: Ranges = &[(0x985, 0x98C), (0x98F, 0x990), (0x993, 0x9A8), (0x9AA, 0x9B0)];
const GURMUKHI: Ranges = &[(0xA05, 0xA0A), (0xA15, 0xA28), (0xA2A, 0xA30)];
const GUJARATI: Ranges = &[(0xA85, 0xA8B), (0xA95, 0xAA8), (0xAAA, 0xAB0)];
const ORIYA: Ranges = &[(0xB05, 0xB0C), (0xB15, 0xB28), (0xB2A, 0xB30)];
const TAMIL: Ranges = &[(0xB85, 0xB8A), (0xB95, 0xB95), (0xB99, 0xB9A), (0xBA4, 0xBA4), (0xBA8, 0xBAA), (0xBAE, 0xBB9)];
const TELUGU: Ranges = &[(0xC05, 0xC0C), (0xC15, 0xC28), (0xC2A, 0xC33)];
const KANNADA: Ranges = &[(0xC85, 0xC8C), (0xC95, 0xCA8), (0xCAA, 0xCB3)];
const MALAYALAM: Ranges = &[(0xD05, 0xD0C), (0xD15, 0xD28), (0xD2A, 0xD39)];
const SINHALA: Ranges = &[(0xD85, 0xD96), (0xD9A, 0xDB1), (0xDB3, 0xDBB)];
const THAI: Ranges = &[(0xE01, 0xE2E), (0xE30, 0xE3A)];
const LAO: Ranges = &[(0xE81, 0xE82), (0xE84, 0xE84), (0xE87, 0xE88), (0xE94, 0xE97)];
const TIBETAN: Ranges = &[(0xF40, 0xF47), (0xF49, 0xF69)];
const MYANMAR: Ranges = &[(0x1000, 0x1021)];
const ETHIOPIC: Ranges = &[(0x1200, 0x1206), (0x1208, 0x1246)];
const KHMER: Ranges = &[(0x1780, 0x17A2)];
const MONGOLIAN: Ranges = &[(0x1820, 0x1877)];
const SYLLABICS: Ranges = &[(0x1401, 0x1406), (0x140A, 0x140B), (0x142F, 0x1434)];
const KANA: Ranges = &[(0x3041, 0x3093), (0x30A1, 0x30F6), (0x4EBA, 0x4EBA), (0x65E5, 0x65E5), (0x672C, 0x672C)];
const HANGUL: Ranges = &[
    (0xAC00, 0xAC00), (0xB098, 0xB098), (0xB2E4, 0xB2E4), (0xB77C, 0xB77C), (0xB9C8, 0xB9C8),
    (0xBC14, 0xBC14), (0xC0AC, 0xC0AC), (0xC544, 0xC544), (0xC790, 0xC790), (0xCC28, 0xCC28),
    (0xCE74, 0xCE74), (0xD0C0, 0xD0C0), (0xD30C, 0xD30C), (0xD558, 0xD558),
];
const HAN_COMMON: Ranges = &[(0x4E00, 0x4E00), (0x662F, 0x662F), (0x7684, 0x7684)];
const HAN_SIMPLIFIED: Ranges = &[
    (0x4E2A, 0x4E2A), (0x4EEC, 0x4EEC), (0x4F1A, 0x4F1A), (0x56FD, 0x56FD), (0x5B66, 0x5B66),
    (0x5BF9, 0x5BF9), (0x65F6, 0x65F6), (0x6765, 0x6765), (0x8BF4, 0x8BF4), (0x8FD9, 0x8FD9),
];
const HAN_TRADITIONAL: Ranges = &[
    (0x4F86, 0x4F86), (0x500B, 0x500B), (0x5011, 0x5011), (0x570B, 0x570B), (0x5B78, 0x5B78),
    (0x5C0D, 0x5C0D), (0x6642, 0x6642), (0x6703, 0x6703), (0x8AAA, 0x8AAA), (0x9019, 0x9019),
];
const HAN_CANTONESE: Ranges = &[(0x4FC2, 0x4FC2), (0x5605, 0x5605), (0x5681, 0x5681)];

/// The orthography database, sorted by language tag.
#[rustfmt::skip]
pub const ORTHOGRAPHIES: &[Orthography] = &[
    Orthography { lang: "aa", ranges: &[LATIN] },
    Orthography { lang: "af", ranges: &[LATIN, AF] },
    Orthography { lang: "am", ranges: &[ETHIOPIC] },
    Orthography { lang: "ar", ranges: &[ARABIC] },
    Orthography { lang: "as", ranges: &[BENGALI] },
    Orthography { lang: "ast", ranges: &[LATIN, ES] },
    Orthography { lang: "az-az", ranges: &[LATIN, AZ] },
    Orthography { lang: "be", ranges: &[CYRILLIC, BE] },
    Orthography { lang: "bg", ranges: &[CYRILLIC] },
    Orthography { lang: "bn", ranges: &[BENGALI] },
    Orthography { lang: "bo", ranges: &[TIBETAN] },
    Orthography { lang: "br", ranges: &[LATIN] },
    Orthography { lang: "bs", ranges: &[LATIN, HR] },
    Orthography { lang: "ca", ranges: &[LATIN, CA] },
    Orthography { lang: "ch", ranges: &[LATIN] },
    Orthography { lang: "co", ranges: &[LATIN] },
    Orthography { lang: "cs", ranges: &[LATIN, CS] },
    Orthography { lang: "cy", ranges: &[LATIN, CY] },
    Orthography { lang: "da", ranges: &[LATIN, NORDIC] },
    Orthography { lang: "de", ranges: &[LATIN, DE] },
    Orthography { lang: "dz", ranges: &[TIBETAN] },
    Orthography { lang: "el", ranges: &[GREEK] },
    Orthography { lang: "en", ranges: &[LATIN] },
    Orthography { lang: "eo", ranges: &[LATIN, EO] },
    Orthography { lang: "es", ranges: &[LATIN, ES] },
    Orthography { lang: "et", ranges: &[LATIN, ET] },
    Orthography { lang: "eu", ranges: &[LATIN] },
    Orthography { lang: "fa", ranges: &[ARABIC, PERSIAN] },
    Orthography { lang: "fi", ranges: &[LATIN, FI] },
    Orthography { lang: "fil", ranges: &[LATIN] },
    Orthography { lang: "fj", ranges: &[LATIN] },
    Orthography { lang: "fo", ranges: &[LATIN, FO] },
    Orthography { lang: "fr", ranges: &[LATIN, FR] },
    Orthography { lang: "fy", ranges: &[LATIN] },
    Orthography { lang: "ga", ranges: &[LATIN, GA] },
    Orthography { lang: "gd", ranges: &[LATIN, GA] },
    Orthography { lang: "gl", ranges: &[LATIN, ES] },
    Orthography { lang: "gu", ranges: &[GUJARATI] },
    Orthography { lang: "gv", ranges: &[LATIN] },
    Orthography { lang: "ha", ranges: &[LATIN, HA] },
    Orthography { lang: "haw", ranges: &[LATIN, MACRON] },
    Orthography { lang: "he", ranges: &[HEBREW] },
    Orthography { lang: "hi", ranges: &[DEVANAGARI] },
    Orthography { lang: "hr", ranges: &[LATIN, HR] },
    Orthography { lang: "hu", ranges: &[LATIN, HU] },
    Orthography { lang: "hy", ranges: &[ARMENIAN] },
    Orthography { lang: "id", ranges: &[LATIN] },
    Orthography { lang: "ig", ranges: &[LATIN] },
    Orthography { lang: "is", ranges: &[LATIN, IS] },
    Orthography { lang: "it", ranges: &[LATIN, IT] },
    Orthography { lang: "iu", ranges: &[SYLLABICS] },
    Orthography { lang: "ja", ranges: &[KANA] },
    Orthography { lang: "ka", ranges: &[GEORGIAN] },
    Orthography { lang: "kk", ranges: &[CYRILLIC, KK] },
    Orthography { lang: "km", ranges: &[KHMER] },
    Orthography { lang: "kn", ranges: &[KANNADA] },
    Orthography { lang: "ko", ranges: &[HANGUL] },
    Orthography { lang: "ku-am", ranges: &[CYRILLIC, KU_CYRILLIC] },
    Orthography { lang: "ku-iq", ranges: &[ARABIC, PERSIAN, KU_ARABIC] },
    Orthography { lang: "ku-ir", ranges: &[ARABIC, PERSIAN, KU_ARABIC] },
    Orthography { lang: "ku-tr", ranges: &[LATIN, KU_LATIN] },
    Orthography { lang: "ky", ranges: &[CYRILLIC, KY] },
    Orthography { lang: "la", ranges: &[LATIN] },
    Orthography { lang: "lb", ranges: &[LATIN, DE] },
    Orthography { lang: "lo", ranges: &[LAO] },
    Orthography { lang: "lt", ranges: &[LATIN, LT] },
    Orthography { lang: "lv", ranges: &[LATIN, LV] },
    Orthography { lang: "mg", ranges: &[LATIN] },
    Orthography { lang: "mi", ranges: &[LATIN, MACRON] },
    Orthography { lang: "mk", ranges: &[CYRILLIC, SR] },
    Orthography { lang: "ml", ranges: &[MALAYALAM] },
    Orthography { lang: "mn-cn", ranges: &[MONGOLIAN] },
    Orthography { lang: "mn-mn", ranges: &[CYRILLIC, MN] },
    Orthography { lang: "mr", ranges: &[DEVANAGARI] },
    Orthography { lang: "ms", ranges: &[LATIN] },
    Orthography { lang: "mt", ranges: &[LATIN, MT] },
    Orthography { lang: "my", ranges: &[MYANMAR] },
    Orthography { lang: "nb", ranges: &[LATIN, NORDIC] },
    Orthography { lang: "ne", ranges: &[DEVANAGARI] },
    Orthography { lang: "nl", ranges: &[LATIN, NL] },
    Orthography { lang: "nn", ranges: &[LATIN, NORDIC] },
    Orthography { lang: "no", ranges: &[LATIN, NORDIC] },
    Orthography { lang: "oc", ranges: &[LATIN, CA] },
    Orthography { lang: "or", ranges: &[ORIYA] },
    Orthography { lang: "pa", ranges: &[GURMUKHI] },
    Orthography { lang: "pap-an", ranges: &[LATIN, ES] },
    Orthography { lang: "pap-aw", ranges: &[LATIN, ES] },
    Orthography { lang: "pl", ranges: &[LATIN, PL] },
    Orthography { lang: "ps-af", ranges: &[ARABIC, PERSIAN, PASHTO] },
    Orthography { lang: "ps-pk", ranges: &[ARABIC, PASHTO] },
    Orthography { lang: "pt", ranges: &[LATIN, PT] },
    Orthography { lang: "qu", ranges: &[LATIN] },
    Orthography { lang: "rm", ranges: &[LATIN] },
    Orthography { lang: "ro", ranges: &[LATIN, RO] },
    Orthography { lang: "ru", ranges: &[CYRILLIC] },
    Orthography { lang: "rw", ranges: &[LATIN] },
    Orthography { lang: "sa", ranges: &[DEVANAGARI] },
    Orthography { lang: "sd", ranges: &[ARABIC, SINDHI] },
    Orthography { lang: "se", ranges: &[LATIN, SE] },
    Orthography { lang: "si", ranges: &[SINHALA] },
    Orthography { lang: "sk", ranges: &[LATIN, SK] },
    Orthography { lang: "sl", ranges: &[LATIN, SL] },
    Orthography { lang: "sm", ranges: &[LATIN, MACRON] },
    Orthography { lang: "so", ranges: &[LATIN] },
    Orthography { lang: "sq", ranges: &[LATIN, SQ] },
    Orthography { lang: "sr", ranges: &[CYRILLIC, SR] },
    Orthography { lang: "sv", ranges: &[LATIN, FI] },
    Orthography { lang: "sw", ranges: &[LATIN] },
    Orthography { lang: "syr", ranges: &[SYRIAC] },
    Orthography { lang: "ta", ranges: &[TAMIL] },
    Orthography { lang: "te", ranges: &[TELUGU] },
    Orthography { lang: "tg", ranges: &[CYRILLIC, TG] },
    Orthography { lang: "th", ranges: &[THAI] },
    Orthography { lang: "ti-er", ranges: &[ETHIOPIC] },
    Orthography { lang: "ti-et", ranges: &[ETHIOPIC] },
    Orthography { lang: "tk", ranges: &[LATIN, TR] },
    Orthography { lang: "tl", ranges: &[LATIN] },
    Orthography { lang: "to", ranges: &[LATIN, MACRON] },
    Orthography { lang: "tr", ranges: &[LATIN, TR] },
    Orthography { lang: "tt", ranges: &[CYRILLIC, TT] },
    Orthography { lang: "ug", ranges: &[ARABIC, UYGHUR] },
    Orthography { lang: "uk", ranges: &[CYRILLIC, UK] },
    Orthography { lang: "ur", ranges: &[ARABIC, PERSIAN, URDU] },
    Orthography { lang: "uz", ranges: &[LATIN] },
    Orthography { lang: "vi", ranges: &[LATIN, VI] },
    Orthography { lang: "wa", ranges: &[LATIN, FR] },
    Orthography { lang: "xh", ranges: &[LATIN] },
    Orthography { lang: "yi", ranges: &[HEBREW] },
    Orthography { lang: "yo", ranges: &[LATIN, YO] },
    Orthography { lang: "zh-cn", ranges: &[HAN_COMMON, HAN_SIMPLIFIED] },
    Orthography { lang: "zh-hk", ranges: &[HAN_COMMON, HAN_TRADITIONAL, HAN_CANTONESE] },
    Orthography { lang: "zh-mo", ranges: &[HAN_COMMON, HAN_TRADITIONAL, HAN_CANTONESE] },
    Orthography { lang: "zh-sg", ranges: &[HAN_COMMON, HAN_SIMPLIFIED] },
    Orthography { lang: "zh-tw", ranges: &[HAN_COMMON, HAN_TRADITIONAL] },
    Orthography { lang: "zu", ranges: &[LATIN] },
];

/// Languages that a font may claim exclusively through its OS/2 code page
/// bits, keyed by bit number.
pub const CODE_PAGE_LANGS: [(u8, &str); 4] = [(17, "ja"), (18, "zh-cn"), (19, "ko"), (20, "zh-tw")];

/// Returns the database index of a language tag (case-insensitive).
pub fn index_of(lang: &str) -> Option<usize> {
    ORTHOGRAPHIES
        .binary_search_by(|orth| cmp_ignore_case(orth.lang, lang))
        .ok()
}

/// Returns true if `lang` can be claimed exclusively by a code page bit.
pub fn is_exclusive(lang: &str) -> bool {
    CODE_PAGE_LANGS
        .iter()
        .any(|(_, l)| l.eq_ignore_ascii_case(lang))
}

fn cmp_ignore_case(a: &str, b: &str) -> core::cmp::Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

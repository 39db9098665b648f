//! Style keywords and advance width classification.

use crate::constants::*;
use crate::text::find_ignore_blanks_and_case;

/// A style keyword and the value it implies. A leading `<` restricts the
/// match to the start of a word.
type Keyword = (&'static str, i32);

// Longer keywords come before the shorter ones they contain.
const WEIGHTS: &[Keyword] = &[
    ("thin", WEIGHT_THIN),
    ("extralight", WEIGHT_EXTRALIGHT),
    ("ultralight", WEIGHT_EXTRALIGHT),
    ("demilight", WEIGHT_DEMILIGHT),
    ("semilight", WEIGHT_DEMILIGHT),
    ("light", WEIGHT_LIGHT),
    ("book", WEIGHT_BOOK),
    ("regular", WEIGHT_REGULAR),
    ("normal", WEIGHT_REGULAR),
    ("medium", WEIGHT_MEDIUM),
    ("demibold", WEIGHT_DEMIBOLD),
    ("demi", WEIGHT_DEMIBOLD),
    ("semibold", WEIGHT_DEMIBOLD),
    ("extrabold", WEIGHT_EXTRABOLD),
    ("superbold", WEIGHT_EXTRABOLD),
    ("ultrabold", WEIGHT_EXTRABOLD),
    ("bold", WEIGHT_BOLD),
    ("ultrablack", WEIGHT_EXTRABLACK),
    ("superblack", WEIGHT_EXTRABLACK),
    ("extrablack", WEIGHT_EXTRABLACK),
    ("<ultra", WEIGHT_EXTRABOLD),
    ("black", WEIGHT_BLACK),
    ("heavy", WEIGHT_BLACK),
];

const WIDTHS: &[Keyword] = &[
    ("ultracondensed", WIDTH_ULTRACONDENSED),
    ("extracondensed", WIDTH_EXTRACONDENSED),
    ("semicondensed", WIDTH_SEMICONDENSED),
    ("condensed", WIDTH_CONDENSED),
    ("normal", WIDTH_NORMAL),
    ("semiexpanded", WIDTH_SEMIEXPANDED),
    ("extraexpanded", WIDTH_EXTRAEXPANDED),
    ("ultraexpanded", WIDTH_ULTRAEXPANDED),
    ("expanded", WIDTH_EXPANDED),
    ("extended", WIDTH_EXPANDED),
];

const SLANTS: &[Keyword] = &[
    ("italic", SLANT_ITALIC),
    ("kursiv", SLANT_ITALIC),
    ("oblique", SLANT_OBLIQUE),
];

const DECORATIVE: &[Keyword] = &[
    ("shadow", 1),
    ("caps", 1),
    ("antiqua", 1),
    ("romansc", 1),
    ("embosed", 1),
    ("dunhill", 1),
];

/// True if `word` appears as a whole word of `haystack`, ignoring case.
fn contains_word(haystack: &str, word: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let word = word.to_lowercase();
    let boundary = |c: Option<char>| c.map_or(true, |c| !c.is_ascii_alphanumeric());
    haystack.match_indices(&word).any(|(pos, m)| {
        boundary(haystack[..pos].chars().next_back())
            && boundary(haystack[pos + m.len()..].chars().next())
    })
}

fn lookup(style: &str, table: &[Keyword]) -> Option<i32> {
    table.iter().find_map(|(keyword, value)| {
        let found = match keyword.strip_prefix('<') {
            Some(word) => contains_word(style, word),
            None => find_ignore_blanks_and_case(style, keyword).is_some(),
        };
        found.then_some(*value)
    })
}

pub fn weight(style: &str) -> Option<i32> {
    lookup(style, WEIGHTS)
}

pub fn width(style: &str) -> Option<i32> {
    lookup(style, WIDTHS)
}

pub fn slant(style: &str) -> Option<i32> {
    lookup(style, SLANTS)
}

pub fn is_decorative(style: &str) -> bool {
    lookup(style, DECORATIVE).is_some()
}

/// Width for a BDF `RELATIVE_SETWIDTH` value.
pub fn relative_setwidth(value: i64) -> i32 {
    match value {
        i64::MIN..=10 => WIDTH_ULTRACONDENSED,
        11..=20 => WIDTH_EXTRACONDENSED,
        21..=30 => WIDTH_CONDENSED,
        31..=40 => WIDTH_SEMICONDENSED,
        41..=50 => WIDTH_NORMAL,
        51..=60 => WIDTH_SEMIEXPANDED,
        61..=70 => WIDTH_EXPANDED,
        71..=80 => WIDTH_EXTRAEXPANDED,
        _ => WIDTH_ULTRAEXPANDED,
    }
}

fn approx_eq(a: u16, b: u16) -> bool {
    let (a, b) = (a as i32, b as i32);
    (a - b).abs() * 33 <= a.max(b)
}

/// Classifies advance widths as `MONO`, `DUAL` or `PROPORTIONAL`.
///
/// Zero advances are ignored and the scan stops at the third distinct
/// advance.
pub fn spacing(advances: impl IntoIterator<Item = u16>) -> i32 {
    let mut seen: Vec<u16> = Vec::with_capacity(3);
    for advance in advances {
        if advance == 0 || seen.iter().any(|a| approx_eq(*a, advance)) {
            continue;
        }
        seen.push(advance);
        if seen.len() == 3 {
            break;
        }
    }
    match seen[..] {
        [] | [_] => MONO,
        [a, b] if approx_eq(a.min(b).saturating_mul(2), a.max(b)) => DUAL,
        _ => PROPORTIONAL,
    }
}

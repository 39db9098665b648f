//! Language sets and language tag comparison.

mod default;
mod orth;

pub use default::{default_langs, langs_from_env, normalize_lang};
pub use orth::{Orthography, CODE_PAGE_LANGS, ORTHOGRAPHIES};

use super::charset::Charset;
use core::fmt;
use std::collections::BTreeSet;

/// Result of comparing language tags.
///
/// Variants are ordered from best to worst so the best of several results is
/// the minimum.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LangResult {
    Equal = 0,
    /// Same base language, different territory.
    DifferentCountry = 1,
    DifferentLang = 2,
}

/// Compares two language tags.
///
/// Tags are compared case-insensitively. Tags sharing the part before the
/// first `-` differ only by country.
pub fn lang_compare(a: &str, b: &str) -> LangResult {
    if a.eq_ignore_ascii_case(b) {
        return LangResult::Equal;
    }
    if base(a).eq_ignore_ascii_case(base(b)) {
        LangResult::DifferentCountry
    } else {
        LangResult::DifferentLang
    }
}

/// Returns true if `outer` is `inner` or a base language of it.
fn lang_contains(outer: &str, inner: &str) -> bool {
    if outer.eq_ignore_ascii_case(inner) {
        return true;
    }
    inner.len() > outer.len()
        && inner.as_bytes()[outer.len()] == b'-'
        && inner[..outer.len()].eq_ignore_ascii_case(outer)
}

fn base(lang: &str) -> &str {
    lang.split('-').next().unwrap_or(lang)
}

const WORDS: usize = (ORTHOGRAPHIES.len() + 31) / 32;

/// Set of languages.
///
/// Languages known to the orthography database are kept as a bitset;
/// anything else is stored as a lowercase string.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Langset {
    bits: [u32; WORDS],
    extras: BTreeSet<String>,
}

impl Langset {
    /// Number of bitset words in the serialized form.
    pub const WORDS: usize = WORDS;

    /// Creates an empty language set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a language tag.
    pub fn add(&mut self, lang: &str) {
        match orth::index_of(lang) {
            Some(idx) => self.bits[idx / 32] |= 1 << (idx % 32),
            None => {
                self.extras.insert(lang.to_ascii_lowercase());
            }
        }
    }

    /// Removes a language tag.
    pub fn del(&mut self, lang: &str) {
        match orth::index_of(lang) {
            Some(idx) => self.bits[idx / 32] &= !(1 << (idx % 32)),
            None => {
                self.extras.remove(&lang.to_ascii_lowercase());
            }
        }
    }

    /// Returns true if the set holds exactly `lang`.
    pub fn contains_lang(&self, lang: &str) -> bool {
        match orth::index_of(lang) {
            Some(idx) => self.bits[idx / 32] & (1 << (idx % 32)) != 0,
            None => self.extras.contains(&lang.to_ascii_lowercase()),
        }
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|w| *w == 0) && self.extras.is_empty()
    }

    /// Returns an iterator over the languages: database tags in table order
    /// followed by the extra tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        ORTHOGRAPHIES
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.bits[idx / 32] & (1 << (idx % 32)) != 0)
            .map(|(_, orth)| orth.lang)
            .chain(self.extras.iter().map(|s| s.as_str()))
    }

    /// Returns the best result of comparing `lang` with each language of
    /// the set.
    pub fn has_lang(&self, lang: &str) -> LangResult {
        let mut best = LangResult::DifferentLang;
        for l in self.iter() {
            best = best.min(lang_compare(l, lang));
            if best == LangResult::Equal {
                break;
            }
        }
        best
    }

    /// Returns the best result over all pairs of languages of both sets.
    ///
    /// Two empty sets are equal.
    pub fn compare(&self, other: &Self) -> LangResult {
        if self.is_empty() && other.is_empty() {
            return LangResult::Equal;
        }
        let mut best = LangResult::DifferentLang;
        for lang in other.iter() {
            best = best.min(self.has_lang(lang));
            if best == LangResult::Equal {
                break;
            }
        }
        best
    }

    /// Returns true if every language of `other` is present in `self`,
    /// either exactly or through its base language.
    pub fn includes(&self, other: &Self) -> bool {
        other
            .iter()
            .all(|inner| self.iter().any(|outer| lang_contains(outer, inner)))
    }

    /// Returns the languages in either set.
    pub fn union(&self, other: &Self) -> Self {
        let mut bits = self.bits;
        for (a, b) in bits.iter_mut().zip(&other.bits) {
            *a |= b;
        }
        Self {
            bits,
            extras: self.extras.union(&other.extras).cloned().collect(),
        }
    }

    /// Returns the languages of `self` that are not in `other`.
    pub fn subtract(&self, other: &Self) -> Self {
        let mut bits = self.bits;
        for (a, b) in bits.iter_mut().zip(&other.bits) {
            *a &= !b;
        }
        Self {
            bits,
            extras: self.extras.difference(&other.extras).cloned().collect(),
        }
    }

    /// Returns true if both sets hold the same languages.
    pub fn equal(&self, other: &Self) -> bool {
        self == other
    }

    /// Returns a byte representation that depends only on the set contents.
    pub fn hash(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(WORDS * 4);
        for word in &self.bits {
            out.extend_from_slice(&word.to_le_bytes());
        }
        for extra in &self.extras {
            out.extend_from_slice(extra.as_bytes());
            out.push(0);
        }
        out
    }

    /// Returns the raw bitset over the orthography database.
    pub fn bits(&self) -> &[u32] {
        &self.bits
    }

    /// Returns the languages that are not in the orthography database.
    pub fn extras(&self) -> impl Iterator<Item = &str> + '_ {
        self.extras.iter().map(|s| s.as_str())
    }

    /// Creates a set from raw parts. Bits beyond the database are dropped.
    pub fn from_parts(words: &[u32], extras: impl IntoIterator<Item = String>) -> Self {
        let mut set = Self::new();
        for (dst, src) in set.bits.iter_mut().zip(words) {
            *dst = *src;
        }
        let tail = ORTHOGRAPHIES.len() % 32;
        if tail != 0 {
            set.bits[WORDS - 1] &= (1 << tail) - 1;
        }
        for extra in extras {
            set.add(&extra);
        }
        set
    }

    /// Computes the languages whose orthography is fully covered by
    /// `charset`.
    ///
    /// When `exclusive` names one of the code page languages, the other code
    /// page languages are not considered.
    pub fn from_charset(charset: &Charset, exclusive: Option<&str>) -> Self {
        let mut set = Self::new();
        for (idx, orth) in ORTHOGRAPHIES.iter().enumerate() {
            if let Some(exclusive) = exclusive {
                if orth::is_exclusive(orth.lang) && !orth.lang.eq_ignore_ascii_case(exclusive) {
                    continue;
                }
            }
            if orth.chars().all(|ch| charset.has_char(ch)) {
                set.bits[idx / 32] |= 1 << (idx % 32);
            }
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for Langset {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = Self::new();
        for lang in iter {
            set.add(lang);
        }
        set
    }
}

impl fmt::Display for Langset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lang) in self.iter().enumerate() {
            if i != 0 {
                f.write_str("|")?;
            }
            f.write_str(lang)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(langs: &[&str]) -> Langset {
        langs.iter().copied().collect()
    }

    #[test]
    fn tag_compare() {
        assert_eq!(lang_compare("en", "EN"), LangResult::Equal);
        assert_eq!(lang_compare("en-us", "en-gb"), LangResult::DifferentCountry);
        assert_eq!(lang_compare("en", "en-gb"), LangResult::DifferentCountry);
        assert_eq!(lang_compare("en", "fr"), LangResult::DifferentLang);
    }

    #[test]
    fn territories_of_one_language() {
        assert_eq!(
            set(&["ku-am"]).compare(&set(&["ku-iq"])),
            LangResult::DifferentCountry
        );
        assert_eq!(
            set(&["pap-an"]).compare(&set(&["pap-aw"])),
            LangResult::DifferentCountry
        );
        assert_eq!(
            set(&["zh-cn"]).compare(&set(&["zh-tw"])),
            LangResult::DifferentCountry
        );
    }

    #[test]
    fn compare_takes_best_pair() {
        let a = set(&["fr", "de", "en-us"]);
        assert_eq!(a.compare(&set(&["en-gb"])), LangResult::DifferentCountry);
        assert_eq!(a.compare(&set(&["ja", "de"])), LangResult::Equal);
        assert_eq!(a.compare(&set(&["ja"])), LangResult::DifferentLang);
        for l in [a.clone(), set(&["x-klingon"]), Langset::new()] {
            assert_eq!(l.compare(&l), LangResult::Equal);
        }
    }

    #[test]
    fn extras_are_case_insensitive() {
        let mut l = Langset::new();
        l.add("X-Klingon");
        assert!(l.contains_lang("x-klingon"));
        assert!(!l.contains_lang("EN"));
        l.add("EN");
        assert!(l.contains_lang("en"));
        assert_eq!(l.to_string(), "en|x-klingon");
        l.del("x-KLINGON");
        assert_eq!(l.to_string(), "en");
    }

    #[test]
    fn inclusion_through_base_language() {
        let a = set(&["en", "fr"]);
        assert!(a.includes(&set(&["en-us"])));
        assert!(a.includes(&set(&["fr", "en"])));
        assert!(!a.includes(&set(&["de"])));
        assert!(!set(&["en-us"]).includes(&set(&["en"])));
        assert!(!set(&["e"]).includes(&set(&["en"])));
    }

    #[test]
    fn set_algebra() {
        let a = set(&["en", "fr", "x-foo"]);
        let b = set(&["fr", "x-foo", "ja"]);
        assert_eq!(a.union(&b), set(&["en", "fr", "ja", "x-foo"]));
        assert_eq!(a.subtract(&b), set(&["en"]));
        assert!(a.union(&b).includes(&a));
        assert_ne!(a.hash(), b.hash());
        assert_eq!(a.hash(), set(&["x-foo", "fr", "en"]).hash());
    }

    #[test]
    fn coverage() {
        let mut cs: Charset = (0x41..=0x5A).chain(0x61..=0x7A).collect();
        let langs = Langset::from_charset(&cs, None);
        assert!(langs.contains_lang("en"));
        assert!(!langs.contains_lang("fr"));
        assert!(!langs.contains_lang("ja"));
        for ch in [0xE0, 0xE2, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xEB, 0xEE, 0xEF] {
            cs.add_char(ch);
        }
        for ch in [0xF4, 0xF9, 0xFB, 0xFC, 0xFF, 0x153] {
            cs.add_char(ch);
        }
        assert!(Langset::from_charset(&cs, None).contains_lang("fr"));
    }

    #[test]
    fn exclusive_code_page_language() {
        let kana = ORTHOGRAPHIES.iter().find(|o| o.lang == "ja").unwrap();
        let zh = ORTHOGRAPHIES.iter().find(|o| o.lang == "zh-cn").unwrap();
        let cs: Charset = kana.chars().chain(zh.chars()).collect();
        let all = Langset::from_charset(&cs, None);
        assert!(all.contains_lang("ja") && all.contains_lang("zh-cn"));
        let only = Langset::from_charset(&cs, Some("ja"));
        assert!(only.contains_lang("ja"));
        assert!(!only.contains_lang("zh-cn"));
    }

    #[test]
    fn parts_round_trip() {
        let a = set(&["en", "zu", "x-foo"]);
        let b = Langset::from_parts(a.bits(), a.extras().map(String::from));
        assert_eq!(a, b);
    }
}

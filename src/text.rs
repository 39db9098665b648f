//! Case and blank insensitive string comparisons.

fn fold(s: &str, ignore_blanks: bool) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(move |ch| !(ignore_blanks && *ch == ' '))
        .flat_map(char::to_lowercase)
}

/// Returns a folded copy of `s` suitable as a map key.
pub fn fold_key(s: &str, ignore_blanks: bool) -> String {
    fold(s, ignore_blanks).collect()
}

pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    fold(a, false).eq(fold(b, false))
}

pub fn eq_ignore_blanks_and_case(a: &str, b: &str) -> bool {
    fold(a, true).eq(fold(b, true))
}

/// Returns true if `needle` occurs in `haystack`, ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    fold_key(haystack, false).contains(&fold_key(needle, false))
}

/// Returns the byte offset just past the first occurrence of `needle` in
/// `haystack`, ignoring case and blanks in both strings.
///
/// Offsets refer to the folded haystack. `None` if there is no match.
pub fn find_ignore_blanks_and_case(haystack: &str, needle: &str) -> Option<usize> {
    let h = fold_key(haystack, true);
    let n = fold_key(needle, true);
    h.find(&n).map(|pos| pos + n.len())
}

//! Default languages from the process environment.

use icu_locid::LanguageIdentifier;
use once_cell::sync::OnceCell;

static DEFAULT_LANGS: OnceCell<Vec<String>> = OnceCell::new();

/// Returns the default languages of the process.
///
/// Computed once from `FC_LANG`, `LC_ALL`, `LC_CTYPE` and `LANG`.
pub fn default_langs() -> &'static [String] {
    DEFAULT_LANGS.get_or_init(|| {
        let langs = langs_from_env(|name| std::env::var(name).ok());
        log::debug!("default languages: {langs:?}");
        langs
    })
}

/// Computes default languages using `get` to read environment variables.
///
/// `FC_LANG` takes precedence. Otherwise the first non-empty locale variable
/// is used. Values are colon-separated lists of locale names. Falls back to
/// `en` when nothing usable is found.
pub fn langs_from_env(get: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let mut langs: Vec<String> = Vec::new();
    for var in ["FC_LANG", "LC_ALL", "LC_CTYPE", "LANG"] {
        let Some(value) = get(var).filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        for lang in value.split(':').filter_map(normalize_lang) {
            if !langs.contains(&lang) {
                langs.push(lang);
            }
        }
        if !langs.is_empty() {
            break;
        }
    }
    if langs.is_empty() {
        langs.push("en".into());
    }
    langs
}

/// Normalizes a locale name into a lowercase language tag.
///
/// The codeset and modifier are stripped, `_` becomes `-`, and the `C` and
/// `POSIX` locales map to `en`. Returns `None` for empty names.
pub fn normalize_lang(name: &str) -> Option<String> {
    let name = name.trim();
    let end = name.find(|c: char| c == '.' || c == '@').unwrap_or(name.len());
    let name = &name[..end];
    if name.is_empty() {
        return None;
    }
    if name == "C" || name == "POSIX" {
        return Some("en".into());
    }
    let name = name.replace('_', "-");
    match LanguageIdentifier::try_from_bytes(name.as_bytes()) {
        Ok(id) => {
            let mut tag = id.language.as_str().to_ascii_lowercase();
            if let Some(region) = id.region {
                tag.push('-');
                tag.push_str(&region.as_str().to_ascii_lowercase());
            }
            Some(tag)
        }
        Err(_) => Some(name.to_ascii_lowercase()),
    }
}

//! Scoring fonts against a query.

use super::config::Config;
use super::constants;
use super::fontset::FontSet;
use super::lang::{lang_compare, LangResult};
use super::list::{ValueElt, ValueList};
use super::object::Object;
use super::pattern::Pattern;
use super::rule::MatchKind;
use super::text;
use super::value::{Binding, BoolValue, Value};
use core::cmp::Ordering;

/// Score slots in decreasing order of importance.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(usize)]
enum Priority {
    File,
    FontFormat,
    Variable,
    Scalable,
    Color,
    Foundry,
    Charset,
    FamilyStrong,
    PostscriptNameStrong,
    Lang,
    FamilyWeak,
    PostscriptNameWeak,
    Symbol,
    Spacing,
    Size,
    PixelSize,
    Style,
    Slant,
    Weight,
    Width,
    FontHasHint,
    Decorative,
    Antialias,
    Rasterizer,
    Outline,
    Order,
    FontVersion,
}

const PRIORITY_COUNT: usize = Priority::FontVersion as usize + 1;

/// Distance between a query value and a font value, along with the font
/// value that best satisfies the query.
type CompareFn = fn(&Value, &Value) -> Option<(f64, Value)>;

struct Matcher {
    compare: CompareFn,
    strong: Priority,
    weak: Priority,
}

fn matcher(object: Object) -> Option<Matcher> {
    use Priority as P;
    let (compare, strong, weak): (CompareFn, _, _) = match object {
        Object::FILE => (compare_filename, P::File, P::File),
        Object::FONT_FORMAT => (compare_string, P::FontFormat, P::FontFormat),
        Object::VARIABLE => (compare_bool, P::Variable, P::Variable),
        Object::SCALABLE => (compare_bool, P::Scalable, P::Scalable),
        Object::COLOR => (compare_bool, P::Color, P::Color),
        Object::FOUNDRY => (compare_string, P::Foundry, P::Foundry),
        Object::CHARSET => (compare_charset, P::Charset, P::Charset),
        Object::FAMILY => (compare_family, P::FamilyStrong, P::FamilyWeak),
        Object::POSTSCRIPT_NAME => (
            compare_postscript,
            P::PostscriptNameStrong,
            P::PostscriptNameWeak,
        ),
        Object::LANG => (compare_lang, P::Lang, P::Lang),
        Object::SYMBOL => (compare_bool, P::Symbol, P::Symbol),
        Object::SPACING => (compare_number, P::Spacing, P::Spacing),
        Object::SIZE => (compare_range, P::Size, P::Size),
        Object::PIXEL_SIZE => (compare_range, P::PixelSize, P::PixelSize),
        Object::STYLE => (compare_string, P::Style, P::Style),
        Object::SLANT => (compare_number, P::Slant, P::Slant),
        Object::WEIGHT => (compare_range, P::Weight, P::Weight),
        Object::WIDTH => (compare_range, P::Width, P::Width),
        Object::FONT_HAS_HINT => (compare_bool, P::FontHasHint, P::FontHasHint),
        Object::DECORATIVE => (compare_bool, P::Decorative, P::Decorative),
        Object::ANTIALIAS => (compare_bool, P::Antialias, P::Antialias),
        Object::RASTERIZER => (compare_string, P::Rasterizer, P::Rasterizer),
        Object::OUTLINE => (compare_bool, P::Outline, P::Outline),
        Object::ORDER => (compare_number, P::Order, P::Order),
        Object::FONT_VERSION => (compare_number, P::FontVersion, P::FontVersion),
        _ => return None,
    };
    Some(Matcher {
        compare,
        strong,
        weak,
    })
}

fn compare_number(a: &Value, b: &Value) -> Option<(f64, Value)> {
    let (x, y) = (a.as_f64()?, b.as_f64()?);
    Some(((y - x).abs(), b.clone()))
}

fn compare_string(a: &Value, b: &Value) -> Option<(f64, Value)> {
    let d = if text::eq_ignore_case(a.as_str()?, b.as_str()?) {
        0.0
    } else {
        1.0
    };
    Some((d, b.clone()))
}

fn compare_family(a: &Value, b: &Value) -> Option<(f64, Value)> {
    let d = if text::eq_ignore_blanks_and_case(a.as_str()?, b.as_str()?) {
        0.0
    } else {
        1.0
    };
    Some((d, b.clone()))
}

fn compare_filename(a: &Value, b: &Value) -> Option<(f64, Value)> {
    let (x, y) = (a.as_str()?, b.as_str()?);
    let d = if x == y {
        0.0
    } else if text::eq_ignore_case(x, y) {
        1.0
    } else if glob_match(x.as_bytes(), y.as_bytes()) {
        2.0
    } else {
        3.0
    };
    Some((d, b.clone()))
}

/// Matches `name` against a pattern with `*` and `?` wildcards.
fn glob_match(glob: &[u8], name: &[u8]) -> bool {
    match glob.split_first() {
        None => name.is_empty(),
        Some((b'*', rest)) => (0..=name.len()).any(|i| glob_match(rest, &name[i..])),
        Some((b'?', rest)) => !name.is_empty() && glob_match(rest, &name[1..]),
        Some((c, rest)) => name.first() == Some(c) && glob_match(rest, &name[1..]),
    }
}

/// Fraction of the query name that does not match the font name. Case is
/// ignored and spaces and hyphens are skipped.
fn compare_postscript(a: &Value, b: &Value) -> Option<(f64, Value)> {
    let (x, y) = (a.as_str()?, b.as_str()?);
    if x.is_empty() {
        return Some((0.0, b.clone()));
    }
    let is_delim = |c: &u8| *c == b' ' || *c == b'-';
    let mut xi = x.bytes().enumerate().filter(|(_, c)| !is_delim(c)).peekable();
    let mut yi = y.bytes().filter(|c| !is_delim(c));
    let mut matched = 0;
    while let Some(&(i, c)) = xi.peek() {
        match yi.next() {
            Some(d) if d.eq_ignore_ascii_case(&c) => {
                matched = i + 1;
                xi.next();
            }
            _ => break,
        }
    }
    if xi.peek().is_none() {
        matched = x.len();
    }
    Some(((x.len() - matched) as f64 / x.len() as f64, b.clone()))
}

fn compare_lang(a: &Value, b: &Value) -> Option<(f64, Value)> {
    let result = match (a, b) {
        (Value::Langset(x), Value::Langset(y)) => x.compare(y),
        (Value::Langset(x), Value::String(y)) => x.has_lang(y),
        (Value::String(x), Value::Langset(y)) => y.has_lang(x),
        (Value::String(x), Value::String(y)) => lang_compare(x, y),
        _ => return None,
    };
    let d = match result {
        LangResult::Equal => 0.0,
        LangResult::DifferentCountry => 1.0,
        LangResult::DifferentLang => 2.0,
    };
    Some((d, b.clone()))
}

fn compare_bool(a: &Value, b: &Value) -> Option<(f64, Value)> {
    let (Value::Bool(x), Value::Bool(y)) = (a, b) else {
        return None;
    };
    let best = if *y == BoolValue::DontCare { a } else { b };
    let d = match (x, y) {
        (BoolValue::DontCare, _) | (_, BoolValue::DontCare) => 0.0,
        _ if x == y => 0.0,
        _ => 1.0,
    };
    Some((d, best.clone()))
}

fn compare_charset(a: &Value, b: &Value) -> Option<(f64, Value)> {
    let (Value::Charset(x), Value::Charset(y)) = (a, b) else {
        return None;
    };
    Some((x.subtract_count(y) as f64, b.clone()))
}

/// Distance between ranges or numbers. Overlapping ranges match; the best
/// value is the point of the font range closest to the query.
fn compare_range(a: &Value, b: &Value) -> Option<(f64, Value)> {
    let (x, y) = (a.as_range()?, b.as_range()?);
    let best = if y.end < x.begin {
        y.end
    } else if y.begin > x.end {
        y.begin
    } else {
        (x.begin.max(y.begin) + x.end.min(y.end)) * 0.5
    };
    let d = if x.end < y.begin || y.end < x.begin {
        (y.begin - x.end).abs().min((x.begin - y.end).abs())
    } else {
        0.0
    };
    Some((d, Value::Float(best)))
}

/// Best pairing of a query list with a font list.
struct ListScore {
    best: f64,
    best_strong: f64,
    best_weak: f64,
    value: Option<Value>,
}

fn compare_value_list(object: Object, m: &Matcher, query: &ValueList, font: &ValueList) -> ListScore {
    let mut score = ListScore {
        best: f64::MAX,
        best_strong: f64::MAX,
        best_weak: f64::MAX,
        value: None,
    };
    for (j, q) in query.iter().enumerate() {
        for f in font.iter() {
            let Some((d, value)) = (m.compare)(&q.value, &f.value) else {
                log::trace!("incomparable values for {object}");
                continue;
            };
            let v = d * 1000.0 + j as f64;
            if v < score.best {
                score.best = v;
                score.value = Some(value);
            }
            if q.binding == Binding::Weak {
                score.best_weak = score.best_weak.min(v);
            } else {
                score.best_strong = score.best_strong.min(v);
            }
        }
    }
    score
}

/// Score of one font against a query. Smaller is better.
#[derive(Clone, PartialEq, Debug)]
pub struct Score([f64; PRIORITY_COUNT]);

impl Score {
    fn compare(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(&other.0) {
            match a.partial_cmp(b) {
                Some(Ordering::Equal) | None => continue,
                Some(ord) => return ord,
            }
        }
        Ordering::Equal
    }
}

/// Computes the score of `font` for `query`.
pub fn score(query: &Pattern, font: &Pattern) -> Score {
    let mut score = Score([0.0; PRIORITY_COUNT]);
    for (object, qlist) in query.iter() {
        let (Some(flist), Some(m)) = (font.get(object), matcher(object)) else {
            continue;
        };
        let s = compare_value_list(object, &m, qlist, flist);
        if m.strong == m.weak {
            score.0[m.strong as usize] += s.best;
        } else {
            score.0[m.strong as usize] += s.best_strong;
            score.0[m.weak as usize] += s.best_weak;
        }
    }
    score
}

impl Config {
    /// Returns the best font of the configured font set for `query`,
    /// prepared for rendering.
    ///
    /// The query is expected to have been substituted already.
    pub fn font_match(&self, query: &Pattern) -> Option<Pattern> {
        self.font_set_match(&[self.fonts()], query)
    }

    /// Returns the best font across `sets` for `query`, prepared for
    /// rendering. Earlier fonts win ties.
    pub fn font_set_match(&self, sets: &[&FontSet], query: &Pattern) -> Option<Pattern> {
        let mut best: Option<(Score, &Pattern)> = None;
        for font in sets.iter().flat_map(|set| set.iter()) {
            let s = score(query, font);
            if best
                .as_ref()
                .map_or(true, |(b, _)| s.compare(b) == Ordering::Less)
            {
                best = Some((s, font));
            }
        }
        let (_, font) = best?;
        log::debug!(
            "best match: {}",
            font.get_string(Object::FILE, 0).unwrap_or("<no file>")
        );
        Some(self.render_prepare(query, font))
    }

    /// Returns the configured fonts ordered by score for `query`.
    ///
    /// With `trim`, fonts whose coverage adds nothing to the fonts before
    /// them are dropped.
    pub fn font_sort(&self, query: &Pattern, trim: bool) -> FontSet {
        let mut scored: Vec<_> = self
            .fonts()
            .iter()
            .map(|font| (score(query, font), font))
            .collect();
        scored.sort_by(|a, b| a.0.compare(&b.0));
        let mut coverage = super::charset::Charset::new();
        let mut out = FontSet::new();
        for (_, font) in scored {
            match font.get_charset(Object::CHARSET, 0) {
                Ok(cs) => {
                    if trim && !out.is_empty() && cs.is_subset(&coverage) {
                        continue;
                    }
                    coverage = coverage.union(cs);
                }
                Err(_) if trim => continue,
                Err(_) => {}
            }
            out.push(font.clone());
        }
        out
    }

    /// Builds the pattern handed to the renderer from the matched font.
    ///
    /// Ranges of variable fonts collapse to the value closest to the query,
    /// objects only present in the query are added and result rules are
    /// applied.
    pub fn render_prepare(&self, query: &Pattern, font: &Pattern) -> Pattern {
        let mut new = font.clone();
        let variable = font.get_bool(Object::VARIABLE, 0) == Ok(BoolValue::True);
        let mut variations = Vec::new();
        for (object, flist) in font.iter() {
            if !matches!(flist.first(), Some(ValueElt { value: Value::Range(_), .. })) {
                continue;
            }
            let (Some(qlist), Some(m)) = (query.get(object), matcher(object)) else {
                continue;
            };
            let Some(Value::Float(best)) = compare_value_list(object, &m, qlist, flist).value else {
                continue;
            };
            new.set_list(object, [ValueElt::strong(best)].into_iter().collect());
            if variable {
                let axis = match object {
                    Object::WEIGHT => constants::weight_to_opentype(best).map(|w| ("wght", w)),
                    Object::WIDTH => Some(("wdth", best)),
                    Object::SIZE => Some(("opsz", best)),
                    _ => None,
                };
                if let Some((tag, value)) = axis {
                    variations.push(format!("{tag}={value}"));
                }
            }
        }
        for (object, qlist) in query.iter() {
            if !font.contains(object) {
                new.add_list(object, qlist.clone(), true);
            }
        }
        if !variations.is_empty() {
            let mut settings = variations.join(",");
            if let Ok(existing) = new.get_string(Object::FONT_VARIATIONS, 0) {
                settings.push(',');
                settings.push_str(existing);
            }
            new.del(Object::FONT_VARIATIONS);
            new.add(Object::FONT_VARIATIONS, settings, true);
        }
        self.substitute(&mut new, Some(query), MatchKind::Result);
        new
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Charset;
    use crate::value::Range;

    fn font(family: &str, weight: i32, slant: i32) -> Pattern {
        let mut pat = Pattern::new();
        pat.add(Object::FAMILY, family, true);
        pat.add(Object::WEIGHT, weight, true);
        pat.add(Object::SLANT, slant, true);
        pat.add(Object::FILE, format!("/fonts/{family}-{weight}-{slant}.ttf"), true);
        pat
    }

    fn config(fonts: impl IntoIterator<Item = Pattern>) -> Config {
        let mut config = Config::new().with_default_langs(["en"]).with_prgname(None);
        config.set_fonts(fonts.into_iter().collect());
        config
    }

    fn file(pat: &Pattern) -> &str {
        pat.get_string(Object::FILE, 0).unwrap()
    }

    #[test]
    fn empty_set_has_no_match() {
        assert!(config([]).font_match(&Pattern::new()).is_none());
    }

    #[test_log::test]
    fn family_outranks_weight() {
        let config = config([
            font("Verdana", 200, 0),
            font("DejaVu Sans", 80, 0),
            font("DejaVu Sans", 200, 0),
        ]);
        let mut query = Pattern::new();
        query.add(Object::FAMILY, "dejavusans", true);
        query.add(Object::WEIGHT, constants::WEIGHT_BOLD, true);
        let best = config.font_match(&query).unwrap();
        assert_eq!(file(&best), "/fonts/DejaVu Sans-200-0.ttf");
    }

    #[test_log::test]
    fn earlier_family_wins() {
        let config = config([font("B", 80, 0), font("A", 80, 0)]);
        let mut query = Pattern::new();
        query.add(Object::FAMILY, "A", true);
        query.add(Object::FAMILY, "B", true);
        assert_eq!(file(&config.font_match(&query).unwrap()), "/fonts/A-80-0.ttf");
    }

    #[test_log::test]
    fn weak_family_yields_to_language() {
        let mut en = font("Alpha", 80, 0);
        en.add(Object::LANG, "en", true);
        let mut ja = font("Beta", 80, 0);
        ja.add(Object::LANG, "ja", true);
        let config = config([en, ja]);
        let mut query = Pattern::new();
        query.add_weak(Object::FAMILY, "Alpha", true);
        query.add(Object::LANG, "ja", true);
        assert_eq!(file(&config.font_match(&query).unwrap()), "/fonts/Beta-80-0.ttf");
        let mut query = Pattern::new();
        query.add(Object::FAMILY, "Alpha", true);
        query.add(Object::LANG, "ja", true);
        assert_eq!(file(&config.font_match(&query).unwrap()), "/fonts/Alpha-80-0.ttf");
    }

    #[test]
    fn distances() {
        let ps = |a: &str, b: &str| compare_postscript(&a.into(), &b.into()).unwrap().0;
        assert_eq!(ps("Arial-Bold", "ArialBold"), 0.0);
        assert_eq!(ps("Arial", "Helvetica"), 1.0);
        assert!(ps("ArialBold", "ArialNarrow") > 0.0);
        let (d, best) = compare_range(
            &Value::Integer(200),
            &Value::Range(Range::new(50.0, 150.0)),
        )
        .unwrap();
        assert_eq!(d, 50.0);
        assert!(matches!(best, Value::Float(v) if v == 150.0));
        let (d, _) = compare_range(&Value::Integer(100), &Value::Range(Range::new(50.0, 150.0))).unwrap();
        assert_eq!(d, 0.0);
        assert!(glob_match(b"/usr/*/fonts/*.ttf", b"/usr/share/fonts/a.ttf"));
        assert!(!glob_match(b"*.otf", b"a.ttf"));
        assert_eq!(
            compare_bool(&Value::Bool(BoolValue::DontCare), &true.into()).unwrap().0,
            0.0
        );
    }

    #[test_log::test]
    fn sort_and_trim() {
        let mut a = font("A", 80, 0);
        a.add(Object::CHARSET, (0x20..0x80).collect::<Charset>(), true);
        let mut b = font("B", 80, 0);
        b.add(Object::CHARSET, (0x41..0x5B).collect::<Charset>(), true);
        let mut c = font("C", 80, 0);
        c.add(Object::CHARSET, (0x3041..0x3094).collect::<Charset>(), true);
        let config = config([c, b, a]);
        let mut query = Pattern::new();
        query.add(Object::FAMILY, "A", true);
        query.add(Object::FAMILY, "B", true);
        let all = config.font_sort(&query, false);
        let names: Vec<_> = all
            .iter()
            .map(|p| p.get_string(Object::FAMILY, 0).unwrap())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
        let trimmed = config.font_sort(&query, true);
        let names: Vec<_> = trimmed
            .iter()
            .map(|p| p.get_string(Object::FAMILY, 0).unwrap())
            .collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test_log::test]
    fn render_prepare_resolves_variable_ranges() {
        let mut var = Pattern::new();
        var.add(Object::FAMILY, "Inter", true);
        var.add(Object::WEIGHT, Range::new(0.0, 215.0), true);
        var.add(Object::VARIABLE, true, true);
        let config = config([var]);
        let mut query = Pattern::new();
        query.add(Object::FAMILY, "Inter", true);
        query.add(Object::WEIGHT, constants::WEIGHT_BOLD, true);
        query.add(Object::PIXEL_SIZE, 16.0, true);
        let best = config.font_match(&query).unwrap();
        assert_eq!(best.get_float(Object::WEIGHT, 0), Ok(200.0));
        assert_eq!(best.get_float(Object::PIXEL_SIZE, 0), Ok(16.0));
        assert_eq!(best.get_string(Object::FONT_VARIATIONS, 0), Ok("wght=700"));
    }
}

//! Textual form of patterns: `families-sizes:name=value,value:constant`.

use super::charset::{Charset, MAX_CHAR};
use super::config::Config;
use super::constants::{constant, constant_name};
use super::error::ConfigError;
use super::lang::Langset;
use super::object::{Constraint, Object};
use super::pattern::Pattern;
use super::value::{BoolValue, Matrix, Range, Value};
use core::fmt;
use core::str::FromStr;

impl Pattern {
    /// Parses a font name using the built-in object names.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        parse(name, Object::from_name)
    }
}

impl FromStr for Pattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Config {
    /// Parses a font name, resolving custom objects registered with this
    /// configuration.
    pub fn parse_pattern(&self, name: &str) -> Result<Pattern, ConfigError> {
        parse(name, |s| self.object_from_name(s).ok())
    }
}

/// Splits off the next token ending at one of `delims`, removing escapes.
fn token<'a>(s: &'a str, delims: &[char]) -> (String, Option<char>, &'a str) {
    let mut out = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            if let Some((_, escaped)) = chars.next() {
                out.push(escaped);
            }
        } else if delims.contains(&c) {
            return (out, Some(c), &s[i + c.len_utf8()..]);
        } else {
            out.push(c);
        }
    }
    (out, None, "")
}

fn parse(name: &str, lookup: impl Fn(&str) -> Option<Object>) -> Result<Pattern, ConfigError> {
    let mut pat = Pattern::new();
    let mut rest = name;
    let mut delim;
    loop {
        let (family, d, r) = token(rest, &['-', ',', ':']);
        if !family.is_empty() {
            pat.add(Object::FAMILY, family, true);
        }
        (delim, rest) = (d, r);
        if delim != Some(',') {
            break;
        }
    }
    if delim == Some('-') {
        loop {
            let (size, d, r) = token(rest, &[',', ':']);
            pat.add(Object::SIZE, number(Object::SIZE, &size)?, true);
            (delim, rest) = (d, r);
            if delim != Some(',') {
                break;
            }
        }
    }
    while delim == Some(':') {
        let (key, d, r) = token(rest, &['=', ':']);
        (delim, rest) = (d, r);
        if delim == Some('=') {
            let object = lookup(&key).ok_or(ConfigError::UnknownObject(key))?;
            loop {
                let (text, d, r) = token(rest, &[',', ':']);
                (delim, rest) = (d, r);
                let value = convert(object, &text)?;
                pat.add(object, value, true);
                if delim != Some(',') {
                    break;
                }
            }
        } else if let Some(c) = constant(&key) {
            pat.add(c.object, c.value, true);
        } else if !key.is_empty() {
            log::debug!("ignoring unknown constant {key:?} in font name");
        }
    }
    Ok(pat)
}

fn invalid(object: Object, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        object: object.to_string(),
        value: value.to_owned(),
    }
}

/// Integral numbers stay integers.
fn number(object: Object, text: &str) -> Result<Value, ConfigError> {
    let s = text.trim();
    if let Ok(i) = s.parse::<i32>() {
        Ok(Value::Integer(i))
    } else {
        s.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid(object, text))
    }
}

fn convert(object: Object, text: &str) -> Result<Value, ConfigError> {
    let err = || invalid(object, text);
    let named = || constant(text.trim()).filter(|c| c.object == object);
    Ok(match object.constraint() {
        Constraint::Integer => match named() {
            Some(c) => Value::Integer(c.value),
            None => Value::Integer(text.trim().parse().map_err(|_| err())?),
        },
        Constraint::Double => number(object, text)?,
        Constraint::Range => {
            if let Some(inner) = text.trim().strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                let mut parts = inner.split_whitespace().map(str::parse::<f64>);
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(Ok(begin)), Some(Ok(end)), None) => Value::Range(Range::new(begin, end)),
                    _ => return Err(err()),
                }
            } else if let Some(c) = named() {
                Value::Integer(c.value)
            } else {
                number(object, text)?
            }
        }
        Constraint::Bool => Value::Bool(parse_bool(text).ok_or_else(err)?),
        Constraint::String | Constraint::Any => Value::String(text.to_owned()),
        Constraint::Matrix => {
            let v: Vec<f64> = text
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|_| err())?;
            match v[..] {
                [xx, xy, yx, yy] => Value::Matrix(Matrix { xx, xy, yx, yy }),
                _ => return Err(err()),
            }
        }
        Constraint::Charset => {
            let mut charset = Charset::new();
            for item in text.split_whitespace() {
                let (first, last) = item.split_once('-').unwrap_or((item, item));
                let hex = |s: &str| u32::from_str_radix(s, 16).map_err(|_| err());
                let (first, last) = (hex(first)?, hex(last)?);
                if last > MAX_CHAR {
                    return Err(err());
                }
                for ch in first..=last {
                    charset.add_char(ch);
                }
            }
            charset.into()
        }
        Constraint::Langset => text
            .split('|')
            .filter(|s| !s.is_empty())
            .collect::<Langset>()
            .into(),
    })
}

/// Parses the boolean spellings accepted in names and configuration.
fn parse_bool(text: &str) -> Option<BoolValue> {
    let mut chars = text.trim().chars().map(|c| c.to_ascii_lowercase());
    Some(match chars.next()? {
        't' | 'y' | '1' => BoolValue::True,
        'f' | 'n' | '0' => BoolValue::False,
        'd' => BoolValue::DontCare,
        'o' => match chars.next()? {
            'n' => BoolValue::True,
            'f' => BoolValue::False,
            _ => return None,
        },
        _ => return None,
    })
}

struct Escaped<'a>(&'a str, &'a [char]);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            if c == '\\' || self.1.contains(&c) {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEAD: &[char] = &['-', ':', ','];
        const VALUE: &[char] = &[':', ','];
        let join = |f: &mut fmt::Formatter<'_>, object: Object, escape: &[char]| -> fmt::Result {
            let Some(list) = self.get(object) else {
                return Ok(());
            };
            for (i, value) in list.values().enumerate() {
                if i != 0 {
                    f.write_str(",")?;
                }
                match value {
                    Value::Integer(v) => match constant_name(object, *v) {
                        Some(name) => f.write_str(name)?,
                        None => write!(f, "{v}")?,
                    },
                    _ => write!(f, "{}", Escaped(&value.to_string(), escape))?,
                }
            }
            Ok(())
        };
        join(f, Object::FAMILY, HEAD)?;
        if self.contains(Object::SIZE) {
            f.write_str("-")?;
            join(f, Object::SIZE, HEAD)?;
        }
        for object in self.objects() {
            if object == Object::FAMILY || object == Object::SIZE {
                continue;
            }
            write!(f, ":{object}=")?;
            join(f, object, VALUE)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SLANT_ITALIC, WEIGHT_BOLD};

    #[test]
    fn parse_full_name() {
        let pat = Pattern::parse("Dejavu Sans,Noto\\-Sans-10.5,12:weight=bold:italic:lang=en|ja:outline=true").unwrap();
        let families: Vec<_> = pat.get(Object::FAMILY).unwrap().values().filter_map(|v| v.as_str()).collect();
        assert_eq!(families, ["Dejavu Sans", "Noto-Sans"]);
        assert_eq!(pat.get_float(Object::SIZE, 0), Ok(10.5));
        assert_eq!(pat.get_float(Object::SIZE, 1), Ok(12.0));
        assert_eq!(pat.get_integer(Object::WEIGHT, 0), Ok(WEIGHT_BOLD));
        assert_eq!(pat.get_integer(Object::SLANT, 0), Ok(SLANT_ITALIC));
        assert_eq!(pat.get_bool(Object::OUTLINE, 0), Ok(BoolValue::True));
        let langs = pat.get_langset(Object::LANG, 0).unwrap();
        assert!(langs.contains_lang("ja"));
    }

    #[test]
    fn values() {
        let pat = Pattern::parse(":width=[75 100]:charset=41-43 3042:matrix=1 0.2 0 1:pixelsize=16").unwrap();
        assert_eq!(pat.get_range(Object::WIDTH, 0), Ok(Range::new(75.0, 100.0)));
        let cs = pat.get_charset(Object::CHARSET, 0).unwrap();
        assert_eq!(cs.len(), 4);
        assert!(cs.has_char(0x3042));
        assert_eq!(pat.get_matrix(Object::MATRIX, 0).map(|m| m.xy), Ok(0.2));
        assert_eq!(pat.get_float(Object::PIXEL_SIZE, 0), Ok(16.0));
        assert!(!pat.contains(Object::FAMILY));
    }

    #[test]
    fn errors() {
        assert_eq!(
            Pattern::parse(":nosuchthing=1"),
            Err(ConfigError::UnknownObject("nosuchthing".into()))
        );
        assert!(matches!(
            Pattern::parse(":slant=sideways"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(Pattern::parse("Foo-big"), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn display_round_trips() {
        let mut pat = Pattern::new();
        pat.add(Object::FAMILY, "Foo, Inc: Bar-Baz", true);
        pat.add(Object::FAMILY, "Sans", true);
        pat.add(Object::SIZE, 12, true);
        pat.add(Object::WEIGHT, WEIGHT_BOLD, true);
        pat.add(Object::STYLE, "Bold:Italic", true);
        pat.add(Object::SCALABLE, true, true);
        let text = pat.to_string();
        assert_eq!(
            text,
            "Foo\\, Inc\\: Bar\\-Baz,Sans-12:style=Bold\\:Italic:weight=bold:scalable=True"
        );
        assert_eq!(Pattern::parse(&text).unwrap(), pat);
    }

    #[test]
    fn custom_objects_through_config() {
        let mut config = Config::new();
        let obj = config.register_object("myprop").unwrap();
        let pat = config.parse_pattern("Foo:myprop=hello").unwrap();
        assert_eq!(pat.get_string(obj, 0), Ok("hello"));
        assert!(Pattern::parse("Foo:myprop=hello").is_err());
    }
}

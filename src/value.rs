//! Dynamically typed pattern values.

use super::charset::Charset;
use super::lang::Langset;
use core::fmt;
use std::sync::Arc;

/// Three state boolean.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BoolValue {
    False,
    True,
    /// Matches either state.
    DontCare,
}

impl From<bool> for BoolValue {
    fn from(b: bool) -> Self {
        if b {
            Self::True
        } else {
            Self::False
        }
    }
}

/// Inclusive range of floating point values.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Range {
    pub begin: f64,
    pub end: f64,
}

impl Range {
    /// Creates a new range.
    pub fn new(begin: f64, end: f64) -> Self {
        Self { begin, end }
    }

    /// Creates a zero width range at `value`.
    pub fn point(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Returns true if `value` is within the range.
    pub fn contains(&self, value: f64) -> bool {
        self.begin <= value && value <= self.end
    }
}

/// 2x2 transformation matrix.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Matrix {
    pub xx: f64,
    pub xy: f64,
    pub yx: f64,
    pub yy: f64,
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        xx: 1.0,
        xy: 0.0,
        yx: 0.0,
        yy: 1.0,
    };

    /// Returns the product `self * other`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            xx: self.xx * other.xx + self.xy * other.yx,
            xy: self.xx * other.xy + self.xy * other.yy,
            yx: self.yx * other.xx + self.yy * other.yx,
            yy: self.yx * other.xy + self.yy * other.yy,
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Type tag of a [`Value`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum ValueType {
    Void = 0,
    Integer = 1,
    Float = 2,
    String = 3,
    Bool = 4,
    Matrix = 5,
    Charset = 6,
    Langset = 7,
    Range = 8,
}

impl ValueType {
    /// Returns the type for a serialized tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::Void,
            1 => Self::Integer,
            2 => Self::Float,
            3 => Self::String,
            4 => Self::Bool,
            5 => Self::Matrix,
            6 => Self::Charset,
            7 => Self::Langset,
            8 => Self::Range,
            _ => return None,
        })
    }

    /// Returns a short name for the type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Integer => "integer",
            Self::Float => "double",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Matrix => "matrix",
            Self::Charset => "charset",
            Self::Langset => "langset",
            Self::Range => "range",
        }
    }
}

/// A dynamically typed value.
///
/// Charsets and langsets are immutable once wrapped in a value and are shared
/// between copies.
#[derive(Clone, Debug)]
pub enum Value {
    Void,
    Integer(i32),
    Float(f64),
    String(String),
    Bool(BoolValue),
    Matrix(Matrix),
    Charset(Arc<Charset>),
    Langset(Arc<Langset>),
    Range(Range),
}

impl Value {
    /// Returns the type tag.
    pub fn ty(&self) -> ValueType {
        match self {
            Self::Void => ValueType::Void,
            Self::Integer(_) => ValueType::Integer,
            Self::Float(_) => ValueType::Float,
            Self::String(_) => ValueType::String,
            Self::Bool(_) => ValueType::Bool,
            Self::Matrix(_) => ValueType::Matrix,
            Self::Charset(_) => ValueType::Charset,
            Self::Langset(_) => ValueType::Langset,
            Self::Range(_) => ValueType::Range,
        }
    }

    /// Returns the string payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric payload of an integer or float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the numeric value as a range; numbers become zero width ranges.
    pub fn as_range(&self) -> Option<Range> {
        match self {
            Self::Range(r) => Some(*r),
            _ => self.as_f64().map(Range::point),
        }
    }

    /// Appends a type tagged byte representation of the value.
    ///
    /// Two values produce the same bytes only if they are identical.
    pub fn hash_into(&self, out: &mut Vec<u8>) {
        out.push(self.ty() as u8);
        match self {
            Self::Void => {}
            Self::Integer(i) => out.extend_from_slice(&i.to_le_bytes()),
            Self::Float(f) => out.extend_from_slice(&f.to_bits().to_le_bytes()),
            Self::String(s) => {
                out.extend_from_slice(&(s.len() as u32).to_le_bytes());
                out.extend_from_slice(s.as_bytes());
            }
            Self::Bool(b) => out.push(*b as u8),
            Self::Matrix(m) => {
                for v in [m.xx, m.xy, m.yx, m.yy] {
                    out.extend_from_slice(&v.to_bits().to_le_bytes());
                }
            }
            Self::Charset(c) => {
                let bytes = c.hash();
                out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
                out.extend_from_slice(&bytes);
            }
            Self::Langset(l) => {
                let bytes = l.hash();
                out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
                out.extend_from_slice(&bytes);
            }
            Self::Range(r) => {
                out.extend_from_slice(&r.begin.to_bits().to_le_bytes());
                out.extend_from_slice(&r.end.to_bits().to_le_bytes());
            }
        }
    }

    /// Returns true if both values are identical.
    pub fn same(&self, other: &Self) -> bool {
        let (mut a, mut b) = (Vec::new(), Vec::new());
        self.hash_into(&mut a);
        other.hash_into(&mut b);
        a == b
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Range> for Value {
    fn from(v: Range) -> Self {
        Self::Range(v)
    }
}

impl From<Matrix> for Value {
    fn from(v: Matrix) -> Self {
        Self::Matrix(v)
    }
}

impl From<Charset> for Value {
    fn from(v: Charset) -> Self {
        Self::Charset(Arc::new(v))
    }
}

impl From<Langset> for Value {
    fn from(v: Langset) -> Self {
        Self::Langset(Arc::new(v))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => Ok(()),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
            Self::Bool(BoolValue::True) => f.write_str("True"),
            Self::Bool(BoolValue::False) => f.write_str("False"),
            Self::Bool(BoolValue::DontCare) => f.write_str("DontCare"),
            Self::Matrix(m) => write!(f, "{} {} {} {}", m.xx, m.xy, m.yx, m.yy),
            Self::Charset(c) => write!(f, "{c}"),
            Self::Langset(l) => write!(f, "{l}"),
            Self::Range(r) => write!(f, "[{} {}]", r.begin, r.end),
        }
    }
}

/// Strength with which a value is bound to its object.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Binding {
    /// Contributes to scoring but yields to strong values.
    Weak = 0,
    Strong = 1,
    /// Takes the binding of the value an edit is positioned at.
    Same = 2,
}

impl Binding {
    /// Returns the binding for a serialized tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::Weak,
            1 => Self::Strong,
            2 => Self::Same,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_type_tagged() {
        assert!(!Value::Integer(1).same(&Value::Float(1.0)));
        assert!(!Value::from("1").same(&Value::Integer(1)));
        assert!(Value::from("Foo").same(&Value::from("Foo")));
        assert!(!Value::from("Foo").same(&Value::from("foo")));
    }

    #[test]
    fn matrix_multiply() {
        let m = Matrix {
            xx: 2.0,
            xy: 0.0,
            yx: 0.0,
            yy: 3.0,
        };
        assert_eq!(m.multiply(&Matrix::IDENTITY), m);
        let shear = Matrix {
            xx: 1.0,
            xy: 0.2,
            yx: 0.0,
            yy: 1.0,
        };
        let p = m.multiply(&shear);
        assert_eq!(p.xy, 0.4);
        assert_eq!(p.yy, 3.0);
    }

    #[test]
    fn ranges() {
        let r = Range::new(100.0, 200.0);
        assert!(r.contains(100.0));
        assert!(r.contains(200.0));
        assert!(!r.contains(200.5));
        assert_eq!(Value::Integer(80).as_range(), Some(Range::point(80.0)));
    }
}

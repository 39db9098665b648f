//! Binary serialization of font sets.
//!
//! The format is little endian and starts with the magic bytes `FCCS` and a
//! version byte. Counts and lengths are LEB128 varints and integers are
//! zig-zag encoded.

use super::charset::{Charset, Leaf};
use super::error::{Error, Result};
use super::fontset::FontSet;
use super::lang::Langset;
use super::list::{ValueElt, ValueList};
use super::object::Object;
use super::pattern::Pattern;
use super::value::{Binding, BoolValue, Matrix, Range, Value, ValueType};
use std::io::{Read, Write};
use std::sync::Arc;

/// Magic bytes at the start of every cache.
pub const MAGIC: [u8; 4] = *b"FCCS";

/// Current format version.
pub const VERSION: u8 = 1;

impl FontSet {
    /// Writes the set to `writer`.
    pub fn dump(&self, mut writer: impl Write) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Reads a set previously written with [`dump`](Self::dump).
    pub fn load(mut reader: impl Read) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }

    /// Serializes the set.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.bytes(&MAGIC);
        w.u8(VERSION);
        w.varint(self.len() as u64);
        for font in self {
            w.pattern(font);
        }
        w.buf
    }

    /// Deserializes a set.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data);
        if *r.take(4)? != MAGIC {
            return Err(Error::CacheCorrupt("bad magic".into()));
        }
        let version = r.u8()?;
        if version != VERSION {
            return Err(Error::CacheVersionMismatch {
                expected: VERSION,
                found: version,
            });
        }
        let count = r.varint()?;
        let mut set = FontSet::new();
        for _ in 0..count {
            set.push(r.pattern()?);
        }
        if !r.is_empty() {
            return Err(Error::CacheCorrupt("trailing data".into()));
        }
        log::debug!("loaded {} fonts from cache", set.len());
        Ok(set)
    }
}

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn bytes(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }

    fn varint(&mut self, mut v: u64) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.u8(byte);
                break;
            }
            self.u8(byte | 0x80);
        }
    }

    fn f64(&mut self, v: f64) {
        self.bytes(&v.to_bits().to_le_bytes());
    }

    fn string(&mut self, s: &str) {
        self.varint(s.len() as u64);
        self.bytes(s.as_bytes());
    }

    fn pattern(&mut self, pattern: &Pattern) {
        self.varint(pattern.len() as u64);
        for (object, list) in pattern.iter() {
            self.varint(object.0 as u64);
            self.varint(list.len() as u64);
            for elt in list {
                self.u8(elt.binding as u8);
                self.value(&elt.value);
            }
        }
    }

    fn value(&mut self, value: &Value) {
        self.u8(value.ty() as u8);
        match value {
            Value::Void => {}
            Value::Integer(i) => self.varint(((*i << 1) ^ (*i >> 31)) as u32 as u64),
            Value::Float(f) => self.f64(*f),
            Value::String(s) => self.string(s),
            Value::Bool(b) => self.u8(*b as u8),
            Value::Matrix(m) => {
                for v in [m.xx, m.xy, m.yx, m.yy] {
                    self.f64(v);
                }
            }
            Value::Charset(c) => {
                self.varint(c.numbers().len() as u64);
                for (page, leaf) in c.numbers().iter().zip(c.leaves()) {
                    self.bytes(&page.to_le_bytes());
                    self.bytes(&leaf.to_bytes());
                }
            }
            Value::Langset(l) => {
                for word in l.bits() {
                    self.bytes(&word.to_le_bytes());
                }
                let extras: Vec<_> = l.extras().collect();
                self.varint(extras.len() as u64);
                for extra in extras {
                    self.string(extra);
                }
            }
            Value::Range(r) => {
                self.f64(r.begin);
                self.f64(r.end);
            }
        }
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

fn corrupt(what: impl Into<String>) -> Error {
    Error::CacheCorrupt(what.into())
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| corrupt(format!("unexpected end of data at {}", self.pos)))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn varint(&mut self) -> Result<u64> {
        let mut v = 0u64;
        for shift in (0..64).step_by(7) {
            let byte = self.u8()?;
            v |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(v);
            }
        }
        Err(corrupt("varint too long"))
    }

    fn len(&mut self) -> Result<usize> {
        let len = self.varint()?;
        // Every counted item occupies at least one byte.
        if len > (self.data.len() - self.pos) as u64 {
            return Err(corrupt(format!("count {len} exceeds remaining data")));
        }
        Ok(len as usize)
    }

    fn i32(&mut self) -> Result<i32> {
        let v = u32::try_from(self.varint()?).map_err(|_| corrupt("integer out of range"))?;
        Ok((v >> 1) as i32 ^ -((v & 1) as i32))
    }

    fn f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(u64::from_le_bytes(self.array()?)))
    }

    fn string(&mut self) -> Result<String> {
        let len = self.len()?;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| corrupt("invalid utf-8 in string"))
    }

    fn pattern(&mut self) -> Result<Pattern> {
        let mut pattern = Pattern::new();
        let count = self.len()?;
        let mut prev = 0;
        for _ in 0..count {
            let tag = u16::try_from(self.varint()?).map_err(|_| corrupt("object tag out of range"))?;
            if tag <= prev {
                return Err(corrupt(format!("object {tag} out of order")));
            }
            prev = tag;
            let object = Object(tag);
            let len = self.len()?;
            if len == 0 {
                return Err(corrupt(format!("empty value list for {object}")));
            }
            let mut list = ValueList::new();
            for _ in 0..len {
                let binding = Binding::from_tag(self.u8()?)
                    .ok_or_else(|| corrupt("invalid binding"))?;
                let value = self.value()?;
                if !object.accepts(&value) {
                    return Err(corrupt(format!(
                        "{} value for {object}",
                        value.ty().name()
                    )));
                }
                list.push(ValueElt::new(value, binding));
            }
            pattern.set_list(object, list);
        }
        Ok(pattern)
    }

    fn value(&mut self) -> Result<Value> {
        let tag = self.u8()?;
        let ty = ValueType::from_tag(tag).ok_or_else(|| corrupt(format!("invalid value type {tag}")))?;
        Ok(match ty {
            ValueType::Void => Value::Void,
            ValueType::Integer => Value::Integer(self.i32()?),
            ValueType::Float => Value::Float(self.f64()?),
            ValueType::String => Value::String(self.string()?),
            ValueType::Bool => Value::Bool(match self.u8()? {
                0 => BoolValue::False,
                1 => BoolValue::True,
                2 => BoolValue::DontCare,
                b => return Err(corrupt(format!("invalid bool {b}"))),
            }),
            ValueType::Matrix => Value::Matrix(Matrix {
                xx: self.f64()?,
                xy: self.f64()?,
                yx: self.f64()?,
                yy: self.f64()?,
            }),
            ValueType::Charset => {
                let count = self.len()?;
                let mut charset = Charset::new();
                let mut prev = None;
                for _ in 0..count {
                    let page = u16::from_le_bytes(self.array()?);
                    if prev.map_or(false, |p| page <= p) {
                        return Err(corrupt(format!("charset page {page} out of order")));
                    }
                    prev = Some(page);
                    charset.add_leaf(page, Leaf::from_bytes(&self.array()?));
                }
                Value::Charset(Arc::new(charset))
            }
            ValueType::Langset => {
                let mut words = [0u32; Langset::WORDS];
                for word in &mut words {
                    *word = u32::from_le_bytes(self.array()?);
                }
                let count = self.len()?;
                let mut extras = Vec::new();
                for _ in 0..count {
                    extras.push(self.string()?);
                }
                Value::Langset(Arc::new(Langset::from_parts(&words, extras)))
            }
            ValueType::Range => Value::Range(Range {
                begin: self.f64()?,
                end: self.f64()?,
            }),
        })
    }
}

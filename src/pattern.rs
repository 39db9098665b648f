//! Patterns: property bags mapping objects to value lists.

use super::charset::Charset;
use super::error::GetError;
use super::lang::Langset;
use super::list::{ValueElt, ValueList};
use super::object::Object;
use super::value::{Binding, BoolValue, Matrix, Range, Value};

/// Map from objects to non-empty value lists.
///
/// Entries are kept sorted by object tag.
#[derive(Clone, Default, Debug)]
pub struct Pattern {
    elts: Vec<(Object, ValueList)>,
}

impl Pattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of objects in the pattern.
    pub fn len(&self) -> usize {
        self.elts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elts.is_empty()
    }

    /// Returns an iterator over the objects in ascending tag order.
    pub fn objects(&self) -> impl Iterator<Item = Object> + '_ {
        self.elts.iter().map(|(object, _)| *object)
    }

    /// Returns an iterator over the objects and their value lists.
    pub fn iter(&self) -> impl Iterator<Item = (Object, &ValueList)> + '_ {
        self.elts.iter().map(|(object, list)| (*object, list))
    }

    /// Returns the value list for `object`.
    pub fn get(&self, object: Object) -> Option<&ValueList> {
        let idx = self.find(object).ok()?;
        Some(&self.elts[idx].1)
    }

    /// Returns true if the pattern holds `object`.
    pub fn contains(&self, object: Object) -> bool {
        self.find(object).is_ok()
    }

    /// Adds a strongly bound value, prepending it or appending it to the
    /// existing list.
    pub fn add(&mut self, object: Object, value: impl Into<Value>, append: bool) -> bool {
        self.add_with_binding(object, value, Binding::Strong, append)
    }

    /// Adds a weakly bound value.
    pub fn add_weak(&mut self, object: Object, value: impl Into<Value>, append: bool) -> bool {
        self.add_with_binding(object, value, Binding::Weak, append)
    }

    /// Adds a value with an explicit binding.
    ///
    /// Values rejected by the type constraint of the object are discarded
    /// with a warning.
    pub fn add_with_binding(
        &mut self,
        object: Object,
        value: impl Into<Value>,
        binding: Binding,
        append: bool,
    ) -> bool {
        let value = value.into();
        if !object.accepts(&value) {
            log::warn!(
                "discarding {} value for object {object}",
                value.ty().name()
            );
            return false;
        }
        let list = self.list_mut(object);
        let elt = ValueElt::new(value, binding);
        if append {
            list.push(elt);
        } else {
            list.insert(0, elt);
        }
        true
    }

    /// Adds each valid element of `list`. Invalid elements are discarded.
    ///
    /// Returns true if any element was added.
    pub fn add_list(&mut self, object: Object, mut list: ValueList, append: bool) -> bool {
        list.retain(|elt| {
            let ok = object.accepts(&elt.value);
            if !ok {
                log::warn!(
                    "discarding {} value for object {object}",
                    elt.value.ty().name()
                );
            }
            ok
        });
        if list.is_empty() {
            return false;
        }
        let target = self.list_mut(object);
        if append {
            target.append(list);
        } else {
            target.insert_list(0, list);
        }
        true
    }

    /// Removes all values of `object`.
    pub fn del(&mut self, object: Object) -> bool {
        match self.find(object) {
            Ok(idx) => {
                self.elts.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Removes the value at `index` of `object`.
    pub fn remove(&mut self, object: Object, index: usize) -> bool {
        let Ok(idx) = self.find(object) else {
            return false;
        };
        let list = &mut self.elts[idx].1;
        if index >= list.len() {
            return false;
        }
        list.remove(index);
        self.canon(object);
        true
    }

    /// Drops `object` if its list is empty.
    pub fn canon(&mut self, object: Object) {
        if let Ok(idx) = self.find(object) {
            if self.elts[idx].1.is_empty() {
                self.elts.remove(idx);
            }
        }
    }

    /// Appends every value of `other`, keeping the bindings.
    pub fn append(&mut self, other: &Pattern) {
        for (object, list) in other.iter() {
            self.add_list(object, list.clone(), true);
        }
    }

    /// Returns a copy holding only the given objects.
    pub fn filter(&self, objects: &[Object]) -> Self {
        Self {
            elts: self
                .elts
                .iter()
                .filter(|(object, _)| objects.contains(object))
                .cloned()
                .collect(),
        }
    }

    /// Returns a deep copy of the pattern.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Returns the value at `index` of `object`.
    pub fn get_at(&self, object: Object, index: usize) -> Result<&Value, GetError> {
        let list = self.get(object).ok_or(GetError::NoMatch)?;
        list.get(index)
            .map(|elt| &elt.value)
            .ok_or(GetError::NoId)
    }

    pub fn get_string(&self, object: Object, index: usize) -> Result<&str, GetError> {
        match self.get_at(object, index)? {
            Value::String(s) => Ok(s.as_str()),
            _ => Err(GetError::TypeMismatch),
        }
    }

    pub fn get_integer(&self, object: Object, index: usize) -> Result<i32, GetError> {
        match self.get_at(object, index)? {
            Value::Integer(i) => Ok(*i),
            _ => Err(GetError::TypeMismatch),
        }
    }

    /// Returns a float value; integers are converted.
    pub fn get_float(&self, object: Object, index: usize) -> Result<f64, GetError> {
        self.get_at(object, index)?
            .as_f64()
            .ok_or(GetError::TypeMismatch)
    }

    pub fn get_bool(&self, object: Object, index: usize) -> Result<BoolValue, GetError> {
        match self.get_at(object, index)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(GetError::TypeMismatch),
        }
    }

    pub fn get_charset(&self, object: Object, index: usize) -> Result<&Charset, GetError> {
        match self.get_at(object, index)? {
            Value::Charset(c) => Ok(&**c),
            _ => Err(GetError::TypeMismatch),
        }
    }

    pub fn get_langset(&self, object: Object, index: usize) -> Result<&Langset, GetError> {
        match self.get_at(object, index)? {
            Value::Langset(l) => Ok(&**l),
            _ => Err(GetError::TypeMismatch),
        }
    }

    pub fn get_range(&self, object: Object, index: usize) -> Result<Range, GetError> {
        match self.get_at(object, index)? {
            Value::Range(r) => Ok(*r),
            _ => Err(GetError::TypeMismatch),
        }
    }

    pub fn get_matrix(&self, object: Object, index: usize) -> Result<Matrix, GetError> {
        match self.get_at(object, index)? {
            Value::Matrix(m) => Ok(*m),
            _ => Err(GetError::TypeMismatch),
        }
    }

    /// Returns a byte string that identifies the pattern contents.
    ///
    /// Objects are visited in ascending tag order; each contributes its tag,
    /// a `:` separator and the hash of its value list.
    pub fn hash(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (object, list) in &self.elts {
            out.extend_from_slice(&object.0.to_le_bytes());
            out.push(b':');
            list.hash_into(&mut out);
        }
        out
    }

    /// Returns the list for `object`, creating an empty one if needed.
    ///
    /// Callers must call [`canon`](Self::canon) after removing values.
    pub(crate) fn list_mut(&mut self, object: Object) -> &mut ValueList {
        let idx = match self.find(object) {
            Ok(idx) => idx,
            Err(idx) => {
                self.elts.insert(idx, (object, ValueList::new()));
                idx
            }
        };
        &mut self.elts[idx].1
    }

    /// Replaces the list for `object`. An empty list removes the object.
    pub(crate) fn set_list(&mut self, object: Object, list: ValueList) {
        if list.is_empty() {
            self.del(object);
        } else {
            *self.list_mut(object) = list;
        }
    }

    fn find(&self, object: Object) -> Result<usize, usize> {
        self.elts.binary_search_by_key(&object, |(o, _)| *o)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.hash() == other.hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get() {
        let mut pat = Pattern::new();
        assert!(pat.add(Object::FAMILY, "Bar", true));
        assert!(pat.add(Object::FAMILY, "Foo", false));
        assert!(pat.add_weak(Object::FAMILY, "Baz", true));
        assert_eq!(pat.get_string(Object::FAMILY, 0), Ok("Foo"));
        assert_eq!(pat.get_string(Object::FAMILY, 2), Ok("Baz"));
        assert_eq!(pat.get_string(Object::FAMILY, 3), Err(GetError::NoId));
        assert_eq!(pat.get_string(Object::STYLE, 0), Err(GetError::NoMatch));
        assert_eq!(pat.get_integer(Object::FAMILY, 0), Err(GetError::TypeMismatch));
        assert_eq!(
            pat.get(Object::FAMILY).unwrap().get(2).unwrap().binding,
            Binding::Weak
        );
    }

    #[test]
    fn constraints_are_enforced() {
        let mut pat = Pattern::new();
        assert!(!pat.add(Object::FAMILY, 12, true));
        assert!(!pat.add(Object::SLANT, Value::Void, true));
        assert!(pat.is_empty());
        assert!(pat.add(Object::WEIGHT, 80, true));
        assert!(pat.add(Object::WEIGHT, Range::new(50.0, 200.0), true));
        assert!(pat.add(Object::PIXEL_SIZE, 12, true));
        assert_eq!(pat.get_float(Object::PIXEL_SIZE, 0), Ok(12.0));
        assert!(pat.add(Object::LANG, "en", true));
        assert!(pat.add(Object(Object::FIRST_CUSTOM), Value::Void, true));
    }

    #[test]
    fn add_list_drops_only_invalid() {
        let mut pat = Pattern::new();
        let list: ValueList = [
            ValueElt::strong("DejaVu Sans"),
            ValueElt::strong(3),
            ValueElt::weak("Verdana"),
        ]
        .into_iter()
        .collect();
        assert!(pat.add_list(Object::FAMILY, list, true));
        assert_eq!(pat.get(Object::FAMILY).unwrap().len(), 2);
    }

    #[test]
    fn remove_canonicalizes() {
        let mut pat = Pattern::new();
        pat.add(Object::STYLE, "Bold", true);
        assert!(pat.remove(Object::STYLE, 0));
        assert!(!pat.contains(Object::STYLE));
        assert!(!pat.remove(Object::STYLE, 0));
        pat.add(Object::STYLE, "Bold", true);
        assert!(pat.del(Object::STYLE));
        assert!(pat.is_empty());
    }

    #[test]
    fn hash_is_order_independent_across_objects() {
        let mut a = Pattern::new();
        a.add(Object::WEIGHT, 200, true);
        a.add(Object::FAMILY, "Foo", true);
        let mut b = Pattern::new();
        b.add(Object::FAMILY, "Foo", true);
        b.add(Object::WEIGHT, 200, true);
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a, b.duplicate());
        b.add_weak(Object::WEIGHT, 100, true);
        assert_ne!(a, b);
        let objects: Vec<_> = b.objects().collect();
        assert_eq!(objects, [Object::FAMILY, Object::WEIGHT]);
    }

    #[test]
    fn hash_depends_on_binding() {
        let mut a = Pattern::new();
        a.add(Object::FAMILY, "Foo", true);
        let mut b = Pattern::new();
        b.add_weak(Object::FAMILY, "Foo", true);
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn filter_and_append() {
        let mut a = Pattern::new();
        a.add(Object::FAMILY, "Foo", true);
        a.add(Object::SIZE, 12.0, true);
        let f = a.filter(&[Object::FAMILY]);
        assert_eq!(f.len(), 1);
        let mut b = Pattern::new();
        b.add(Object::FAMILY, "Bar", true);
        b.append(&a);
        assert_eq!(b.get(Object::FAMILY).unwrap().len(), 2);
        assert_eq!(b.get_float(Object::SIZE, 0), Ok(12.0));
    }
}

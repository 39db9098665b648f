//! Ordered lists of bound values.

use super::value::{Binding, Value};
use smallvec::SmallVec;

/// A value with its binding.
#[derive(Clone, Debug)]
pub struct ValueElt {
    pub value: Value,
    pub binding: Binding,
}

impl ValueElt {
    pub fn new(value: Value, binding: Binding) -> Self {
        Self { value, binding }
    }

    pub fn strong(value: impl Into<Value>) -> Self {
        Self::new(value.into(), Binding::Strong)
    }

    pub fn weak(value: impl Into<Value>) -> Self {
        Self::new(value.into(), Binding::Weak)
    }
}

/// Ordered sequence of values associated with an object.
///
/// Most objects carry a single value so the first element is stored inline.
#[derive(Clone, Default, Debug)]
pub struct ValueList {
    elts: SmallVec<[ValueElt; 1]>,
}

impl ValueList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ValueElt> {
        self.elts.get(index)
    }

    pub fn first(&self) -> Option<&ValueElt> {
        self.elts.first()
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> core::slice::Iter<'_, ValueElt> {
        self.elts.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, ValueElt> {
        self.elts.iter_mut()
    }

    /// Returns an iterator over the values, ignoring bindings.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.elts.iter().map(|elt| &elt.value)
    }

    pub fn push(&mut self, elt: ValueElt) {
        self.elts.push(elt);
    }

    pub fn insert(&mut self, index: usize, elt: ValueElt) {
        self.elts.insert(index, elt);
    }

    /// Inserts all elements of `other` starting at `index`.
    pub fn insert_list(&mut self, index: usize, other: ValueList) {
        self.elts.insert_many(index, other.elts);
    }

    /// Appends all elements of `other`.
    pub fn append(&mut self, other: ValueList) {
        self.elts.extend(other.elts);
    }

    pub fn remove(&mut self, index: usize) -> ValueElt {
        self.elts.remove(index)
    }

    pub fn clear(&mut self) {
        self.elts.clear();
    }

    /// Keeps only the elements for which `f` returns true.
    pub fn retain(&mut self, mut f: impl FnMut(&ValueElt) -> bool) {
        self.elts.retain(|elt| f(elt));
    }

    /// Appends the hash of the list: binding and type tagged value of each
    /// element in order.
    pub fn hash_into(&self, out: &mut Vec<u8>) {
        for elt in &self.elts {
            out.push(elt.binding as u8);
            elt.value.hash_into(out);
        }
    }
}

impl<'a> IntoIterator for &'a ValueList {
    type Item = &'a ValueElt;
    type IntoIter = core::slice::Iter<'a, ValueElt>;

    fn into_iter(self) -> Self::IntoIter {
        self.elts.iter()
    }
}

impl FromIterator<ValueElt> for ValueList {
    fn from_iter<T: IntoIterator<Item = ValueElt>>(iter: T) -> Self {
        Self {
            elts: iter.into_iter().collect(),
        }
    }
}

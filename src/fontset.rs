//! Ordered collections of font patterns.

use super::pattern::Pattern;

/// Ordered list of font patterns.
#[derive(Clone, Default, Debug)]
pub struct FontSet {
    fonts: Vec<Pattern>,
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn push(&mut self, font: Pattern) {
        self.fonts.push(font);
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.fonts.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Pattern> {
        self.fonts.iter()
    }

    pub fn fonts(&self) -> &[Pattern] {
        &self.fonts
    }
}

impl Extend<Pattern> for FontSet {
    fn extend<T: IntoIterator<Item = Pattern>>(&mut self, iter: T) {
        self.fonts.extend(iter);
    }
}

impl FromIterator<Pattern> for FontSet {
    fn from_iter<T: IntoIterator<Item = Pattern>>(iter: T) -> Self {
        Self {
            fonts: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FontSet {
    type Item = Pattern;
    type IntoIter = std::vec::IntoIter<Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.fonts.into_iter()
    }
}

impl<'a> IntoIterator for &'a FontSet {
    type Item = &'a Pattern;
    type IntoIter = core::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.fonts.iter()
    }
}

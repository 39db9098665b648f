//! Sparse sets of Unicode code points.

use core::fmt;

/// A set of 256 code points sharing the same page, represented as a bitset.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Leaf {
    /// The bits in the set, all 256 of them.
    pub map: [u32; 8],
}

impl Leaf {
    /// Checks whether this leaf contains the given byte.
    pub fn contains_byte(&self, byte: u8) -> bool {
        let map_idx = (byte >> 5) as usize;
        let bit_idx = (byte & 0x1f) as u32;
        (self.map[map_idx] >> bit_idx) & 1 != 0
    }

    fn set(&mut self, byte: u8) {
        self.map[(byte >> 5) as usize] |= 1 << (byte & 0x1f);
    }

    fn clear(&mut self, byte: u8) {
        self.map[(byte >> 5) as usize] &= !(1 << (byte & 0x1f));
    }

    /// Returns the number of bytes in the leaf.
    pub fn count(&self) -> u32 {
        self.map.iter().map(|w| w.count_ones()).sum()
    }

    /// Returns true if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.map.iter().all(|w| *w == 0)
    }

    /// Returns the leaf as 32 little endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0; 32];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(&self.map) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Creates a leaf from 32 little endian bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut map = [0; 8];
        for (word, chunk) in map.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { map }
    }

    /// Creates an iterator over bits in this leaf.
    pub fn iter(self) -> LeafIter {
        LeafIter {
            leaf: self,
            map_idx: 0,
        }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(u32, u32) -> u32) -> Self {
        let mut map = [0; 8];
        for (i, word) in map.iter_mut().enumerate() {
            *word = f(self.map[i], other.map[i]);
        }
        Self { map }
    }
}

/// An iterator over bits in a [`Leaf`], created by [`Leaf::iter`].
#[derive(Clone, Debug)]
pub struct LeafIter {
    leaf: Leaf,
    map_idx: u8,
}

impl Iterator for LeafIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let len = self.leaf.map.len() as u8;
        while self.map_idx < len {
            let bits = &mut self.leaf.map[self.map_idx as usize];
            if *bits != 0 {
                let ret = bits.trailing_zeros() as u8;
                *bits &= !(1 << ret);
                return Some(ret + (self.map_idx << 5));
            }
            self.map_idx += 1;
        }
        None
    }
}

/// Largest code point a charset can hold.
pub const MAX_CHAR: u32 = 0x00FF_FFFF;

/// Set of Unicode code points.
///
/// The set is stored as a list of 256-bit leaves, each associated with the
/// page number formed by the upper 16 bits of the code points it holds.
/// Pages are kept sorted.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Charset {
    numbers: Vec<u16>,
    leaves: Vec<Leaf>,
}

impl Charset {
    /// Creates an empty charset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a code point. Returns false if it is out of range.
    pub fn add_char(&mut self, ch: u32) -> bool {
        if ch > MAX_CHAR {
            return false;
        }
        let page = (ch >> 8) as u16;
        let idx = match self.numbers.binary_search(&page) {
            Ok(idx) => idx,
            Err(idx) => {
                self.numbers.insert(idx, page);
                self.leaves.insert(idx, Leaf::default());
                idx
            }
        };
        self.leaves[idx].set(ch as u8);
        true
    }

    /// Removes a code point, dropping its page when it becomes empty.
    pub fn del_char(&mut self, ch: u32) {
        if ch > MAX_CHAR {
            return;
        }
        if let Ok(idx) = self.numbers.binary_search(&((ch >> 8) as u16)) {
            self.leaves[idx].clear(ch as u8);
            if self.leaves[idx].is_empty() {
                self.numbers.remove(idx);
                self.leaves.remove(idx);
            }
        }
    }

    /// Checks whether this charset contains a given code point.
    pub fn has_char(&self, ch: u32) -> bool {
        if ch > MAX_CHAR {
            return false;
        }
        match self.numbers.binary_search(&((ch >> 8) as u16)) {
            Ok(idx) => self.leaves[idx].contains_byte(ch as u8),
            Err(_) => false,
        }
    }

    /// Returns the number of code points in the set.
    pub fn len(&self) -> usize {
        self.leaves.iter().map(|leaf| leaf.count() as usize).sum()
    }

    /// Returns true if the set holds no code points.
    pub fn is_empty(&self) -> bool {
        self.leaves.iter().all(|leaf| leaf.is_empty())
    }

    /// Returns the sorted page numbers.
    pub fn numbers(&self) -> &[u16] {
        &self.numbers
    }

    /// Returns the leaves, parallel to [`numbers`](Self::numbers).
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Adds a whole leaf for `page`, merging with any existing bits.
    pub fn add_leaf(&mut self, page: u16, leaf: Leaf) {
        if leaf.is_empty() {
            return;
        }
        match self.numbers.binary_search(&page) {
            Ok(idx) => self.leaves[idx] = self.leaves[idx].zip_with(&leaf, |a, b| a | b),
            Err(idx) => {
                self.numbers.insert(idx, page);
                self.leaves.insert(idx, leaf);
            }
        }
    }

    /// Returns the code points in `self` or `other`.
    pub fn union(&self, other: &Self) -> Self {
        self.merge(other, true, true, |a, b| a | b)
    }

    /// Returns the code points in both `self` and `other`.
    pub fn intersect(&self, other: &Self) -> Self {
        self.merge(other, false, false, |a, b| a & b)
    }

    /// Returns the code points in `self` that are not in `other`.
    pub fn subtract(&self, other: &Self) -> Self {
        self.merge(other, true, false, |a, b| a & !b)
    }

    /// Returns the number of code points in `self` that are not in `other`.
    pub fn subtract_count(&self, other: &Self) -> usize {
        let mut count = 0;
        for (page, leaf) in self.numbers.iter().zip(&self.leaves) {
            match other.numbers.binary_search(page) {
                Ok(idx) => {
                    let o = &other.leaves[idx];
                    count += leaf
                        .map
                        .iter()
                        .zip(&o.map)
                        .map(|(a, b)| (a & !b).count_ones() as usize)
                        .sum::<usize>();
                }
                Err(_) => count += leaf.count() as usize,
            }
        }
        count
    }

    /// Returns the number of code points in both sets.
    pub fn intersect_count(&self, other: &Self) -> usize {
        self.len() - self.subtract_count(other)
    }

    /// Returns true if every code point of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.subtract_count(other) == 0
    }

    /// Returns true if both sets hold exactly the same code points.
    pub fn equal(&self, other: &Self) -> bool {
        self.numbers == other.numbers && self.leaves == other.leaves
    }

    /// Returns a byte representation that depends only on the set contents.
    pub fn hash(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.numbers.len() * 34);
        for (page, leaf) in self.numbers.iter().zip(&self.leaves) {
            out.extend_from_slice(&page.to_le_bytes());
            out.extend_from_slice(&leaf.to_bytes());
        }
        out
    }

    /// Returns an iterator over the code points in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.numbers
            .iter()
            .zip(&self.leaves)
            .flat_map(|(page, leaf)| {
                let base = (*page as u32) << 8;
                leaf.iter().map(move |lo| base | lo as u32)
            })
    }

    /// Page aligned merge of two sorted leaf lists. `keep_left` and
    /// `keep_right` control whether pages present in only one operand are
    /// retained.
    fn merge(
        &self,
        other: &Self,
        keep_left: bool,
        keep_right: bool,
        f: impl Fn(u32, u32) -> u32,
    ) -> Self {
        let mut result = Self::new();
        let (mut i, mut j) = (0, 0);
        let empty = Leaf::default();
        while i < self.numbers.len() || j < other.numbers.len() {
            let a = self.numbers.get(i).copied();
            let b = other.numbers.get(j).copied();
            let (page, leaf) = match (a, b) {
                (Some(a), Some(b)) if a == b => {
                    i += 1;
                    j += 1;
                    (a, self.leaves[i - 1].zip_with(&other.leaves[j - 1], &f))
                }
                (Some(a), b) if b.map_or(true, |b| a < b) => {
                    i += 1;
                    if !keep_left {
                        continue;
                    }
                    (a, self.leaves[i - 1].zip_with(&empty, &f))
                }
                (_, Some(b)) => {
                    j += 1;
                    if !keep_right {
                        continue;
                    }
                    (b, empty.zip_with(&other.leaves[j - 1], &f))
                }
                _ => break,
            };
            if !leaf.is_empty() {
                result.numbers.push(page);
                result.leaves.push(leaf);
            }
        }
        result
    }
}

impl FromIterator<u32> for Charset {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = Self::new();
        for ch in iter {
            set.add_char(ch);
        }
        set
    }
}

impl fmt::Display for Charset {
    /// Formats the set as space separated hex ranges.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = self.iter().peekable();
        let mut first = true;
        while let Some(start) = chars.next() {
            let mut end = start;
            while chars.peek() == Some(&(end + 1)) {
                end += 1;
                chars.next();
            }
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if start == end {
                write!(f, "{start:x}")?;
            } else {
                write!(f, "{start:x}-{end:x}")?;
            }
        }
        Ok(())
    }
}

//! Indexed read access shared by tries and plain buffers

use crate::element::Element;
use crate::{Error, Result, Transient, Trie};

/// Anything with a length and per-index reads of one element kind
///
/// Equality and hashing in [`ops`](crate::ops) work over any pair of
/// implementors; tries take a faster path when both sides are tries.
pub trait IndexedArray {
    type Elem: Element;

    /// Number of elements
    fn count(&self) -> usize;

    /// Element at `index`
    fn nth(&self, index: usize) -> Result<Self::Elem>;

    /// This array as a trie, when it is one
    fn as_trie(&self) -> Option<&Trie<Self::Elem>> {
        None
    }
}

impl<T: Element> IndexedArray for Trie<T> {
    type Elem = T;

    fn count(&self) -> usize {
        Trie::count(self)
    }

    fn nth(&self, index: usize) -> Result<T> {
        self.get(index)
    }

    fn as_trie(&self) -> Option<&Trie<T>> {
        Some(self)
    }
}

impl<T: Element> IndexedArray for Transient<T> {
    type Elem = T;

    fn count(&self) -> usize {
        Transient::count(self)
    }

    fn nth(&self, index: usize) -> Result<T> {
        self.get(index)
    }
}

impl<T: Element> IndexedArray for [T] {
    type Elem = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn nth(&self, index: usize) -> Result<T> {
        self.get(index).copied().ok_or(Error::OutOfBounds {
            index,
            count: self.len(),
        })
    }
}

impl<T: Element> IndexedArray for Vec<T> {
    type Elem = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn nth(&self, index: usize) -> Result<T> {
        self.as_slice().nth(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_reads() {
        let values = [3u8, 1, 4];
        let slice: &[u8] = &values;
        assert_eq!(slice.count(), 3);
        assert_eq!(slice.nth(2).unwrap(), 4);
        assert_eq!(
            slice.nth(3).unwrap_err(),
            Error::OutOfBounds { index: 3, count: 3 }
        );
    }

    #[test]
    fn test_trie_is_trie() {
        let trie = Trie::<i16>::create(2).unwrap();
        assert!(trie.as_trie().is_some());
        assert!(vec![0i16; 2].as_trie().is_none());
    }

    #[test]
    fn test_transient_reads() {
        let trie = Trie::<u32>::create(8).unwrap();
        let mut transient = trie.transient();
        transient.set(7, 70).unwrap();
        assert_eq!(IndexedArray::count(&transient), 8);
        assert_eq!(transient.nth(7).unwrap(), 70);
    }
}

//! Persistent array versions

use super::node::{count_to_shift, Node};
use super::Iter;
use crate::element::Element;
use crate::{Error, Result, MAX_COUNT};
use log::trace;
use std::fmt;
use std::sync::OnceLock;

/// An immutable fixed-length array of primitive elements
///
/// The shape of the tree depends only on `count`:
/// - `shift` is the number of index bits the tree spans, never less than
///   the leaf width
/// - levels are stacked from the leaves up, each internal level taking 5
///   bits; the root level takes whatever is left over
///
/// Updates return a new `Trie`; the receiver is never modified and keeps
/// sharing every untouched subtree with its successors.
#[derive(Clone)]
pub struct Trie<T: Element> {
    count: usize,
    shift: u32,
    pub(crate) root: Node<T>,
    pub(crate) hash: OnceLock<i32>,
}

impl<T: Element> Trie<T> {
    /// Create a zero-filled array of `count` elements
    ///
    /// Costs one allocation per level, independent of `count`.
    pub fn create(count: usize) -> Result<Self> {
        if count > MAX_COUNT {
            return Err(Error::InvalidArgument(format!(
                "count must be <= {}, got {}",
                MAX_COUNT, count
            )));
        }
        let shift = T::LEAF_SHIFT.max(count_to_shift(count));
        trace!("creating array of {} elements spanning {} bits", count, shift);
        Ok(Trie::from_parts(count, shift, Node::empty(shift)))
    }

    /// Create a zero-filled array from a signed length, as decoded from the wire
    pub fn with_len(len: i64) -> Result<Self> {
        let count = usize::try_from(len)
            .map_err(|_| Error::InvalidArgument(format!("count must be >= 0, got {}", len)))?;
        Trie::create(count)
    }

    /// Copy a flat buffer into a new array
    pub fn from_slice(values: &[T]) -> Result<Self> {
        let mut transient = Trie::create(values.len())?.transient();
        for (index, &value) in values.iter().enumerate() {
            // Zeros are already in place; skipping them keeps empty leaves shared
            if value != T::default() {
                transient.set(index, value)?;
            }
        }
        transient.freeze()
    }

    pub(crate) fn from_parts(count: usize, shift: u32, root: Node<T>) -> Self {
        Trie {
            count,
            shift,
            root,
            hash: OnceLock::new(),
        }
    }

    /// Number of elements
    pub fn count(&self) -> usize {
        self.count
    }

    /// Total index bits spanned by the tree
    pub fn shift(&self) -> u32 {
        self.shift
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the element at `index`
    pub fn get(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.root.lookup(self.shift, index))
    }

    /// Return a new array with `index` set to `value`
    ///
    /// Only the nodes on the path to `index` are copied.
    pub fn set(&self, index: usize, value: T) -> Result<Self> {
        self.check_index(index)?;
        let root = self.root.assoc(self.shift, index, value);
        Ok(Trie::from_parts(self.count, self.shift, root))
    }

    /// Iterate over the elements in index order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.count)
    }

    /// Copy the elements into a flat vector
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.count {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                index,
                count: self.count,
            })
        }
    }
}

impl<T: Element> Default for Trie<T> {
    fn default() -> Self {
        Trie::from_parts(0, T::LEAF_SHIFT, Node::empty(T::LEAF_SHIFT))
    }
}

impl<T: Element> fmt::Debug for Trie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("count", &self.count)
            .field("shift", &self.shift)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Element> IntoIterator for &'a Trie<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_width<T: Element>(trie: &Trie<T>) -> usize {
        match &trie.root {
            Node::Internal(children) => children.len(),
            Node::Leaf(_) => 0,
        }
    }

    #[test]
    fn test_create_is_zero_filled() {
        let trie = Trie::<i32>::create(1000).unwrap();
        assert_eq!(trie.count(), 1000);
        for i in 0..1000 {
            assert_eq!(trie.get(i).unwrap(), 0);
        }
    }

    #[test]
    fn test_shape_by_count() {
        let small = Trie::<u8>::create(4).unwrap();
        assert_eq!(small.shift(), 8);
        assert!(small.root.is_empty_leaf());

        let empty = Trie::<u8>::create(0).unwrap();
        assert_eq!(empty.shift(), 8);
        assert!(empty.is_empty());

        let two_leaves = Trie::<u8>::create(300).unwrap();
        assert_eq!(two_leaves.shift(), 9);
        assert_eq!(root_width(&two_leaves), 2);

        // 12 bits of ints: 6 leaf bits, then one level of 6 bits split 5 + 1
        let ints = Trie::<i32>::create(4096).unwrap();
        assert_eq!(ints.shift(), 12);
        assert_eq!(root_width(&ints), 2);
    }

    #[test]
    fn test_create_rejects_oversized() {
        let err = Trie::<u8>::create(MAX_COUNT + 1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_with_len_rejects_negative() {
        let err = Trie::<u16>::with_len(-1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(Trie::<u16>::with_len(10).unwrap().count(), 10);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let trie = Trie::<u8>::create(4).unwrap();
        assert_eq!(
            trie.get(4).unwrap_err(),
            Error::OutOfBounds { index: 4, count: 4 }
        );
        // Inside the leaf buffer but past the logical end
        assert!(trie.get(200).is_err());
    }

    #[test]
    fn test_set_leaves_receiver_unchanged() {
        let t0 = Trie::<u8>::create(4).unwrap();
        let t1 = t0.set(2, 42).unwrap();

        assert_eq!(t1.get(2).unwrap(), 42);
        assert_eq!(t1.get(0).unwrap(), 0);
        assert_eq!(t0.get(2).unwrap(), 0);
    }

    #[test]
    fn test_set_out_of_bounds_leaves_no_trace() {
        let t0 = Trie::<i32>::create(10).unwrap();
        assert!(t0.set(10, 1).is_err());
        assert!(t0.root.is_empty_leaf());
    }

    #[test]
    fn test_set_shares_siblings() {
        let t0 = Trie::<u16>::create(128 * 32).unwrap();
        let t1 = t0.set(130, 7).unwrap();

        let (Node::Internal(old), Node::Internal(new)) = (&t0.root, &t1.root) else {
            panic!("expected internal roots");
        };
        assert!(!old[1].ptr_eq(&new[1]));
        for slot in (0..32).filter(|&s| s != 1) {
            assert!(old[slot].ptr_eq(&new[slot]));
        }
        assert!(new[0].is_empty_leaf());
    }

    #[test]
    fn test_deep_updates() {
        let mut trie = Trie::<u8>::create(1 << 20).unwrap();
        for i in (0..1 << 20).step_by(4099) {
            trie = trie.set(i, (i % 251) as u8).unwrap();
        }
        for i in (0..1 << 20).step_by(4099) {
            assert_eq!(trie.get(i).unwrap(), (i % 251) as u8);
            assert_eq!(trie.get(i + 1).unwrap(), 0);
        }
    }

    #[test]
    fn test_from_slice() {
        let values: Vec<i32> = (0..200).map(|i| if i % 3 == 0 { 0 } else { i * 7 }).collect();
        let trie = Trie::from_slice(&values).unwrap();
        assert_eq!(trie.count(), 200);
        assert_eq!(trie.to_vec(), values);
    }

    #[test]
    fn test_from_slice_keeps_zero_leaves_shared() {
        let mut values = vec![0u8; 1024];
        values[3] = 1;
        let trie = Trie::from_slice(&values).unwrap();

        let Node::Internal(children) = &trie.root else {
            panic!("expected internal root");
        };
        assert!(!children[0].is_empty_leaf());
        assert!(children[1..].iter().all(|leaf| leaf.is_empty_leaf()));
    }

    #[test]
    fn test_default_is_empty() {
        let trie = Trie::<u64>::default();
        assert!(trie.is_empty());
        assert_eq!(trie.iter().count(), 0);
    }
}

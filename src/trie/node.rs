//! Trie node types

use crate::element::Element;
use crate::NODE_SHIFT;
use std::sync::Arc;

/// A node in the trie
///
/// Nodes are reference-counted handles, so cloning one shares the subtree.
/// Two nodes that point at the same allocation hold the same elements,
/// which lets equality and diff skip them without looking inside.
#[derive(Clone, Debug)]
pub(crate) enum Node<T: Element> {
    /// A full leaf of `1 << T::LEAF_SHIFT` elements
    Leaf(Arc<[T]>),
    /// Children of the next level down, a power of two of them
    Internal(Arc<[Node<T>]>),
}

impl<T: Element> Node<T> {
    /// Build the all-zero tree spanning `shift` bits
    ///
    /// Every level repeats one child handle, so this allocates one array
    /// per level and nothing per leaf.
    pub(crate) fn empty(shift: u32) -> Self {
        let mut node = Node::Leaf(T::empty_leaf());
        let mut level = shift - T::LEAF_SHIFT;
        while level != 0 {
            let delta = level.min(NODE_SHIFT);
            node = Node::Internal(vec![node; 1 << delta].into());
            level -= delta;
        }
        node
    }

    /// Whether both handles point at the same subtree
    #[inline]
    pub(crate) fn ptr_eq(&self, other: &Node<T>) -> bool {
        match (self, other) {
            (Node::Leaf(a), Node::Leaf(b)) => Arc::ptr_eq(a, b),
            (Node::Internal(a), Node::Internal(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Whether this is the canonical all-zero leaf of its kind
    pub(crate) fn is_empty_leaf(&self) -> bool {
        match self {
            Node::Leaf(buf) => Arc::ptr_eq(buf, T::zero_leaf()),
            Node::Internal(_) => false,
        }
    }

    /// Read the element at `index` from the subtree spanning `level` bits
    pub(crate) fn lookup(&self, mut level: u32, index: usize) -> T {
        let mut node = self;
        loop {
            match node {
                Node::Internal(children) => {
                    let (next, slot) = descend(level, children.len(), index);
                    level = next;
                    node = &children[slot];
                }
                Node::Leaf(buf) => return buf[index & leaf_mask::<T>()],
            }
        }
    }

    /// Copy the path to `index` and write `value` at its end
    pub(crate) fn assoc(&self, level: u32, index: usize, value: T) -> Node<T> {
        match self {
            Node::Internal(children) => {
                let (next, slot) = descend(level, children.len(), index);
                let mut copy = children.to_vec();
                copy[slot] = children[slot].assoc(next, index, value);
                Node::Internal(copy.into())
            }
            Node::Leaf(buf) => {
                let mut copy = buf.to_vec();
                copy[index & leaf_mask::<T>()] = value;
                Node::Leaf(copy.into())
            }
        }
    }
}

/// Number of index bits needed to address `count` elements
pub(crate) fn count_to_shift(count: usize) -> u32 {
    if count == 0 {
        0
    } else {
        usize::BITS - (count - 1).leading_zeros()
    }
}

/// Step from an internal array of `len` children at `level` towards `index`
///
/// Returns the level of the chosen child and its slot.
#[inline]
pub(crate) fn descend(level: u32, len: usize, index: usize) -> (u32, usize) {
    let next = level - len.trailing_zeros();
    (next, (index >> next) & (len - 1))
}

#[inline]
pub(crate) fn leaf_mask<T: Element>() -> usize {
    (1 << T::LEAF_SHIFT) - 1
}

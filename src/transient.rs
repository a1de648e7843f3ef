//! Transient sessions for bulk edits
//!
//! A [`Transient`] starts out sharing every node with the [`Trie`] it was
//! taken from. The first write that passes through a node copies it and
//! marks the copy as owned by the session; later writes through the same
//! node edit the copy in place. Each node is therefore copied at most once
//! per session, however many writes land under it.
//!
//! [`Transient::freeze`] strips the ownership marks and hands the tree
//! back as an ordinary immutable [`Trie`]. The session is dead afterwards:
//! every further call fails with [`Error::TransientFrozen`].
//!
//! A session needs `&mut` for every write, so it has exactly one writer at
//! a time. Moving it to another thread is fine; sharing it is not possible.

use crate::element::Element;
use crate::trie::node::{descend, leaf_mask, Node};
use crate::{Error, Result, Trie};
use log::debug;
use std::fmt;

/// A node as seen by a live session
enum Slot<T: Element> {
    /// Still shared with the source trie; copied on first write
    Shared(Node<T>),
    /// Private to this session
    Owned(Owned<T>),
}

/// A node copy that only the session can see
enum Owned<T: Element> {
    Leaf(Box<[T]>),
    Internal(Vec<Slot<T>>),
}

impl<T: Element> Owned<T> {
    fn copy_of(node: &Node<T>) -> Self {
        match node {
            Node::Leaf(buf) => Owned::Leaf(buf.to_vec().into_boxed_slice()),
            Node::Internal(children) => {
                Owned::Internal(children.iter().cloned().map(Slot::Shared).collect())
            }
        }
    }
}

impl<T: Element> Slot<T> {
    /// Turn the slot into an owned node, copying it if it is still shared
    fn claim(&mut self, claimed: &mut usize) -> &mut Owned<T> {
        if let Slot::Shared(node) = self {
            let owned = Owned::copy_of(node);
            *self = Slot::Owned(owned);
            *claimed += 1;
        }
        match self {
            Slot::Owned(owned) => owned,
            Slot::Shared(_) => unreachable!("slot was claimed above"),
        }
    }

    fn lookup(&self, mut level: u32, index: usize) -> T {
        let mut slot = self;
        loop {
            match slot {
                Slot::Shared(node) => return node.lookup(level, index),
                Slot::Owned(Owned::Internal(children)) => {
                    let (next, child) = descend(level, children.len(), index);
                    level = next;
                    slot = &children[child];
                }
                Slot::Owned(Owned::Leaf(buf)) => return buf[index & leaf_mask::<T>()],
            }
        }
    }

    /// Strip ownership marks, yielding a plain shareable node
    fn into_node(self) -> Node<T> {
        match self {
            Slot::Shared(node) => node,
            Slot::Owned(Owned::Leaf(buf)) => Node::Leaf(buf.into()),
            Slot::Owned(Owned::Internal(children)) => {
                Node::Internal(children.into_iter().map(Slot::into_node).collect())
            }
        }
    }
}

/// A single-owner mutable view over a [`Trie`]
pub struct Transient<T: Element> {
    count: usize,
    shift: u32,
    /// `None` once frozen
    root: Option<Slot<T>>,
    claimed: usize,
}

impl<T: Element> fmt::Debug for Transient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transient")
            .field("count", &self.count)
            .field("frozen", &self.is_frozen())
            .field("claimed", &self.claimed)
            .finish_non_exhaustive()
    }
}

impl<T: Element> Trie<T> {
    /// Begin a transient session over this array
    ///
    /// Nothing is copied up front; the array itself is never modified.
    pub fn transient(&self) -> Transient<T> {
        Transient {
            count: self.count(),
            shift: self.shift(),
            root: Some(Slot::Shared(self.root.clone())),
            claimed: 0,
        }
    }
}

impl<T: Element> Transient<T> {
    /// Number of elements
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether [`freeze`](Transient::freeze) has been called
    pub fn is_frozen(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes this session has copied so far
    pub fn claimed_nodes(&self) -> usize {
        self.claimed
    }

    /// Get the element at `index`, including writes made by this session
    pub fn get(&self, index: usize) -> Result<T> {
        let root = self.root.as_ref().ok_or(Error::TransientFrozen)?;
        self.check_index(index)?;
        Ok(root.lookup(self.shift, index))
    }

    /// Set the element at `index` in place
    ///
    /// Returns the session so that writes can be chained.
    pub fn set(&mut self, index: usize, value: T) -> Result<&mut Self> {
        let count = self.count;
        let mut slot = self.root.as_mut().ok_or(Error::TransientFrozen)?;
        if index >= count {
            return Err(Error::OutOfBounds { index, count });
        }

        let mut level = self.shift;
        loop {
            match slot.claim(&mut self.claimed) {
                Owned::Internal(children) => {
                    let (next, child) = descend(level, children.len(), index);
                    level = next;
                    slot = &mut children[child];
                }
                Owned::Leaf(buf) => {
                    buf[index & leaf_mask::<T>()] = value;
                    break;
                }
            }
        }
        Ok(self)
    }

    /// End the session and return the edited array
    ///
    /// Fails with [`Error::TransientFrozen`] if the session was already frozen.
    pub fn freeze(&mut self) -> Result<Trie<T>> {
        let root = self.root.take().ok_or(Error::TransientFrozen)?;
        debug!(
            "froze transient of {} elements, {} nodes claimed",
            self.count, self.claimed
        );
        Ok(Trie::from_parts(self.count, self.shift, root.into_node()))
    }

    fn check_index(&self, index: usize) -> Result<()> {
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

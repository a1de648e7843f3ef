//! Structural equality and hashing
//!
//! Two arrays are equal when they have the same count and the same
//! elements in index order. Between two tries, subtrees that are the same
//! allocation are equal without being read, so comparing a trie with a
//! lightly edited copy only looks at the edited paths.

use crate::array::IndexedArray;
use crate::element::Element;
use crate::trie::node::Node;
use crate::{Result, Trie};
use std::hash::{Hash, Hasher};

#[cfg(test)]
thread_local! {
    /// Nodes compared by `nodes_equal` on this thread
    static NODE_VISITS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Element-wise equality between any two indexed arrays
///
/// Fails with the first error a read returns, such as
/// [`Error::TransientFrozen`](crate::Error::TransientFrozen) for a session
/// that was already frozen.
pub fn elements_equal<A, B>(a: &A, b: &B) -> Result<bool>
where
    A: IndexedArray + ?Sized,
    B: IndexedArray<Elem = A::Elem> + ?Sized,
{
    let count = a.count();
    if count != b.count() {
        return Ok(false);
    }
    for i in 0..count {
        if a.nth(i)? != b.nth(i)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Polynomial hash of the elements in index order
///
/// `fold(31 * acc + term, 1)` with wrapping `i32` arithmetic, so arrays that
/// are [`elements_equal`] hash alike whatever their representation. Read
/// errors are returned, never folded in.
pub fn hash_elements<A: IndexedArray + ?Sized>(array: &A) -> Result<i32> {
    (0..array.count()).try_fold(1, |acc, i| Ok(fold_term(acc, array.nth(i)?)))
}

#[inline]
fn fold_term<T: Element>(acc: i32, value: T) -> i32 {
    acc.wrapping_mul(31).wrapping_add(value.hash_term())
}

fn nodes_equal<T: Element>(a: &Node<T>, b: &Node<T>) -> bool {
    #[cfg(test)]
    NODE_VISITS.with(|visits| visits.set(visits.get() + 1));

    if a.ptr_eq(b) {
        return true;
    }
    match (a, b) {
        (Node::Internal(x), Node::Internal(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| nodes_equal(l, r))
        }
        (Node::Leaf(x), Node::Leaf(y)) => x == y,
        _ => false,
    }
}

impl<T: Element> Trie<T> {
    /// Memoized hash of the elements, see [`hash_elements`]
    pub fn hash_code(&self) -> i32 {
        *self.hash.get_or_init(|| self.iter().fold(1, fold_term))
    }

    /// Compare against any indexed array
    ///
    /// Uses the shared-subtree fast path when `other` is a trie.
    pub fn equals_indexed<A>(&self, other: &A) -> Result<bool>
    where
        A: IndexedArray<Elem = T> + ?Sized,
    {
        match other.as_trie() {
            Some(trie) => Ok(self == trie),
            None => elements_equal(self, other),
        }
    }
}

impl<T: Element> PartialEq for Trie<T> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.count() != other.count() {
            return false;
        }
        if let (Some(a), Some(b)) = (self.hash.get(), other.hash.get()) {
            if a != b {
                return false;
            }
        }
        nodes_equal(&self.root, &other.root)
    }
}

impl<T: Element> Eq for Trie<T> {}

impl<T: Element> Hash for Trie<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl<T: Element> PartialEq<[T]> for Trie<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.count() == other.len() && self.iter().eq(other.iter().copied())
    }
}

impl<T: Element> PartialEq<Vec<T>> for Trie<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self == other.as_slice()
    }
}

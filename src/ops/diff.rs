//! Diff operations between array versions

use crate::element::Element;
use crate::trie::node::Node;
use crate::{Error, Result, Trie};
use log::{debug, trace};

#[cfg(test)]
thread_local! {
    /// Nodes entered by `diff_nodes` on this thread
    static NODE_VISITS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// A single changed element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffEntry<T> {
    pub index: usize,
    pub old: T,
    pub new: T,
}

/// The changes between two array versions, in index order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diff<T> {
    pub entries: Vec<DiffEntry<T>>,
}

impl<T> Diff<T> {
    pub fn new(entries: Vec<DiffEntry<T>>) -> Self {
        Diff { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiffEntry<T>> {
        self.entries.iter()
    }
}

/// Report every index where `old` and `new` hold different elements
///
/// Subtrees shared by both versions are skipped without being read, so
/// the cost follows the number of changed leaves rather than the count.
/// Differences arrive in ascending index order.
pub fn diff<T, F>(old: &Trie<T>, new: &Trie<T>, mut on_difference: F) -> Result<()>
where
    T: Element,
    F: FnMut(usize, T, T),
{
    if old.count() != new.count() {
        return Err(Error::SizeMismatch {
            left: old.count(),
            right: new.count(),
        });
    }

    let mut reported = 0usize;
    let mut counting = |index: usize, a: T, b: T| {
        reported += 1;
        on_difference(index, a, b);
    };
    diff_nodes(0, old.shift(), &old.root, &new.root, &mut counting);

    debug!(
        "diffed arrays of {} elements: {} differences",
        old.count(),
        reported
    );
    Ok(())
}

/// Collect the differences between two versions
pub fn diff_entries<T: Element>(old: &Trie<T>, new: &Trie<T>) -> Result<Diff<T>> {
    let mut entries = Vec::new();
    diff(old, new, |index, from, to| {
        entries.push(DiffEntry {
            index,
            old: from,
            new: to,
        });
    })?;
    Ok(Diff::new(entries))
}

fn diff_nodes<T, F>(base: usize, level: u32, old: &Node<T>, new: &Node<T>, on_difference: &mut F)
where
    T: Element,
    F: FnMut(usize, T, T),
{
    #[cfg(test)]
    NODE_VISITS.with(|visits| visits.set(visits.get() + 1));

    if old.ptr_eq(new) {
        trace!("skipping shared subtree at {}", base);
        return;
    }
    match (old, new) {
        (Node::Internal(a), Node::Internal(b)) => {
            let level = level - a.len().trailing_zeros();
            let span = 1usize << level;
            for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
                diff_nodes(base + i * span, level, x, y, on_difference);
            }
        }
        (Node::Leaf(a), Node::Leaf(b)) => {
            for (i, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
                if x != y {
                    on_difference(base + i, x, y);
                }
            }
        }
        _ => unreachable!("arrays of equal count share one shape"),
    }
}

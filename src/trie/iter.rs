//! In-order element iteration

use super::node::Node;
use crate::element::Element;
use std::iter::FusedIterator;

/// Iterator over the elements of a [`Trie`](super::Trie) in index order
///
/// Walks the tree leaf by leaf with an explicit stack, so each step is
/// O(1) amortized.
pub struct Iter<'a, T: Element> {
    /// Internal arrays being walked, with the next child to visit in each
    stack: Vec<(&'a [Node<T>], usize)>,
    leaf: &'a [T],
    pos: usize,
    remaining: usize,
}

impl<'a, T: Element> Iter<'a, T> {
    pub(crate) fn new(root: &'a Node<T>, count: usize) -> Self {
        match root {
            Node::Leaf(buf) => Iter {
                stack: Vec::new(),
                leaf: &buf[..],
                pos: 0,
                remaining: count,
            },
            Node::Internal(children) => Iter {
                stack: vec![(&children[..], 0)],
                leaf: &[],
                pos: 0,
                remaining: count,
            },
        }
    }

    fn advance_leaf(&mut self) -> Option<()> {
        loop {
            let top = self.stack.last_mut()?;
            let nodes: &'a [Node<T>] = top.0;
            if top.1 == nodes.len() {
                self.stack.pop();
                continue;
            }
            let child = &nodes[top.1];
            top.1 += 1;
            match child {
                Node::Leaf(buf) => {
                    self.leaf = &buf[..];
                    self.pos = 0;
                    return Some(());
                }
                Node::Internal(children) => self.stack.push((&children[..], 0)),
            }
        }
    }
}

impl<'a, T: Element> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        if self.pos == self.leaf.len() {
            self.advance_leaf()?;
        }
        let value = self.leaf[self.pos];
        self.pos += 1;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Element> ExactSizeIterator for Iter<'_, T> {}

impl<T: Element> FusedIterator for Iter<'_, T> {}

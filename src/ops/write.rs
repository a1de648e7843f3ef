//! Wire output: elements in index order, big-endian

use crate::element::Element;
use crate::trie::node::Node;
use crate::Trie;
use bytes::{BufMut, Bytes, BytesMut};

impl<T: Element> Trie<T> {
    /// Number of bytes [`write_to`](Trie::write_to) produces
    pub fn encoded_len(&self) -> usize {
        self.count() * T::WIDTH
    }

    /// Write the elements to `buf` in index order
    ///
    /// Writes exactly [`encoded_len`](Trie::encoded_len) bytes. Untouched
    /// leaves are emitted as zero runs without reading a buffer. Framing
    /// and encryption are the caller's business.
    ///
    /// # Panics
    ///
    /// If `buf` cannot take `encoded_len()` more bytes, as for any
    /// [`BufMut`] overflow.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        write_node(&self.root, self.count(), buf);
    }

    /// Encode into a fresh buffer
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.write_to(&mut buf);
        buf.freeze()
    }
}

/// Write at most `limit` elements of `node`, returning how many were written
fn write_node<T: Element, B: BufMut>(node: &Node<T>, limit: usize, buf: &mut B) -> usize {
    match node {
        Node::Internal(children) => {
            let mut written = 0;
            for child in children.iter() {
                if written == limit {
                    break;
                }
                written += write_node(child, limit - written, buf);
            }
            written
        }
        Node::Leaf(elements) => {
            let n = elements.len().min(limit);
            if node.is_empty_leaf() {
                buf.put_bytes(0, n * T::WIDTH);
            } else {
                for &value in &elements[..n] {
                    value.put(buf);
                }
            }
            n
        }
    }
}

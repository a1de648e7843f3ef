//! Bit-partitioned trie backing every persistent array
//!
//! This implements a fixed-shape trie where:
//! - Leaves hold a flat buffer of elements
//! - Internal nodes hold up to 32 children, selected by 5-bit slices of the index
//! - Untouched subtrees are shared, both inside one array and across versions

mod iter;
pub(crate) mod node;
#[cfg(feature = "serde")]
mod serde_impl;
mod tree;

pub use iter::Iter;
pub use tree::Trie;

//! # persistent_arrays
//!
//! Fixed-length arrays of primitive elements with cheap immutable updates.
//!
//! Each array is a bit-partitioned trie: leaves hold a flat buffer of
//! elements, internal nodes hold up to 32 children. Updating an element
//! copies only the path from the root to its leaf; every other subtree is
//! shared with the previous version, so old versions stay valid and two
//! versions of the same array can be compared or diffed in time
//! proportional to what actually changed.
//!
//! ## Core Concepts
//!
//! - **Trie**: an immutable array version ([`Trie`], [`ByteArray`], ...)
//! - **Transient**: a single-owner session for bulk edits, frozen back
//!   into a new [`Trie`]
//! - **Diff**: the `(index, old, new)` triples separating two versions
//! - **Wire form**: the elements in index order, big-endian, via
//!   [`Trie::write_to`]
//!
//! ## Example
//!
//! ```
//! use persistent_arrays::{diff_entries, ByteArray};
//!
//! let base = ByteArray::create(4096)?;
//! let next = base.set(17, 3)?;
//!
//! assert_eq!(base.get(17)?, 0);
//! assert_eq!(next.get(17)?, 3);
//!
//! let diff = diff_entries(&base, &next)?;
//! assert_eq!(diff.len(), 1);
//! # Ok::<(), persistent_arrays::Error>(())
//! ```

pub mod array;
pub mod element;
pub mod ops;
pub mod transient;
pub mod trie;

mod error;

pub use array::IndexedArray;
pub use element::Element;
pub use error::{Error, Result};
pub use ops::{diff, diff_entries, elements_equal, hash_elements, Diff, DiffEntry};
pub use transient::Transient;
pub use trie::{Iter, Trie};

/// Crate format version
pub const VERSION: u32 = 1;

/// Bits consumed by each internal level of a trie (branching factor 32)
pub const NODE_SHIFT: u32 = 5;

/// Byte footprint of every leaf, whatever the element width
pub const LEAF_BYTES: usize = 256;

/// Largest element count a trie can be created with
pub const MAX_COUNT: usize = i32::MAX as usize;

/// Array of 8-bit bytes (256 elements per leaf)
pub type ByteArray = Trie<u8>;

/// Array of 16-bit character units (128 elements per leaf)
pub type CharArray = Trie<u16>;

/// Array of 32-bit integers (64 elements per leaf)
pub type IntArray = Trie<i32>;

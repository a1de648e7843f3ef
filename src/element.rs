//! Element kinds that can be stored in a trie

use crate::LEAF_BYTES;
use bytes::BufMut;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

/// A fixed-width primitive that a [`Trie`](crate::Trie) can hold.
///
/// Each kind fixes its leaf width so that a leaf always occupies
/// [`LEAF_BYTES`] bytes: 256 bytes, 128 16-bit units, 64 32-bit ints and
/// so on. The zero value is `Default::default()`.
pub trait Element: Copy + Eq + Default + Debug + Send + Sync + 'static {
    /// `log2` of the number of elements in a leaf
    const LEAF_SHIFT: u32;

    /// Bytes per element in the wire form
    const WIDTH: usize = std::mem::size_of::<Self>();

    /// The canonical all-zero leaf shared by every trie of this kind
    fn zero_leaf() -> &'static Arc<[Self]>;

    /// A new handle to [`zero_leaf`](Element::zero_leaf)
    fn empty_leaf() -> Arc<[Self]> {
        Arc::clone(Self::zero_leaf())
    }

    /// Write this element big-endian
    fn put<B: BufMut>(self, buf: &mut B);

    /// Term folded into the polynomial array hash
    fn hash_term(self) -> i32;
}

macro_rules! impl_element {
    ($ty:ty, $put:ident, |$v:ident| $term:expr) => {
        impl Element for $ty {
            const LEAF_SHIFT: u32 = (LEAF_BYTES / std::mem::size_of::<$ty>()).trailing_zeros();

            fn zero_leaf() -> &'static Arc<[Self]> {
                static EMPTY: OnceLock<Arc<[$ty]>> = OnceLock::new();
                EMPTY.get_or_init(|| vec![0; 1 << Self::LEAF_SHIFT].into())
            }

            #[inline]
            fn put<B: BufMut>(self, buf: &mut B) {
                buf.$put(self);
            }

            #[inline]
            fn hash_term(self) -> i32 {
                let $v = self;
                $term
            }
        }
    };
}

// Unsigned kinds zero-extend, signed kinds sign-extend.
impl_element!(u8, put_u8, |v| v as i32);
impl_element!(i8, put_i8, |v| v as i32);
impl_element!(u16, put_u16, |v| v as i32);
impl_element!(i16, put_i16, |v| v as i32);
impl_element!(u32, put_u32, |v| v as i32);
impl_element!(i32, put_i32, |v| v);
impl_element!(u64, put_u64, |v| (v ^ (v >> 32)) as i32);
impl_element!(i64, put_i64, |v| (v ^ ((v as u64) >> 32) as i64) as i32);

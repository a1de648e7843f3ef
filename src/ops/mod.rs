//! Operations over array versions: equality, hashing, diff, wire output

mod diff;
mod equality;
mod write;

pub use diff::{diff, diff_entries, Diff, DiffEntry};
pub use equality::{elements_equal, hash_elements};

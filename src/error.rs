//! Error types for persistent_arrays

use thiserror::Error;

/// Result type alias for persistent_arrays operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in persistent_arrays operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index {index} out of bounds for length {count}")]
    OutOfBounds { index: usize, count: usize },

    #[error("Cannot diff arrays of different sizes: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("Transient used after freeze")]
    TransientFrozen,
}

impl Error {
    /// Whether this error signals a caller bug rather than bad input.
    ///
    /// Protocol violations are not meant to be recovered from; callers
    /// should treat them like a failed assertion.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Error::TransientFrozen)
    }
}

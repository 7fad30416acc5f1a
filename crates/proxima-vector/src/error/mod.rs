//! Error types for the vector crate.

use thiserror::Error;

/// Errors that can occur in vector operations.
///
/// Every variant except [`VectorError::LockPoisoned`] describes malformed
/// input and is reported by [`VectorError::is_invalid_input`]. Such errors are
/// returned to the caller and never corrected.
#[derive(Debug, Error)]
pub enum VectorError {
    /// Dimension mismatch between a vector and the index it is used with.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// Invalid dimension (e.g., zero).
    #[error("invalid dimension: expected at least {expected}, got {actual}")]
    InvalidDimension {
        /// The minimum expected dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// Invalid value in a vector (NaN, Infinity).
    #[error("invalid value at index {index}: {value} - {reason}")]
    InvalidValue {
        /// The index of the invalid value.
        index: usize,
        /// The invalid value.
        value: f32,
        /// The reason the value is invalid.
        reason: &'static str,
    },

    /// An index was requested over an empty catalog.
    #[error("cannot build an index from an empty set of vectors")]
    EmptyInput,

    /// A similarity query asked for zero neighbors.
    #[error("invalid neighbor count: k must be at least 1")]
    InvalidK,

    /// Lock poisoned - a writer panicked while holding the index handle.
    #[error("index handle corrupted: lock poisoned due to prior panic in another thread")]
    LockPoisoned,
}

impl VectorError {
    /// Whether this error reports malformed caller input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::LockPoisoned)
    }
}

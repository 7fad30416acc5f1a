//! Error types for the interaction crate.

use thiserror::Error;

/// Errors that can occur in interaction store operations.
///
/// Only structural problems are errors. Writing for an unknown user or
/// registering past capacity are soft conditions reported through
/// [`WriteOutcome`](crate::WriteOutcome) and
/// [`Registration`](crate::Registration) instead.
#[derive(Debug, Error)]
pub enum InteractionError {
    /// Item id outside the matrix's columns.
    #[error("item {item} out of range: store has {num_items} items")]
    ItemOutOfRange {
        /// The requested item id.
        item: usize,
        /// The number of item columns (exclusive upper bound).
        num_items: usize,
    },

    /// A store dimension was zero.
    #[error("invalid capacity: {param} must be greater than 0, got {value}")]
    InvalidCapacity {
        /// The parameter name.
        param: &'static str,
        /// The provided value.
        value: usize,
    },

    /// Lock poisoned - a writer panicked while holding the store.
    ///
    /// The store may have been observed mid-update and should be discarded.
    #[error("interaction store corrupted: lock poisoned due to prior panic in another thread")]
    LockPoisoned,
}

impl InteractionError {
    /// Whether this error reports malformed caller input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::ItemOutOfRange { .. } | Self::InvalidCapacity { .. })
    }
}

//! Error types for Proxima.
//!
//! This module provides the [`enum@Error`] type returned by the
//! [`Recommender`](crate::Recommender) facade.

use thiserror::Error;

use proxima_interaction::InteractionError;
use proxima_vector::VectorError;

/// Errors that can occur when using Proxima.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Config(String),

    /// A spatial index operation failed.
    #[error("vector error: {0}")]
    Vector(#[from] VectorError),

    /// An interaction store operation failed.
    #[error("interaction error: {0}")]
    Interaction(#[from] InteractionError),
}

impl Error {
    /// Whether this error reports malformed caller input rather than an
    /// internal failure.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Vector(e) => e.is_invalid_input(),
            Self::Interaction(e) => e.is_invalid_input(),
        }
    }
}

/// A specialized Result type for Proxima operations.
pub type Result<T> = std::result::Result<T, Error>;

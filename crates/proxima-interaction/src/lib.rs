//! Proxima Interaction
//!
//! A dense user × item matrix of interaction values (ratings, clicks, dwell
//! time) with explicit user registration.
//!
//! # Overview
//!
//! - [`InteractionStore`] - the matrix plus the user-to-row map
//! - [`SharedInteractionStore`] - the same behind one reader-writer lock
//! - [`SlotMap`] - bounded, append-only assignment of users to rows
//! - [`DenseMatrix`] - row-major `f64` storage
//!
//! # Soft failures
//!
//! Registering past capacity and writing for an unregistered user are not
//! errors. They return [`Registration::CapacityExceeded`] and
//! [`WriteOutcome::UnknownUser`], log a warning, and leave the store
//! unchanged. Malformed input (an item id past the last column, a zero-sized
//! store) is an [`InteractionError`].
//!
//! Reads for an unregistered user return `0.0`, the same as a registered user
//! with nothing recorded. Call [`InteractionStore::has_user`] to distinguish.

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod matrix;
pub mod shared;
pub mod slots;
pub mod store;

pub use error::InteractionError;
pub use matrix::{DenseMatrix, NO_INTERACTION};
pub use shared::SharedInteractionStore;
pub use slots::{Registration, SlotMap};
pub use store::{InteractionStore, WriteOutcome};

//! Proxima Core
//!
//! Shared identifiers and result types used across the Proxima crates.
//!
//! # Overview
//!
//! - **Identifiers**: [`ItemId`] for catalog items and [`UserSlot`] for rows of
//!   the interaction matrix
//! - **Results**: [`Neighbor`], an item paired with its distance to a query
//!
//! Item ids are positions in the catalog: the vector at position `i` of the
//! sequence a spatial index is built from is item `i`, and item `i` is column
//! `i` of the interaction matrix. That correspondence is a caller contract.
//!
//! # Example
//!
//! ```
//! use proxima_core::{ItemId, Neighbor};
//!
//! let hit = Neighbor::new(ItemId::new(3), 0.25);
//! assert_eq!(hit.item.as_usize(), 3);
//! ```

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod types;

pub use types::{ItemId, Neighbor, UserSlot};

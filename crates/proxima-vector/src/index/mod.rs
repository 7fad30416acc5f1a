//! Spatial indexes for exact nearest-neighbor search.
//!
//! This module provides a balanced k-d tree ([`SpatialIndex`]) built once
//! over a catalog of feature vectors, and an [`IndexHandle`] for swapping in
//! a rebuilt index while queries keep running.
//!
//! # Overview
//!
//! - **Exact** - results equal a brute-force scan, ties broken by item id
//! - **Immutable** - no insert or delete; rebuild to reflect catalog changes
//! - **Lock-free reads** - an index is `Send + Sync` and queried through `&self`
//!
//! # Configuration Parameters
//!
//! - **`split_rule`**: how each node picks its split axis ([`SplitRule`])
//!
//! # Example
//!
//! ```
//! use proxima_vector::index::{SpatialIndex, SpatialIndexConfig, SplitRule};
//!
//! let rows = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0]];
//! let config = SpatialIndexConfig::new().with_split_rule(SplitRule::Cyclic);
//! let index = SpatialIndex::from_rows(rows, config)?;
//!
//! let hits = index.find_similar(&[0.9, 0.8], 1)?;
//! assert_eq!(hits[0].item.as_usize(), 1);
//! # Ok::<(), proxima_vector::VectorError>(())
//! ```

pub(crate) mod candidate;
mod config;
mod handle;
mod kdtree;

pub use config::{SpatialIndexConfig, SplitRule};
pub use handle::IndexHandle;
pub use kdtree::SpatialIndex;

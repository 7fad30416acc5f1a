//! Proxima Vector
//!
//! Item feature vectors and exact nearest-neighbor search over them.
//!
//! # Overview
//!
//! - **Feature vectors**: validated, fixed-dimension `f32` vectors ([`FeatureVector`])
//! - **Spatial index**: a balanced k-d tree answering k-NN queries ([`SpatialIndex`])
//! - **Hot swap**: replace the index on catalog changes ([`IndexHandle`])
//! - **Distance functions**: SIMD and scalar Euclidean kernels
//!
//! # Example
//!
//! ```
//! use proxima_vector::{FeatureVector, SpatialIndex};
//!
//! let catalog = vec![
//!     FeatureVector::new(vec![1.0, 0.5])?,
//!     FeatureVector::new(vec![0.9, 0.4])?,
//!     FeatureVector::new(vec![0.8, 0.3])?,
//! ];
//! let index = SpatialIndex::build(catalog)?;
//!
//! for hit in index.find_similar(&[1.0, 0.6], 2)? {
//!     println!("item {} at distance {}", hit.item, hit.distance);
//! }
//! # Ok::<(), proxima_vector::VectorError>(())
//! ```
//!
//! # Modules
//!
//! - [`types`] - [`FeatureVector`]
//! - [`distance`] - Distance functions
//! - [`error`] - Error types
//! - [`index`] - Spatial index and handle
//! - [`ops`] - Brute-force search ([`ExactKnn`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod distance;
pub mod error;
pub mod index;
pub mod ops;
pub mod types;

pub use error::VectorError;
pub use index::{IndexHandle, SpatialIndex, SpatialIndexConfig, SplitRule};
pub use ops::ExactKnn;
pub use types::FeatureVector;

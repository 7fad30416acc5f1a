//! Proxima
//!
//! Content-based item similarity search and user interaction tracking, the
//! two in-memory building blocks of a recommendation pipeline.
//!
//! # Features
//!
//! - **Similarity search**: exact k-nearest-neighbor queries over item feature
//!   vectors through a balanced k-d tree
//! - **Interaction tracking**: a bounded user × item matrix with explicit,
//!   append-only user registration
//! - **Hot swap**: rebuild the index on catalog changes while queries run
//!
//! # Example
//!
//! ```
//! use proxima::{FeatureVector, ItemId, Recommender};
//!
//! let catalog = vec![
//!     FeatureVector::new(vec![1.0, 0.5])?,
//!     FeatureVector::new(vec![0.9, 0.4])?,
//!     FeatureVector::new(vec![0.8, 0.3])?,
//! ];
//! let recommender = Recommender::<String>::builder()
//!     .with_catalog(catalog)
//!     .capacity_users(5)
//!     .build()?;
//!
//! let hits = recommender.find_similar(&[1.0, 0.6], 2)?;
//! assert_eq!(hits[0].item, ItemId::new(0));
//!
//! let _ = recommender.register_user("B".to_string())?;
//! let _ = recommender.update_interaction("B", ItemId::new(2), 4.5)?;
//! assert_eq!(recommender.get_interaction("B", ItemId::new(2))?, 4.5);
//! # Ok::<(), proxima::Error>(())
//! ```
//!
//! The component crates are re-exported for callers that only need one half:
//! [`SpatialIndex`] and [`InteractionStore`] work standalone.

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod builder;
pub mod config;
pub mod error;
pub mod recommender;

pub use builder::RecommenderBuilder;
pub use config::RecommenderConfig;
pub use error::{Error, Result};
pub use recommender::{Recommendation, Recommender};

// Re-export component types
pub use proxima_core::{ItemId, Neighbor, UserSlot};
pub use proxima_interaction::{
    InteractionError, InteractionStore, Registration, SharedInteractionStore, WriteOutcome,
    NO_INTERACTION,
};
pub use proxima_vector::{
    ExactKnn, FeatureVector, IndexHandle, SpatialIndex, SpatialIndexConfig, SplitRule, VectorError,
};

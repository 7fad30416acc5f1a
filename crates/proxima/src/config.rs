//! Recommender configuration.

use serde::{Deserialize, Serialize};

use proxima_vector::{SpatialIndexConfig, SplitRule};

use crate::error::{Error, Result};

/// Number of neighbors returned when the caller does not say.
pub const DEFAULT_K: usize = 5;

/// Number of user slots when the caller does not say.
pub const DEFAULT_CAPACITY_USERS: usize = 1_000;

/// Configuration for a [`Recommender`](crate::Recommender).
///
/// Deserializable so it can live in an application's config file:
///
/// ```
/// use proxima::RecommenderConfig;
///
/// let config: RecommenderConfig = serde_json::from_str(
///     r#"{ "capacity_users": 5, "default_k": 2, "index": { "split_rule": "cyclic" } }"#,
/// ).unwrap();
/// assert_eq!(config.capacity_users, 5);
/// assert_eq!(config.num_items, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Maximum number of users the interaction store can register.
    #[serde(default = "default_capacity_users")]
    pub capacity_users: usize,

    /// Number of item columns in the interaction store.
    /// If `None`, the size of the initial catalog is used.
    #[serde(default)]
    pub num_items: Option<usize>,

    /// Neighbors returned by [`find_similar_default`](crate::Recommender::find_similar_default).
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Spatial index parameters.
    #[serde(default)]
    pub index: SpatialIndexConfig,
}

fn default_capacity_users() -> usize {
    DEFAULT_CAPACITY_USERS
}

fn default_k() -> usize {
    DEFAULT_K
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            capacity_users: DEFAULT_CAPACITY_USERS,
            num_items: None,
            default_k: DEFAULT_K,
            index: SpatialIndexConfig::default(),
        }
    }
}

impl RecommenderConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of users.
    #[must_use]
    pub const fn capacity_users(mut self, capacity: usize) -> Self {
        self.capacity_users = capacity;
        self
    }

    /// Set the number of item columns explicitly.
    #[must_use]
    pub const fn num_items(mut self, num_items: usize) -> Self {
        self.num_items = Some(num_items);
        self
    }

    /// Set the default neighbor count.
    #[must_use]
    pub const fn default_k(mut self, k: usize) -> Self {
        self.default_k = k;
        self
    }

    /// Set the spatial index split rule.
    #[must_use]
    pub const fn split_rule(mut self, rule: SplitRule) -> Self {
        self.index = self.index.with_split_rule(rule);
        self
    }

    /// Check that every size is positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.capacity_users == 0 {
            return Err(Error::Config("capacity_users must be greater than 0".to_string()));
        }
        if self.num_items == Some(0) {
            return Err(Error::Config("num_items must be greater than 0".to_string()));
        }
        if self.default_k == 0 {
            return Err(Error::Config("default_k must be greater than 0".to_string()));
        }
        Ok(())
    }
}

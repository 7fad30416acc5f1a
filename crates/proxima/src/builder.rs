//! Fluent construction of a [`Recommender`].
//!
//! ```
//! use proxima::{FeatureVector, Recommender, SplitRule};
//!
//! let catalog = vec![
//!     FeatureVector::new(vec![1.0, 0.5])?,
//!     FeatureVector::new(vec![0.9, 0.4])?,
//! ];
//! let recommender = Recommender::<String>::builder()
//!     .with_catalog(catalog)
//!     .capacity_users(100)
//!     .split_rule(SplitRule::Cyclic)
//!     .build()?;
//!
//! assert_eq!(recommender.num_items(), 2);
//! # Ok::<(), proxima::Error>(())
//! ```

use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use proxima_vector::{FeatureVector, SplitRule};

use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::recommender::Recommender;

/// A builder for creating a [`Recommender`] with a fluent API.
#[derive(Debug, Clone)]
#[must_use]
pub struct RecommenderBuilder<U> {
    config: RecommenderConfig,
    catalog: Vec<FeatureVector>,
    _user: PhantomData<fn() -> U>,
}

impl<U> Default for RecommenderBuilder<U> {
    fn default() -> Self {
        Self { config: RecommenderConfig::default(), catalog: Vec::new(), _user: PhantomData }
    }
}

impl<U: Eq + Hash + Debug> RecommenderBuilder<U> {
    /// Create a builder with the default configuration and no catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: RecommenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the item feature vectors. Item `i` is `catalog[i]`.
    pub fn with_catalog(mut self, catalog: Vec<FeatureVector>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the maximum number of users.
    pub fn capacity_users(mut self, capacity: usize) -> Self {
        self.config = self.config.capacity_users(capacity);
        self
    }

    /// Set the number of interaction columns. Defaults to the catalog size.
    pub fn num_items(mut self, num_items: usize) -> Self {
        self.config = self.config.num_items(num_items);
        self
    }

    /// Set the neighbor count used by
    /// [`find_similar_default`](Recommender::find_similar_default).
    pub fn default_k(mut self, k: usize) -> Self {
        self.config = self.config.default_k(k);
        self
    }

    /// Set the spatial index split rule.
    pub fn split_rule(mut self, rule: SplitRule) -> Self {
        self.config = self.config.split_rule(rule);
        self
    }

    /// Validate the configuration, build the index, and allocate the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if a configured size is
    /// zero, and a [`Vector`](crate::Error::Vector) error if the catalog is
    /// empty or its vectors disagree on dimension.
    pub fn build(self) -> Result<Recommender<U>> {
        self.config.validate()?;
        Recommender::from_parts(self.config, self.catalog)
    }
}

//! The recommender facade.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use proxima_core::{ItemId, Neighbor};
use proxima_interaction::{Registration, SharedInteractionStore, WriteOutcome, NO_INTERACTION};
use proxima_vector::{FeatureVector, IndexHandle, SpatialIndex};

use crate::builder::RecommenderBuilder;
use crate::config::RecommenderConfig;
use crate::error::Result;

/// A neighbor of the query annotated with one user's interaction value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The similar item.
    pub item: ItemId,
    /// Euclidean distance from the query.
    pub distance: f64,
    /// The user's recorded value for `item`, or [`NO_INTERACTION`].
    pub interaction: f64,
}

/// Item similarity search plus per-user interaction tracking.
///
/// Holds the current [`SpatialIndex`] behind an [`IndexHandle`] and the
/// interaction matrix behind a [`SharedInteractionStore`]. Every method takes
/// `&self`, so a recommender can be shared across threads in an `Arc`.
///
/// Item ids are positions in the catalog the index was built from. The
/// interaction store has a fixed number of item columns chosen at
/// construction; rebuilding the index does not resize it.
#[derive(Debug)]
pub struct Recommender<U> {
    index: IndexHandle,
    store: SharedInteractionStore<U>,
    config: RecommenderConfig,
}

impl<U: Eq + Hash + Debug> Recommender<U> {
    /// Returns a builder for creating a recommender with custom configuration.
    pub fn builder() -> RecommenderBuilder<U> {
        RecommenderBuilder::new()
    }

    /// Create a recommender over `catalog` with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`RecommenderBuilder::build`].
    pub fn new(catalog: Vec<FeatureVector>) -> Result<Self> {
        Self::builder().with_catalog(catalog).build()
    }

    /// Assemble from a validated configuration.
    pub(crate) fn from_parts(mut config: RecommenderConfig, catalog: Vec<FeatureVector>) -> Result<Self> {
        let index = SpatialIndex::with_config(catalog, config.index)?;
        let num_items = *config.num_items.get_or_insert(index.len());
        let store = SharedInteractionStore::new(config.capacity_users, num_items)?;

        debug!(
            items = index.len(),
            dimension = index.dimension(),
            capacity_users = config.capacity_users,
            num_items,
            "created recommender"
        );

        Ok(Self { index: IndexHandle::new(index), store, config })
    }

    /// Find the `k` catalog items closest to `query`.
    ///
    /// # Errors
    ///
    /// See [`SpatialIndex::find_similar`].
    pub fn find_similar(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        Ok(self.index.load()?.find_similar(query, k)?)
    }

    /// Find the configured default number of closest items.
    ///
    /// # Errors
    ///
    /// See [`SpatialIndex::find_similar`].
    pub fn find_similar_default(&self, query: &[f32]) -> Result<Vec<Neighbor>> {
        self.find_similar(query, self.config.default_k)
    }

    /// Find the `k` items closest to `query`, each paired with what `user`
    /// has recorded for it.
    ///
    /// An unregistered user gets [`NO_INTERACTION`] for every item, as does
    /// an item with no interaction column.
    ///
    /// # Errors
    ///
    /// See [`SpatialIndex::find_similar`].
    pub fn recommend_for_user<Q>(&self, user: &Q, query: &[f32], k: usize) -> Result<Vec<Recommendation>>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let neighbors = self.find_similar(query, k)?;

        let recommendations = self.store.with_read(|store| {
            let row = store.user_row(user);
            if row.is_none() {
                debug!(?user, "recommending for unregistered user");
            }

            neighbors
                .into_iter()
                .map(|n| Recommendation {
                    item: n.item,
                    distance: n.distance,
                    interaction: row
                        .and_then(|r| r.get(n.item.as_usize()).copied())
                        .unwrap_or(NO_INTERACTION),
                })
                .collect()
        })?;

        Ok(recommendations)
    }

    /// Replace the catalog with `vectors` and swap in a freshly built index.
    ///
    /// Queries already running finish against the previous index. If the
    /// build fails, the previous index stays current.
    ///
    /// # Errors
    ///
    /// See [`IndexHandle::rebuild`].
    pub fn rebuild_index(&self, vectors: Vec<FeatureVector>) -> Result<()> {
        let items = vectors.len();
        self.index.rebuild(vectors)?;

        if items > self.num_items() {
            warn!(
                items,
                num_items = self.num_items(),
                "catalog has more items than interaction columns"
            );
        }
        Ok(())
    }

    /// Register `user`. See [`InteractionStore::register_user`](proxima_interaction::InteractionStore::register_user).
    ///
    /// # Errors
    ///
    /// Returns an error only if the store lock is poisoned.
    pub fn register_user(&self, user: U) -> Result<Registration> {
        Ok(self.store.register_user(user)?)
    }

    /// Record `value` for `user` and `item`.
    ///
    /// # Errors
    ///
    /// Returns an error if `item` has no interaction column.
    pub fn update_interaction<Q>(&self, user: &Q, item: ItemId, value: f64) -> Result<WriteOutcome>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        Ok(self.store.update_interaction(user, item, value)?)
    }

    /// Read the value recorded for `user` and `item`.
    ///
    /// An unregistered user reads as [`NO_INTERACTION`], the same as an empty
    /// cell, and a warning is logged. Pair with [`has_user`](Self::has_user)
    /// when the difference matters.
    ///
    /// # Errors
    ///
    /// Returns an error if `item` has no interaction column.
    pub fn get_interaction<Q>(&self, user: &Q, item: ItemId) -> Result<f64>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        Ok(self.store.get_interaction(user, item)?)
    }

    /// Whether `user` is registered.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store lock is poisoned.
    pub fn has_user<Q>(&self, user: &Q) -> Result<bool>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Ok(self.store.has_user(user)?)
    }

    /// The index queries currently run against.
    ///
    /// # Errors
    ///
    /// Returns an error only if the handle lock is poisoned.
    pub fn index(&self) -> Result<Arc<SpatialIndex>> {
        Ok(self.index.load()?)
    }

    /// The interaction store.
    #[must_use]
    pub fn store(&self) -> &SharedInteractionStore<U> {
        &self.store
    }

    /// The configuration, with `num_items` resolved.
    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Neighbor count used by [`find_similar_default`](Self::find_similar_default).
    #[must_use]
    pub fn default_k(&self) -> usize {
        self.config.default_k
    }

    /// Maximum number of users.
    #[must_use]
    pub fn capacity_users(&self) -> usize {
        self.config.capacity_users
    }

    /// Number of interaction columns.
    #[must_use]
    pub fn num_items(&self) -> usize {
        self.config.num_items.unwrap_or_default()
    }
}

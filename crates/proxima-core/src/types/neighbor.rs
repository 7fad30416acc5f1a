//! Scored results of similarity queries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::ItemId;

/// A catalog item together with its Euclidean distance to a query vector.
///
/// Lower distances mean more similar items.
///
/// # Example
///
/// ```
/// use proxima_core::{ItemId, Neighbor};
///
/// let near = Neighbor::new(ItemId::new(0), 0.1);
/// let far = Neighbor::new(ItemId::new(1), 0.3);
/// assert!(near.rank_cmp(&far).is_lt());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// The matching item.
    pub item: ItemId,
    /// Euclidean distance between the item's vector and the query.
    ///
    /// Held as `f64` so the distance between any two finite `f32` vectors
    /// is itself finite.
    pub distance: f64,
}

impl Neighbor {
    /// Create a new neighbor.
    #[inline]
    #[must_use]
    pub const fn new(item: ItemId, distance: f64) -> Self {
        Self { item, distance }
    }

    /// Ranking order: ascending distance, then ascending item id.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance).then(self.item.cmp(&other.item))
    }
}

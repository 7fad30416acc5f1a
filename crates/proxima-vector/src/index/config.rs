//! Spatial index configuration.

use serde::{Deserialize, Serialize};

/// How the k-d tree picks the axis a node splits on.
///
/// Both rules are deterministic: building twice from the same vectors yields
/// the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    /// Split on the axis where the node's points are most spread out
    /// (largest `max - min`). Ties go to the lowest axis.
    #[default]
    MaxSpread,
    /// Split on axis `depth % dimension`.
    Cyclic,
}

/// Configuration parameters for a [`SpatialIndex`](super::SpatialIndex).
///
/// * `split_rule` - Axis selection at each internal node. `MaxSpread` adapts
///   to skewed data and is the default; `Cyclic` is cheaper to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpatialIndexConfig {
    /// Axis selection rule.
    #[serde(default)]
    pub split_rule: SplitRule,
}

impl SpatialIndexConfig {
    /// Create a configuration with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the axis selection rule.
    #[must_use]
    pub const fn with_split_rule(mut self, split_rule: SplitRule) -> Self {
        self.split_rule = split_rule;
        self
    }
}

//! Balanced k-d tree for exact k-nearest-neighbor search.
//!
//! # Construction
//!
//! The tree is built once from the whole catalog. Each internal node picks an
//! axis (see [`SplitRule`]) and splits its points at the median along that
//! axis, ordering by coordinate and then by item id. The lower half holds
//! `⌊m/2⌋` points and the upper half the rest, so depth is `⌈log2 n⌉`. A
//! partition of a single point becomes a leaf, and every point ends up in
//! exactly one leaf.
//!
//! # Search
//!
//! Depth-first: the child on the query's side of the splitting plane is
//! visited first, then the far child only if the plane is no farther than the
//! current k-th best candidate. Points in the lower half have coordinates
//! `<= split` and points in the upper half `>= split`, so the squared plane
//! distance is a lower bound for every point on the far side.
//!
//! With low dimensionality queries cost `O(log n + k)` on average. As the
//! dimension grows the plane bound prunes less and search approaches a linear
//! scan; results stay exact either way.

use proxima_core::{ItemId, Neighbor};
use tracing::debug;

use super::candidate::{Candidate, CandidateHeap};
use super::config::{SpatialIndexConfig, SplitRule};
use crate::distance::{axis_distance_squared, euclidean_distance_squared};
use crate::error::VectorError;
use crate::types::feature::validate;
use crate::types::FeatureVector;

/// Position of a node in the tree's node arena.
type NodeId = usize;

/// A node of the k-d tree.
#[derive(Debug, Clone, Copy)]
enum Node {
    /// Splits its points along `axis` at `value`.
    Split {
        axis: usize,
        value: f32,
        /// Points ordered before the median (`coordinate <= value`).
        lower: NodeId,
        /// The median and everything after it (`coordinate >= value`).
        upper: NodeId,
    },
    /// Holds exactly one point.
    Leaf { item: ItemId },
}

/// An immutable spatial index over a fixed set of feature vectors.
///
/// Item ids are the positions of the vectors in the sequence the index was
/// built from. To reflect catalog changes, build a new index; the old one
/// stays valid and queryable (see [`IndexHandle`](super::IndexHandle)).
///
/// `SpatialIndex` is `Send + Sync`; any number of threads may query it
/// concurrently without locking.
///
/// # Example
///
/// ```
/// use proxima_vector::index::SpatialIndex;
/// use proxima_vector::types::FeatureVector;
///
/// let vectors = vec![
///     FeatureVector::new(vec![1.0, 0.5]).unwrap(),
///     FeatureVector::new(vec![0.9, 0.4]).unwrap(),
///     FeatureVector::new(vec![0.8, 0.3]).unwrap(),
/// ];
/// let index = SpatialIndex::build(vectors).unwrap();
///
/// let hits = index.find_similar(&[1.0, 0.6], 2).unwrap();
/// assert_eq!(hits[0].item.as_usize(), 0);
/// assert_eq!(hits[1].item.as_usize(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    points: Vec<FeatureVector>,
    dimension: usize,
    nodes: Vec<Node>,
    root: NodeId,
    depth: usize,
    config: SpatialIndexConfig,
}

impl SpatialIndex {
    /// Build an index with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::EmptyInput`] if `vectors` is empty and
    /// [`VectorError::DimensionMismatch`] if the vectors do not all share the
    /// dimension of the first one.
    pub fn build(vectors: Vec<FeatureVector>) -> Result<Self, VectorError> {
        Self::with_config(vectors, SpatialIndexConfig::default())
    }

    /// Build an index with an explicit configuration.
    ///
    /// # Errors
    ///
    /// See [`SpatialIndex::build`].
    pub fn with_config(
        vectors: Vec<FeatureVector>,
        config: SpatialIndexConfig,
    ) -> Result<Self, VectorError> {
        let dimension = vectors.first().map(FeatureVector::dimension).ok_or(VectorError::EmptyInput)?;

        if let Some(bad) = vectors.iter().find(|v| v.dimension() != dimension) {
            return Err(VectorError::DimensionMismatch { expected: dimension, actual: bad.dimension() });
        }

        let mut builder = TreeBuilder {
            points: &vectors,
            dimension,
            split_rule: config.split_rule,
            nodes: Vec::with_capacity(2 * vectors.len() - 1),
            depth: 0,
        };
        let mut order: Vec<usize> = (0..vectors.len()).collect();
        let root = builder.build(&mut order, 0);
        let TreeBuilder { nodes, depth, .. } = builder;

        debug!(
            points = vectors.len(),
            dimension,
            depth,
            split_rule = ?config.split_rule,
            "built spatial index"
        );

        Ok(Self { points: vectors, dimension, nodes, root, depth, config })
    }

    /// Build an index from raw rows, validating each one.
    ///
    /// # Errors
    ///
    /// Returns an error if any row is empty or holds a non-finite value, or
    /// for any reason listed on [`SpatialIndex::build`].
    pub fn from_rows<I>(rows: I, config: SpatialIndexConfig) -> Result<Self, VectorError>
    where
        I: IntoIterator<Item = Vec<f32>>,
    {
        let vectors = rows.into_iter().map(FeatureVector::new).collect::<Result<Vec<_>, _>>()?;
        Self::with_config(vectors, config)
    }

    /// Find the `k` indexed items closest to `query` by Euclidean distance.
    ///
    /// Returns `min(k, len)` neighbors in ascending distance order. Items at
    /// equal distance are ordered by item id. Asking for more neighbors than
    /// the index holds returns every item.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidK`] if `k` is zero,
    /// [`VectorError::DimensionMismatch`] if the query dimension differs from
    /// the index, and [`VectorError::InvalidValue`] if the query holds a
    /// non-finite value.
    pub fn find_similar(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, VectorError> {
        if k == 0 {
            return Err(VectorError::InvalidK);
        }
        if query.len() != self.dimension {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }
        validate(query)?;

        let mut heap = CandidateHeap::new(k.min(self.points.len()));
        self.search(self.root, query, &mut heap);
        Ok(heap.into_neighbors())
    }

    fn search(&self, node: NodeId, query: &[f32], heap: &mut CandidateHeap) {
        match self.nodes[node] {
            Node::Leaf { item } => {
                let point = self.points[item.as_usize()].as_slice();
                heap.offer(Candidate::new(item, euclidean_distance_squared(query, point)));
            }
            Node::Split { axis, value, lower, upper } => {
                let (near, far) = if query[axis] < value { (lower, upper) } else { (upper, lower) };
                self.search(near, query, heap);
                if heap.admits(axis_distance_squared(query[axis], value)) {
                    self.search(far, query, heap);
                }
            }
        }
    }

    /// Number of indexed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: an index cannot be built from an empty catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension shared by every indexed vector.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Length of the longest root-to-leaf path (0 for a single item).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The configuration the index was built with.
    #[must_use]
    pub fn config(&self) -> SpatialIndexConfig {
        self.config
    }

    /// Get the feature vector of an indexed item.
    #[must_use]
    pub fn get(&self, item: ItemId) -> Option<&FeatureVector> {
        self.points.get(item.as_usize())
    }

    /// Iterate over indexed items in item id order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &FeatureVector)> + '_ {
        self.points.iter().enumerate().map(|(i, v)| (ItemId::new(i), v))
    }

    /// Consume the index and return its vectors in item id order.
    #[must_use]
    pub fn into_vectors(self) -> Vec<FeatureVector> {
        self.points
    }
}

/// Recursive median-split construction over a permutation of point ids.
struct TreeBuilder<'a> {
    points: &'a [FeatureVector],
    dimension: usize,
    split_rule: SplitRule,
    nodes: Vec<Node>,
    depth: usize,
}

impl TreeBuilder<'_> {
    /// Build the subtree for `items` (non-empty) and return its node id.
    fn build(&mut self, items: &mut [usize], level: usize) -> NodeId {
        if let [only] = items {
            self.depth = self.depth.max(level);
            return self.push(Node::Leaf { item: ItemId::new(*only) });
        }

        let axis = self.choose_axis(items, level);
        let points = self.points;
        let mid = items.len() / 2;
        items.select_nth_unstable_by(mid, |&a, &b| {
            points[a][axis].total_cmp(&points[b][axis]).then(a.cmp(&b))
        });
        let value = points[items[mid]][axis];

        let (lower_items, upper_items) = items.split_at_mut(mid);
        let lower = self.build(lower_items, level + 1);
        let upper = self.build(upper_items, level + 1);
        self.push(Node::Split { axis, value, lower, upper })
    }

    fn choose_axis(&self, items: &[usize], level: usize) -> usize {
        match self.split_rule {
            SplitRule::Cyclic => level % self.dimension,
            SplitRule::MaxSpread => {
                let mut best_axis = 0;
                let mut best_spread = f64::NEG_INFINITY;
                for axis in 0..self.dimension {
                    let (lo, hi) = items.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &i| {
                        let x = self.points[i][axis];
                        (lo.min(x), hi.max(x))
                    });
                    let spread = f64::from(hi) - f64::from(lo);
                    if spread > best_spread {
                        best_spread = spread;
                        best_axis = axis;
                    }
                }
                best_axis
            }
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

//! Exact K-Nearest Neighbors by linear scan.
//!
//! Computes the distance to every vector and keeps the k best.

use proxima_core::{ItemId, Neighbor};

use crate::distance::euclidean_distance_squared;
use crate::error::VectorError;
use crate::index::candidate::{Candidate, CandidateHeap};
use crate::types::feature::validate;

/// Brute-force k-NN search.
///
/// Ranks candidates exactly like [`SpatialIndex`](crate::index::SpatialIndex)
/// (squared Euclidean distance, then item id), so both return identical
/// results for the same point set. This is useful for:
/// - Validating the spatial index
/// - Tiny catalogs where building a tree isn't worth it
/// - High-dimensional data where tree pruning degrades to a scan anyway
///
/// # Complexity
///
/// O(n * d) where n is the number of vectors and d is the dimension.
///
/// # Example
///
/// ```
/// use proxima_core::ItemId;
/// use proxima_vector::ops::ExactKnn;
///
/// let rows = vec![vec![1.0, 0.5], vec![0.9, 0.4], vec![0.8, 0.3]];
/// let knn = ExactKnn::search(
///     rows.iter().enumerate().map(|(i, r)| (ItemId::new(i), r.as_slice())),
///     &[1.0, 0.6],
///     2,
/// )
/// .unwrap();
///
/// assert_eq!(knn.as_slice()[0].item, ItemId::new(0));
/// ```
#[derive(Debug, Clone)]
pub struct ExactKnn {
    /// Results in rank order.
    results: Vec<Neighbor>,
    /// Current position in results.
    position: usize,
}

impl ExactKnn {
    /// Scan `vectors` for the `k` nearest to `query`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidK`] if `k` is zero,
    /// [`VectorError::InvalidValue`] or [`VectorError::InvalidDimension`] for a
    /// malformed query, and [`VectorError::DimensionMismatch`] if any vector's
    /// dimension differs from the query's.
    pub fn search<'a, I>(vectors: I, query: &[f32], k: usize) -> Result<Self, VectorError>
    where
        I: IntoIterator<Item = (ItemId, &'a [f32])>,
    {
        if k == 0 {
            return Err(VectorError::InvalidK);
        }
        validate(query)?;

        let mut heap = CandidateHeap::new(k);
        for (item, vector) in vectors {
            if vector.len() != query.len() {
                return Err(VectorError::DimensionMismatch {
                    expected: query.len(),
                    actual: vector.len(),
                });
            }
            heap.offer(Candidate::new(item, euclidean_distance_squared(query, vector)));
        }

        Ok(Self { results: heap.into_neighbors(), position: 0 })
    }

    /// Get the number of results found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if no results were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Peek at the next result without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&Neighbor> {
        self.results.get(self.position)
    }

    /// Reset the iterator to the beginning.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Get all results as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Neighbor] {
        &self.results
    }

    /// Consume the operator and return all results.
    #[must_use]
    pub fn into_vec(self) -> Vec<Neighbor> {
        self.results
    }
}

impl Iterator for ExactKnn {
    type Item = Neighbor;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.results.get(self.position).copied();
        if result.is_some() {
            self.position += 1;
        }
        result
    }
}

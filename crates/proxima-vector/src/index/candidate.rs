//! Bounded candidate set for k-NN search.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use proxima_core::{ItemId, Neighbor};

/// A search candidate ranked by `(squared distance, item id)`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub(crate) distance_sq: f64,
    pub(crate) item: ItemId,
}

impl Candidate {
    pub(crate) const fn new(item: ItemId, distance_sq: f64) -> Self {
        Self { distance_sq, item }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Distances are finite (inputs are validated), so total_cmp agrees
        // with numeric order. Equal distances rank the lower item id first.
        self.distance_sq.total_cmp(&other.distance_sq).then(self.item.cmp(&other.item))
    }
}

/// Max-heap holding the `k` best candidates seen so far.
///
/// The top of the heap is the worst kept candidate, so replacing it is
/// `O(log k)`.
#[derive(Debug)]
pub(crate) struct CandidateHeap {
    k: usize,
    heap: BinaryHeap<Candidate>,
}

impl CandidateHeap {
    pub(crate) fn new(k: usize) -> Self {
        // saturating_add avoids overflow when k is usize::MAX
        Self { k, heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)) }
    }

    /// Keep `candidate` if it ranks ahead of the current k-th best.
    pub(crate) fn offer(&mut self, candidate: Candidate) {
        if self.heap.len() < self.k {
            self.heap.push(candidate);
        } else if let Some(worst) = self.heap.peek() {
            if candidate < *worst {
                self.heap.pop();
                self.heap.push(candidate);
            }
        }
    }

    /// Whether a region whose points are all at least `bound_sq` away could
    /// still contribute a candidate.
    ///
    /// A bound equal to the k-th best distance is admitted: such a region may
    /// hold a tied point with a lower item id.
    pub(crate) fn admits(&self, bound_sq: f64) -> bool {
        if self.heap.len() < self.k {
            return true;
        }
        self.heap.peek().map_or(true, |worst| bound_sq <= worst.distance_sq)
    }

    /// Drain into neighbors ordered by rank, reporting true distances.
    pub(crate) fn into_neighbors(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor::new(c.item, c.distance_sq.sqrt()))
            .collect()
    }
}

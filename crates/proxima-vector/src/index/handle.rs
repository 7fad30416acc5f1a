//! Hot-swappable reference to the current spatial index.

use std::sync::{Arc, RwLock};

use tracing::debug;

use super::SpatialIndex;
use crate::error::VectorError;
use crate::types::FeatureVector;

/// Shared, swappable pointer to the index queries should use.
///
/// A [`SpatialIndex`] is never modified after construction. When the catalog
/// changes, build a replacement and [`swap`](IndexHandle::swap) it in.
/// Queries that already [`load`](IndexHandle::load)ed the previous index keep
/// a valid `Arc` to it until they drop it.
///
/// The lock is only held to clone or replace the `Arc`, never while building
/// or searching.
///
/// # Example
///
/// ```
/// use proxima_vector::index::{IndexHandle, SpatialIndex};
/// use proxima_vector::types::FeatureVector;
///
/// let v = |x: f32| FeatureVector::new(vec![x]).unwrap();
/// let handle = IndexHandle::new(SpatialIndex::build(vec![v(0.0)]).unwrap());
///
/// let before = handle.load().unwrap();
/// handle.rebuild(vec![v(0.0), v(1.0)]).unwrap();
///
/// assert_eq!(before.len(), 1);
/// assert_eq!(handle.load().unwrap().len(), 2);
/// ```
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<SpatialIndex>>,
}

impl IndexHandle {
    /// Create a handle pointing at `index`.
    #[must_use]
    pub fn new(index: SpatialIndex) -> Self {
        Self { current: RwLock::new(Arc::new(index)) }
    }

    /// Get the index queries should currently use.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::LockPoisoned`] if a thread panicked while
    /// swapping.
    pub fn load(&self) -> Result<Arc<SpatialIndex>, VectorError> {
        let guard = self.current.read().map_err(|_| VectorError::LockPoisoned)?;
        Ok(Arc::clone(&guard))
    }

    /// Replace the current index, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::LockPoisoned`] if a thread panicked while
    /// swapping.
    pub fn swap(&self, index: SpatialIndex) -> Result<Arc<SpatialIndex>, VectorError> {
        let next = Arc::new(index);
        let mut guard = self.current.write().map_err(|_| VectorError::LockPoisoned)?;
        let previous = std::mem::replace(&mut *guard, next);
        debug!(previous = previous.len(), current = guard.len(), "swapped spatial index");
        Ok(previous)
    }

    /// Build a new index from `vectors` with the current index's
    /// configuration and swap it in.
    ///
    /// The build runs before the lock is taken. If it fails, the current
    /// index is left in place.
    ///
    /// # Errors
    ///
    /// Returns any error from [`SpatialIndex::with_config`], or
    /// [`VectorError::LockPoisoned`].
    pub fn rebuild(&self, vectors: Vec<FeatureVector>) -> Result<Arc<SpatialIndex>, VectorError> {
        let config = self.load()?.config();
        let index = SpatialIndex::with_config(vectors, config)?;
        self.swap(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::thread;

    use super::*;

    fn line(n: usize) -> Vec<FeatureVector> {
        (0..n).map(|i| FeatureVector::new(vec![i as f32]).unwrap()).collect()
    }

    #[test]
    fn swap_returns_previous() {
        let handle = IndexHandle::new(SpatialIndex::build(line(2)).unwrap());
        let previous = handle.swap(SpatialIndex::build(line(5)).unwrap()).unwrap();
        assert_eq!(previous.len(), 2);
        assert_eq!(handle.load().unwrap().len(), 5);
    }

    #[test]
    fn old_index_stays_queryable() {
        let handle = IndexHandle::new(SpatialIndex::build(line(3)).unwrap());
        let old = handle.load().unwrap();
        handle.rebuild(line(10)).unwrap();

        let hits = old.find_similar(&[9.0], 1).unwrap();
        assert_eq!(hits[0].item.as_usize(), 2);

        let hits = handle.load().unwrap().find_similar(&[9.0], 1).unwrap();
        assert_eq!(hits[0].item.as_usize(), 9);
    }

    #[test]
    fn failed_rebuild_keeps_current() {
        let handle = IndexHandle::new(SpatialIndex::build(line(3)).unwrap());
        assert!(matches!(handle.rebuild(vec![]), Err(VectorError::EmptyInput)));
        assert_eq!(handle.load().unwrap().len(), 3);
    }

    #[test]
    fn concurrent_queries_during_swap() {
        let handle = Arc::new(IndexHandle::new(SpatialIndex::build(line(50)).unwrap()));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let index = handle.load().unwrap();
                        let hits = index.find_similar(&[0.0], 3).unwrap();
                        assert_eq!(hits.len(), 3);
                        assert_eq!(hits[0].item.as_usize(), 0);
                    }
                })
            })
            .collect();

        for n in 60..70 {
            handle.rebuild(line(n)).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(handle.load().unwrap().len(), 69);
    }
}

//! Search operators that run outside the spatial index.
//!
//! - [`ExactKnn`] - Brute force k-NN, the reference the index is checked against

mod exact_knn;

pub use exact_knn::ExactKnn;

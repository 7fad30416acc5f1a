//! Scalar (non-SIMD) distance kernels.
//!
//! Used when the `scalar` feature is enabled or `simd` is disabled.

use super::axis_distance_squared;

/// Calculate the squared Euclidean (L2) distance between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    a.iter().zip(b).map(|(&x, &y)| axis_distance_squared(x, y)).sum()
}

/// Calculate the Euclidean (L2) distance between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f64 {
    euclidean_distance_squared(a, b).sqrt()
}

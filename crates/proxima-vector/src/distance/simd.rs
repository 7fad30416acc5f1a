//! SIMD distance kernels using the `wide` crate.
//!
//! Coordinates are widened to `f64` four at a time, so squared differences
//! of finite `f32` values never overflow.

use wide::f64x4;

use super::axis_distance_squared;

/// Number of coordinates processed per SIMD iteration.
const LANES: usize = 4;

/// Widen one chunk of `f32` coordinates into an `f64x4`.
#[inline]
fn widen(chunk: &[f32]) -> f64x4 {
    let mut lanes = [0.0_f64; LANES];
    for (lane, &x) in lanes.iter_mut().zip(chunk) {
        *lane = f64::from(x);
    }
    f64x4::new(lanes)
}

/// Calculate the squared Euclidean (L2) distance between two vectors.
///
/// The k-NN search ranks candidates by this value and only takes a square
/// root when it reports distances.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let mut chunks_a = a.chunks_exact(LANES);
    let mut chunks_b = b.chunks_exact(LANES);

    let mut acc = f64x4::ZERO;
    for (ca, cb) in chunks_a.by_ref().zip(chunks_b.by_ref()) {
        let diff = widen(ca) - widen(cb);
        acc += diff * diff;
    }

    let mut result: f64 = acc.to_array().iter().sum();
    for (&x, &y) in chunks_a.remainder().iter().zip(chunks_b.remainder()) {
        result += axis_distance_squared(x, y);
    }

    result
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

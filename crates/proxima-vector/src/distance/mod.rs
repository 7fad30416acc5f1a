//! Euclidean distance kernels.
//!
//! Two interchangeable implementations back the public functions:
//!
//! - `simd` (default): processes 4 coordinates at a time with `wide::f64x4`,
//!   with a scalar loop for the remainder. Works on SSE/AVX, NEON and SIMD128.
//! - `scalar`: plain iterator loops, useful for debugging and validation.
//!
//! Vectors hold `f32`, but every kernel subtracts and accumulates in `f64`.
//! The squared distance between two finite `f32` vectors is therefore always
//! finite, and ranking by it never collapses distinct distances into `inf`.
//!
//! Enabling the `scalar` feature forces the scalar kernels even when `simd` is
//! also enabled.
//!
//! Both kernels only ever add non-negative terms, so the squared distance of a
//! point is never smaller than the squared difference along any single axis.
//! The spatial index relies on that when it prunes subtrees.

#[cfg(all(feature = "simd", not(feature = "scalar")))]
mod simd;

#[cfg(any(feature = "scalar", not(feature = "simd")))]
mod scalar;

#[cfg(all(feature = "simd", not(feature = "scalar")))]
pub use simd::{euclidean_distance, euclidean_distance_squared};

#[cfg(any(feature = "scalar", not(feature = "simd")))]
pub use scalar::{euclidean_distance, euclidean_distance_squared};

/// Squared difference along one axis, the lower bound used for pruning.
#[inline]
#[must_use]
pub fn axis_distance_squared(a: f32, b: f32) -> f64 {
    let diff = f64::from(a) - f64::from(b);
    diff * diff
}

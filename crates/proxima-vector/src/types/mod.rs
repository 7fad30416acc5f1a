//! Core types for the vector crate.

pub(crate) mod feature;

pub use feature::FeatureVector;

//! Feature vector type.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::VectorError;

/// A validated item feature vector.
///
/// Feature vectors are non-empty sequences of finite `f32` values stored
/// contiguously. The spatial index takes ownership of the vectors it is built
/// from and never modifies them. Scaling and normalization are left to the
/// caller.
///
/// # Example
///
/// ```
/// use proxima_vector::types::FeatureVector;
///
/// let v = FeatureVector::new(vec![1.0, 0.5]).unwrap();
/// assert_eq!(v.dimension(), 2);
/// assert_eq!(v.as_slice(), &[1.0, 0.5]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct FeatureVector {
    data: Vec<f32>,
}

impl FeatureVector {
    /// Create a new feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is empty or contains NaN/Infinite values.
    pub fn new(data: Vec<f32>) -> Result<Self, VectorError> {
        validate(&data)?;
        Ok(Self { data })
    }

    /// Get the dimension of the vector.
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Get the vector data as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the vector and return the underlying data.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Check that `data` is usable as a feature vector or query.
pub(crate) fn validate(data: &[f32]) -> Result<(), VectorError> {
    if data.is_empty() {
        return Err(VectorError::InvalidDimension { expected: 1, actual: 0 });
    }

    for (i, &value) in data.iter().enumerate() {
        if !value.is_finite() {
            return Err(VectorError::InvalidValue {
                index: i,
                value,
                reason: if value.is_nan() {
                    "NaN values are not allowed"
                } else {
                    "Infinite values are not allowed"
                },
            });
        }
    }

    Ok(())
}

impl TryFrom<Vec<f32>> for FeatureVector {
    type Error = VectorError;

    fn try_from(data: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

impl From<FeatureVector> for Vec<f32> {
    fn from(v: FeatureVector) -> Self {
        v.data
    }
}

impl Deref for FeatureVector {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl AsRef<[f32]> for FeatureVector {
    #[inline]
    fn as_ref(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_feature_vector() {
        let v = FeatureVector::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v.dimension(), 3);
        assert_eq!(&*v, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_fails() {
        match FeatureVector::new(vec![]).unwrap_err() {
            VectorError::InvalidDimension { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nan_fails() {
        match FeatureVector::new(vec![1.0, f32::NAN, 3.0]).unwrap_err() {
            VectorError::InvalidValue { index, reason, .. } => {
                assert_eq!(index, 1);
                assert!(reason.contains("NaN"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn infinity_fails() {
        let err = FeatureVector::new(vec![f32::INFINITY]).unwrap_err();
        assert!(matches!(err, VectorError::InvalidValue { index: 0, .. }));
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let v: FeatureVector = serde_json::from_str("[1.0, 0.5]").unwrap();
        assert_eq!(v.as_slice(), &[1.0, 0.5]);
        assert!(serde_json::from_str::<FeatureVector>("[]").is_err());
    }
}

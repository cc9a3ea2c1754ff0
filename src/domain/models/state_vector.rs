//! State vectors: points in social-state embedding space.
//!
//! A [`StateVector`] is immutable once built. Cloning shares the backing
//! storage, so step results and candidates can hold vectors without copying
//! the components.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Fixed-dimension real-valued vector.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    components: Arc<[f64]>,
}

impl StateVector {
    pub fn new(components: Vec<f64>) -> Self {
        Self {
            components: components.into(),
        }
    }

    /// All-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self::new(vec![0.0; dimension])
    }

    /// Build from single-precision components, as returned by embedding APIs.
    pub fn from_f32(components: &[f32]) -> Self {
        Self::new(components.iter().map(|&x| f64::from(x)).collect())
    }

    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.components
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.components.to_vec()
    }

    pub fn is_finite(&self) -> bool {
        self.components.iter().all(|x| x.is_finite())
    }

    /// Inner product; extra components of the longer vector are ignored.
    pub fn dot(&self, other: &Self) -> f64 {
        dot(self.as_slice(), other.as_slice())
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        norm(self.as_slice())
    }

    /// Euclidean distance `||self - other||₂`.
    pub fn distance(&self, other: &Self) -> f64 {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Cosine similarity with the denominator floored at `eps`.
    pub fn cosine_similarity(&self, other: &Self, eps: f64) -> f64 {
        cosine_similarity(self.as_slice(), other.as_slice(), eps)
    }

    /// Component-wise offset, producing a new vector.
    pub fn offset(&self, delta: f64) -> Self {
        Self::new(self.components.iter().map(|x| x + delta).collect())
    }

    /// Component-wise mean of a set of vectors.
    ///
    /// Returns `None` when `vectors` is empty or the dimensions disagree.
    pub fn mean(vectors: &[StateVector]) -> Option<StateVector> {
        let first = vectors.first()?;
        let dimension = first.dimension();
        if vectors.iter().any(|v| v.dimension() != dimension) {
            return None;
        }

        let mut sum = vec![0.0; dimension];
        for vector in vectors {
            for (acc, x) in sum.iter_mut().zip(vector.as_slice()) {
                *acc += x;
            }
        }
        let count = vectors.len() as f64;
        Some(Self::new(sum.into_iter().map(|x| x / count).collect()))
    }

    /// First `n` components, used for truncated previews.
    pub fn preview(&self, n: usize) -> Vec<f64> {
        self.components.iter().take(n).copied().collect()
    }
}

impl From<Vec<f64>> for StateVector {
    fn from(components: Vec<f64>) -> Self {
        Self::new(components)
    }
}

impl Serialize for StateVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StateVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<f64>::deserialize(deserializer).map(Self::new)
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn norm(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// `dot(a, b) / max(||a|| * ||b||, eps)`.
///
/// A zero vector yields `0.0` instead of dividing by zero.
pub fn cosine_similarity(a: &[f64], b: &[f64], eps: f64) -> f64 {
    let denom = (norm(a) * norm(b)).max(eps);
    dot(a, b) / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = StateVector::new(vec![0.0, 0.0, 0.0]);
        let b = StateVector::new(vec![2.0, 0.0, 0.0]);
        assert!((a.distance(&b) - 2.0).abs() < 1e-12);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = StateVector::new(vec![0.3, -1.2, 4.5]);
        assert!((v.cosine_similarity(&v, 1e-8) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector_uses_floor() {
        let zero = StateVector::zeros(3);
        let v = StateVector::new(vec![1.0, 2.0, 3.0]);
        let sim = zero.cosine_similarity(&v, 1e-8);
        assert!(sim.is_finite());
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_mean() {
        let vectors = vec![
            StateVector::new(vec![1.0, 2.0]),
            StateVector::new(vec![3.0, 6.0]),
        ];
        let mean = StateVector::mean(&vectors).unwrap();
        assert_eq!(mean.as_slice(), &[2.0, 4.0]);
    }

    #[test]
    fn test_mean_rejects_empty_and_mismatched() {
        assert!(StateVector::mean(&[]).is_none());
        let mismatched = vec![StateVector::zeros(2), StateVector::zeros(3)];
        assert!(StateVector::mean(&mismatched).is_none());
    }

    #[test]
    fn test_clone_shares_storage() {
        let v = StateVector::new(vec![1.0; 8]);
        let w = v.clone();
        assert!(std::ptr::eq(v.as_slice().as_ptr(), w.as_slice().as_ptr()));
    }

    #[test]
    fn test_serde_as_plain_array() {
        let v = StateVector::new(vec![1.5, -2.0]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let back: StateVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}

//! Forces and the immutable force table.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use super::state_vector::StateVector;
use crate::domain::errors::{DomainError, DomainResult};

/// Weight applied to a force that has no entry in the weight file.
pub const DEFAULT_FORCE_WEIGHT: f64 = 1.0;

/// A named reference direction with a non-negative weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Force {
    pub name: String,
    /// Mean embedding of the force's source sentences.
    #[serde(skip)]
    pub reference: StateVector,
    /// Non-negative multiplier on this force's alignment.
    pub weight: f64,
}

impl Force {
    pub fn new(name: impl Into<String>, reference: StateVector, weight: f64) -> Self {
        Self {
            name: name.into(),
            reference,
            weight,
        }
    }

    /// `dot(vector, reference) * weight`.
    pub fn weighted_dot(&self, vector: &StateVector) -> f64 {
        vector.dot(&self.reference) * self.weight
    }
}

/// Static set of forces for a run.
///
/// Built once, never mutated. Share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ForceTable {
    forces: Vec<Force>,
    dimension: usize,
}

impl ForceTable {
    /// Validate and build a table.
    ///
    /// Rejects an empty set, duplicate names, mismatched dimensions and
    /// negative or non-finite weights.
    pub fn new(forces: Vec<Force>) -> DomainResult<Self> {
        let first = forces.first().ok_or_else(|| {
            DomainError::ConfigurationError("force table must contain at least one force".into())
        })?;
        let dimension = first.reference.dimension();
        if dimension == 0 {
            return Err(DomainError::ConfigurationError(format!(
                "force '{}' has an empty reference vector",
                first.name
            )));
        }

        let mut seen = HashSet::with_capacity(forces.len());
        for force in &forces {
            if !seen.insert(force.name.as_str()) {
                return Err(DomainError::ConfigurationError(format!(
                    "duplicate force name '{}'",
                    force.name
                )));
            }
            if force.reference.dimension() != dimension {
                return Err(DomainError::ConfigurationError(format!(
                    "force '{}' has dimension {} but the table dimension is {}",
                    force.name,
                    force.reference.dimension(),
                    dimension
                )));
            }
            if !force.weight.is_finite() || force.weight < 0.0 {
                return Err(DomainError::ConfigurationError(format!(
                    "force '{}' has invalid weight {}",
                    force.name, force.weight
                )));
            }
        }

        Ok(Self { forces, dimension })
    }

    /// Combine cached reference vectors with a weight mapping.
    ///
    /// Forces missing from `weights` get [`DEFAULT_FORCE_WEIGHT`]. Weights
    /// for unknown forces are ignored.
    pub fn from_parts(
        vectors: BTreeMap<String, StateVector>,
        weights: &HashMap<String, f64>,
    ) -> DomainResult<Self> {
        let forces = vectors
            .into_iter()
            .map(|(name, reference)| {
                let weight = weights.get(&name).copied().unwrap_or(DEFAULT_FORCE_WEIGHT);
                Force::new(name, reference, weight)
            })
            .collect();
        Self::new(forces)
    }

    /// Dimension shared by every reference vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of forces.
    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Forces in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Force> {
        self.forces.iter()
    }

    /// Force names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.forces.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Force> {
        self.forces.iter().find(|f| f.name == name)
    }

    /// Weight of `name`, or [`DEFAULT_FORCE_WEIGHT`] for an unknown force.
    pub fn weight(&self, name: &str) -> f64 {
        self.get(name).map_or(DEFAULT_FORCE_WEIGHT, |f| f.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn force(name: &str, components: Vec<f64>, weight: f64) -> Force {
        Force::new(name, StateVector::new(components), weight)
    }

    #[test]
    fn test_new_valid_table() {
        let table = ForceTable::new(vec![
            force("security", vec![1.0, 0.0], 1.0),
            force("growth", vec![0.0, 1.0], 2.0),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 2);
        assert_eq!(table.weight("growth"), 2.0);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = ForceTable::new(vec![
            force("security", vec![1.0, 0.0], 1.0),
            force("security", vec![0.0, 1.0], 1.0),
        ]);
        assert!(matches!(result, Err(DomainError::ConfigurationError(_))));
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let result = ForceTable::new(vec![
            force("a", vec![1.0, 0.0], 1.0),
            force("b", vec![0.0, 1.0, 0.0], 1.0),
        ]);
        assert!(matches!(result, Err(DomainError::ConfigurationError(_))));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let result = ForceTable::new(vec![force("a", vec![1.0], -0.5)]);
        assert!(matches!(result, Err(DomainError::ConfigurationError(_))));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(ForceTable::new(Vec::new()).is_err());
    }

    #[test]
    fn test_from_parts_defaults_missing_weight() {
        let mut vectors = BTreeMap::new();
        vectors.insert("a".to_string(), StateVector::new(vec![1.0, 0.0]));
        vectors.insert("b".to_string(), StateVector::new(vec![0.0, 1.0]));
        let mut weights = HashMap::new();
        weights.insert("a".to_string(), 0.25);
        weights.insert("unknown".to_string(), 9.0);

        let table = ForceTable::from_parts(vectors, &weights).unwrap();
        assert_eq!(table.weight("a"), 0.25);
        assert_eq!(table.weight("b"), DEFAULT_FORCE_WEIGHT);
        assert!(table.get("unknown").is_none());
    }

    #[test]
    fn test_weighted_dot() {
        let f = force("a", vec![2.0, 1.0], 0.5);
        let v = StateVector::new(vec![1.0, 3.0]);
        assert!((f.weighted_dot(&v) - 2.5).abs() < 1e-12);
    }
}

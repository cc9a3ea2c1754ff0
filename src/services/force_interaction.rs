//! Weighted force alignment and the force product.

use std::sync::Arc;

use crate::domain::models::{ForceScores, ForceTable, StateVector};
use crate::domain::ports::ForceInteraction;

/// Force alignment against a shared, immutable force table.
///
/// Scores are `dot(vector, reference) * weight`. The product term clamps
/// each score to `epsilon` and raises it to the force weight, so a weight of
/// zero contributes a factor of exactly one.
#[derive(Debug, Clone)]
pub struct WeightedForceInteraction {
    table: Arc<ForceTable>,
    epsilon: f64,
}

impl WeightedForceInteraction {
    pub fn new(table: Arc<ForceTable>, epsilon: f64) -> Self {
        Self { table, epsilon }
    }

    pub fn table(&self) -> &ForceTable {
        &self.table
    }
}

impl ForceInteraction for WeightedForceInteraction {
    fn dot_products(&self, vector: &StateVector) -> ForceScores {
        self.table
            .iter()
            .map(|force| (force.name.clone(), force.weighted_dot(vector)))
            .collect()
    }

    fn multiplicative_score(&self, vector: &StateVector) -> f64 {
        self.table
            .iter()
            .map(|force| {
                let clamped = force.weighted_dot(vector).max(self.epsilon);
                clamped.powf(force.weight)
            })
            .product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Force;

    const EPS: f64 = 1e-8;

    fn interaction(forces: Vec<Force>) -> WeightedForceInteraction {
        WeightedForceInteraction::new(Arc::new(ForceTable::new(forces).unwrap()), EPS)
    }

    #[test]
    fn test_dot_products_are_weight_multiplied() {
        let fi = interaction(vec![
            Force::new("a", StateVector::new(vec![1.0, 0.0]), 2.0),
            Force::new("b", StateVector::new(vec![0.0, 1.0]), 0.5),
        ]);
        let scores = fi.dot_products(&StateVector::new(vec![3.0, 4.0]));
        assert!((scores["a"] - 6.0).abs() < 1e-12);
        assert!((scores["b"] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_product_is_weighted_geometric() {
        let fi = interaction(vec![
            Force::new("a", StateVector::new(vec![1.0, 0.0]), 2.0),
            Force::new("b", StateVector::new(vec![0.0, 1.0]), 1.0),
        ]);
        // a: (3 * 2)^2 = 36, b: (4 * 1)^1 = 4
        let product = fi.multiplicative_score(&StateVector::new(vec![3.0, 4.0]));
        assert!((product - 144.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_contributes_unit_factor() {
        let fi = interaction(vec![
            Force::new("muted", StateVector::new(vec![1.0, 0.0]), 0.0),
            Force::new("live", StateVector::new(vec![0.0, 1.0]), 1.0),
        ]);
        let v = StateVector::new(vec![100.0, 2.0]);

        let scores = fi.dot_products(&v);
        assert_eq!(scores["muted"], 0.0);
        assert!((fi.multiplicative_score(&v) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_alignment_clamped_to_epsilon() {
        let fi = interaction(vec![Force::new("a", StateVector::new(vec![1.0]), 1.0)]);
        let product = fi.multiplicative_score(&StateVector::new(vec![-5.0]));
        assert_eq!(product, EPS);
    }
}

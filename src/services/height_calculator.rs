//! Height function over forces and penalties.

use std::sync::Arc;

use crate::domain::models::{ForceScores, StateVector};
use crate::domain::ports::{ForceInteraction, HeightScorer, PenaltyAggregator};

/// Composite height: `penalty_total / (force_product + epsilon)`.
///
/// Lower height means a more plausible next state. Strong, broad alignment
/// with the weighted forces raises the product and lowers the height; the
/// penalties scale it up.
#[derive(Clone)]
pub struct HeightCalculator {
    force_interaction: Arc<dyn ForceInteraction>,
    penalties: Arc<dyn PenaltyAggregator>,
    epsilon: f64,
}

impl HeightCalculator {
    pub fn new(
        force_interaction: Arc<dyn ForceInteraction>,
        penalties: Arc<dyn PenaltyAggregator>,
        epsilon: f64,
    ) -> Self {
        Self {
            force_interaction,
            penalties,
            epsilon,
        }
    }

    pub fn force_interaction(&self) -> &dyn ForceInteraction {
        self.force_interaction.as_ref()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl HeightScorer for HeightCalculator {
    fn height(&self, candidate: &StateVector, current: &StateVector) -> f64 {
        let force_product = self.force_interaction.multiplicative_score(candidate);
        let penalty_total = self.penalties.total(candidate, current);
        penalty_total / (force_product + self.epsilon)
    }

    fn force_scores(&self, vector: &StateVector) -> ForceScores {
        self.force_interaction.dot_products(vector)
    }
}

impl std::fmt::Debug for HeightCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeightCalculator")
            .field("epsilon", &self.epsilon)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProduct(f64);

    impl ForceInteraction for FixedProduct {
        fn dot_products(&self, _vector: &StateVector) -> ForceScores {
            let mut scores = ForceScores::new();
            scores.insert("fixed".into(), self.0);
            scores
        }

        fn multiplicative_score(&self, _vector: &StateVector) -> f64 {
            self.0
        }
    }

    struct FixedPenalty(f64);

    impl PenaltyAggregator for FixedPenalty {
        fn total(&self, _candidate: &StateVector, _current: &StateVector) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_height_composition_with_stubs() {
        let eps = 1e-8;
        let calc = HeightCalculator::new(
            Arc::new(FixedProduct(2.0)),
            Arc::new(FixedPenalty(3.0)),
            eps,
        );
        let v = StateVector::zeros(4);
        let height = calc.height(&v, &v);
        assert_eq!(height, 3.0 / (2.0 + eps));
        assert!(height < 1.5 && (1.5 - height) < 1e-7);
    }

    #[test]
    fn test_zero_product_guarded_by_epsilon() {
        let eps = 1e-8;
        let calc = HeightCalculator::new(
            Arc::new(FixedProduct(0.0)),
            Arc::new(FixedPenalty(1.0)),
            eps,
        );
        let v = StateVector::zeros(2);
        let height = calc.height(&v, &v);
        assert!(height.is_finite());
        assert!((height - 1.0 / eps).abs() < 1e-3);
    }

    #[test]
    fn test_force_scores_delegate() {
        let calc = HeightCalculator::new(
            Arc::new(FixedProduct(0.25)),
            Arc::new(FixedPenalty(1.0)),
            1e-8,
        );
        let scores = calc.force_scores(&StateVector::zeros(1));
        assert_eq!(scores["fixed"], 0.25);
    }
}

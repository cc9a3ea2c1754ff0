//! Scoring capabilities.
//!
//! The height calculator depends on these traits rather than on concrete
//! force tables and penalties, so tests can substitute fixed values.

use crate::domain::models::{ForceScores, StateVector};

/// Force alignment of a vector against the force table.
pub trait ForceInteraction: Send + Sync {
    /// Weight-multiplied dot product per force.
    fn dot_products(&self, vector: &StateVector) -> ForceScores;

    /// Weighted geometric product of the clamped alignments.
    fn multiplicative_score(&self, vector: &StateVector) -> f64;
}

/// Combined penalty for moving from `current` to `candidate`.
pub trait PenaltyAggregator: Send + Sync {
    fn total(&self, candidate: &StateVector, current: &StateVector) -> f64;
}

/// What the trajectory stepper needs from a scorer.
pub trait HeightScorer: Send + Sync {
    /// Cost of `candidate` relative to `current`; lower is better.
    fn height(&self, candidate: &StateVector, current: &StateVector) -> f64;

    /// Per-force scores reported alongside the chosen candidate.
    fn force_scores(&self, vector: &StateVector) -> ForceScores;
}

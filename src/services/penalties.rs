//! Penalty terms of the height function.
//!
//! Both penalties are pure given their inputs and never fall below 1.0 for
//! well-formed vectors. They combine by multiplication, so neither can
//! compensate for the other.

use crate::domain::models::StateVector;
use crate::domain::ports::PenaltyAggregator;

/// `1.0 + alpha * ||candidate - current||₂`.
#[derive(Debug, Clone, Copy)]
pub struct DistancePenalty {
    alpha: f64,
}

impl DistancePenalty {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Always at least 1 for a non-negative `alpha`.
    pub fn penalty(&self, candidate: &StateVector, current: &StateVector) -> f64 {
        1.0 + self.alpha * candidate.distance(current)
    }
}

impl Default for DistancePenalty {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// `1.0 / max(cosine(candidate, centroid), epsilon)`.
///
/// The centroid is the mean embedding of the social reference sentences,
/// computed once per process.
#[derive(Debug, Clone)]
pub struct SocialPenalty {
    centroid: StateVector,
    epsilon: f64,
}

impl SocialPenalty {
    pub fn new(centroid: StateVector, epsilon: f64) -> Self {
        Self { centroid, epsilon }
    }

    pub fn centroid(&self) -> &StateVector {
        &self.centroid
    }

    pub fn penalty(&self, candidate: &StateVector) -> f64 {
        let similarity = candidate
            .cosine_similarity(&self.centroid, self.epsilon)
            .max(self.epsilon);
        1.0 / similarity
    }
}

/// Product of the social and distance penalties.
#[derive(Debug, Clone)]
pub struct CompositePenalty {
    social: SocialPenalty,
    distance: DistancePenalty,
}

impl CompositePenalty {
    pub fn new(social: SocialPenalty, distance: DistancePenalty) -> Self {
        Self { social, distance }
    }
}

impl PenaltyAggregator for CompositePenalty {
    fn total(&self, candidate: &StateVector, current: &StateVector) -> f64 {
        self.social.penalty(candidate) * self.distance.penalty(candidate, current)
    }
}

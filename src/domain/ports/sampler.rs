//! Candidate sampling port.

use crate::domain::errors::DomainResult;
use crate::domain::models::StateVector;

/// Draws a population of candidate vectors around a current vector.
///
/// Implementations own their random state; the trajectory stepper only
/// supplies the current vector.
pub trait CandidateSampler: Send {
    fn sample(&mut self, current: &StateVector) -> DomainResult<Vec<StateVector>>;
}

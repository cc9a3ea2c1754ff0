//! Trajectory stepper: sample, score, select, advance.
//!
//! The stepper is a pull-based iterator over `DomainResult<StepResult>`.
//! Steps run strictly in sequence because each one samples around the
//! previous step's best candidate. A step either completes fully (one
//! result, one new current vector) or fails without touching the current
//! vector; after the first error the iterator is exhausted.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Candidate, StateVector, StepResult};
use crate::domain::ports::{CandidateSampler, HeightScorer};

/// Lifecycle of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrajectoryState {
    /// Seed vector held, no step taken yet.
    Initialized,
    /// At least one step emitted, more remain.
    Stepping,
    /// All steps emitted, or the trajectory aborted.
    Completed,
}

/// Walks one trajectory: each step samples around the current vector,
/// scores every candidate and moves to the lowest one.
pub struct TrajectoryStepper {
    id: Uuid,
    scorer: Arc<dyn HeightScorer>,
    sampler: Box<dyn CandidateSampler>,
    current: StateVector,
    step: usize,
    total_steps: usize,
    state: TrajectoryState,
    cancellation: CancellationToken,
}

impl TrajectoryStepper {
    /// Stepper positioned at `seed`, with `total_steps` steps to run.
    pub fn new(
        scorer: Arc<dyn HeightScorer>,
        sampler: Box<dyn CandidateSampler>,
        seed: StateVector,
        total_steps: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            scorer,
            sampler,
            current: seed,
            step: 0,
            total_steps,
            state: TrajectoryState::Initialized,
            cancellation: CancellationToken::new(),
        }
    }

    /// Observe an external cancellation token between steps.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Identifier carried by every log line of this trajectory.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrajectoryState {
        self.state
    }

    /// Vector the next step samples around.
    pub fn current(&self) -> &StateVector {
        &self.current
    }

    /// Steps emitted successfully so far.
    pub fn steps_completed(&self) -> usize {
        self.step
    }

    /// Steps this trajectory was asked to run.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Token that stops the trajectory before its next step.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Request a stop before the next step.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Run the next step, or return `None` once the trajectory is complete.
    pub fn next_step(&mut self) -> Option<DomainResult<StepResult>> {
        if self.state == TrajectoryState::Completed {
            return None;
        }
        if self.step >= self.total_steps {
            self.state = TrajectoryState::Completed;
            return None;
        }
        if self.cancellation.is_cancelled() {
            info!(trajectory = %self.id, step = self.step, "trajectory cancelled");
            self.state = TrajectoryState::Completed;
            return Some(Err(DomainError::Cancelled(self.step)));
        }

        match self.run_step() {
            Ok(result) => {
                self.current = result.best_vector.clone();
                self.step += 1;
                self.state = if self.step >= self.total_steps {
                    TrajectoryState::Completed
                } else {
                    TrajectoryState::Stepping
                };
                Some(Ok(result))
            }
            Err(err) => {
                error!(trajectory = %self.id, step = self.step, error = %err, "trajectory aborted");
                self.state = TrajectoryState::Completed;
                Some(Err(err))
            }
        }
    }

    fn run_step(&mut self) -> DomainResult<StepResult> {
        let step = self.step;
        let population = self.sampler.sample(&self.current).map_err(|err| match err {
            DomainError::InvalidConfiguration(_) => err,
            other => DomainError::step(step, format!("sampling failed: {other}")),
        })?;

        if population.is_empty() {
            return Err(DomainError::step(step, "sampler returned an empty population"));
        }

        let dimension = self.current.dimension();
        let mut candidates = Vec::with_capacity(population.len());
        for vector in population {
            if vector.dimension() != dimension {
                return Err(DomainError::step(
                    step,
                    format!(
                        "candidate dimension {} does not match current dimension {}",
                        vector.dimension(),
                        dimension
                    ),
                ));
            }
            let height = self.scorer.height(&vector, &self.current);
            if height.is_nan() {
                return Err(DomainError::step(step, "candidate height is NaN"));
            }
            candidates.push(Candidate { vector, height });
        }

        let best = select_best(&candidates)
            .ok_or_else(|| DomainError::step(step, "no candidate could be selected"))?;
        let best_vector = candidates[best].vector.clone();
        let best_height = candidates[best].height;

        let current_height = self.scorer.height(&self.current, &self.current);
        let force_scores = self.scorer.force_scores(&best_vector);

        debug!(
            trajectory = %self.id,
            step,
            population = candidates.len(),
            current_height,
            best_height,
            "step scored"
        );

        let result = StepResult {
            step_index: step,
            current_height,
            best_vector,
            best_height,
            force_scores,
            candidates,
        };

        info!(
            trajectory = %self.id,
            step,
            best_height,
            dominant_force = result.dominant_force().unwrap_or("-"),
            "step completed"
        );

        Ok(result)
    }
}

impl Iterator for TrajectoryStepper {
    type Item = DomainResult<StepResult>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_step()
    }
}

/// Index of the candidate with strictly minimal height; the first minimal
/// candidate in sampler order wins ties.
pub fn select_best(candidates: &[Candidate]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        match best {
            Some((_, height)) if candidate.height >= height => {}
            _ => best = Some((index, candidate.height)),
        }
    }
    best.map(|(index, _)| index)
}

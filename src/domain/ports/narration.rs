//! Text narration port.
//!
//! Narration is best-effort: the trajectory core never depends on its
//! output, and callers downgrade failures to an absent summary.

use async_trait::async_trait;

use super::context::ContextMatch;
use crate::domain::errors::DomainResult;
use crate::domain::models::{ForceScores, StateVector};

/// Everything a narrator may draw on for one step.
#[derive(Debug, Clone)]
pub struct NarrationRequest {
    pub force_scores: ForceScores,
    pub vector: StateVector,
    /// Nearest source sentences, most similar first.
    pub contexts: Vec<ContextMatch>,
}

/// One step of a finished trajectory, reduced to its narration.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDigest {
    pub step: usize,
    pub summary: String,
}

/// A finished trajectory as the seed text plus one line per step.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryDigest {
    pub input: String,
    pub steps: Vec<StepDigest>,
}

impl TrajectoryDigest {
    /// `Step N: summary` lines, in step order.
    pub fn step_lines(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|s| format!("Step {}: {}", s.step, s.summary))
            .collect()
    }
}

/// Turns a scored state into prose.
#[async_trait]
pub trait Narrator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Render the state described by `request` as natural language.
    async fn narrate(&self, request: &NarrationRequest) -> DomainResult<String>;

    /// One overall account of a whole trajectory.
    async fn summarize_trajectory(&self, digest: &TrajectoryDigest) -> DomainResult<String>;
}

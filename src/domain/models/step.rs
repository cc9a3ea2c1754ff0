//! Scored candidates, per-step results and the records built from them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state_vector::StateVector;

/// Number of entries kept in truncated vector and candidate previews.
pub const PREVIEW_LEN: usize = 10;

/// Per-force weight-multiplied dot products, keyed by force name.
pub type ForceScores = BTreeMap<String, f64>;

/// An ephemeral scored sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub vector: StateVector,
    pub height: f64,
}

/// Outcome of one trajectory step.
///
/// Immutable once emitted; the stepper keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Zero-based position in the trajectory.
    #[serde(rename = "step")]
    pub step_index: usize,
    /// Height of the vector the step started from.
    pub current_height: f64,
    pub best_vector: StateVector,
    pub best_height: f64,
    /// Weighted alignment of `best_vector` with each force.
    pub force_scores: ForceScores,
    /// Every scored candidate, in sampler order.
    pub candidates: Vec<Candidate>,
}

impl StepResult {
    /// Name of the force with the largest score, if any.
    pub fn dominant_force(&self) -> Option<&str> {
        dominant_force(&self.force_scores)
    }
}

/// Largest-score force; the first name in key order wins ties.
pub fn dominant_force(scores: &ForceScores) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;
    for (name, &score) in scores {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((name.as_str(), score)),
        }
    }
    best.map(|(name, _)| name)
}

/// A step result with its optional narration, as delivered to callers of
/// the forecast service and written to JSONL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    #[serde(flatten)]
    pub result: StepResult,
    /// Narration of the step; `None` when narration is off or failed.
    pub summary: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl StepRecord {
    pub fn new(result: StepResult, summary: Option<String>) -> Self {
        Self {
            result,
            summary,
            generated_at: Utc::now(),
        }
    }

    /// Essential fields only: no vectors, no candidates.
    pub fn lightweight(&self) -> StepSummary {
        StepSummary {
            step: self.result.step_index,
            current_height: self.result.current_height,
            best_height: self.result.best_height,
            summary: self.summary.clone(),
        }
    }

    /// Detailed view with vectors and candidates truncated to
    /// [`PREVIEW_LEN`] entries.
    pub fn verbose(&self) -> StepDetail {
        StepDetail {
            step: self.result.step_index,
            current_height: self.result.current_height,
            best_height: self.result.best_height,
            summary: self.summary.clone(),
            force_scores: self.result.force_scores.clone(),
            best_vector_preview: self.result.best_vector.preview(PREVIEW_LEN),
            candidates_preview: self
                .result
                .candidates
                .iter()
                .take(PREVIEW_LEN)
                .map(|c| CandidatePreview {
                    height: c.height,
                    vector_preview: c.vector.preview(PREVIEW_LEN),
                })
                .collect(),
        }
    }
}

/// Lightweight view of a step record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepSummary {
    pub step: usize,
    pub current_height: f64,
    pub best_height: f64,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidatePreview {
    pub height: f64,
    pub vector_preview: Vec<f64>,
}

/// Verbose view of a step record with truncated vector previews.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepDetail {
    pub step: usize,
    pub current_height: f64,
    pub best_height: f64,
    pub summary: Option<String>,
    pub force_scores: ForceScores,
    pub best_vector_preview: Vec<f64>,
    pub candidates_preview: Vec<CandidatePreview>,
}

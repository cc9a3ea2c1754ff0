//! Best-effort narration of step results.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::models::{StepRecord, StepResult};
use crate::domain::ports::{
    ContextRetriever, NarrationRequest, Narrator, StepDigest, TrajectoryDigest,
};
use crate::services::force_summary::summarize_forces;

/// Forces named in the fallback line of a step that has no narration.
const DIGEST_TOP_FORCES: usize = 3;

/// Pairs a narrator with the context retriever that feeds it.
///
/// Narration never fails a trajectory: errors are logged and the step is
/// emitted without a summary.
#[derive(Clone)]
pub struct FutureDecoder {
    narrator: Arc<dyn Narrator>,
    retriever: Arc<dyn ContextRetriever>,
    context_samples: usize,
}

impl FutureDecoder {
    pub fn new(
        narrator: Arc<dyn Narrator>,
        retriever: Arc<dyn ContextRetriever>,
        context_samples: usize,
    ) -> Self {
        Self {
            narrator,
            retriever,
            context_samples,
        }
    }

    pub fn narrator_name(&self) -> &'static str {
        self.narrator.name()
    }

    /// Narrate the best vector of `result`.
    pub async fn decode(&self, result: &StepResult) -> Option<String> {
        let request = NarrationRequest {
            force_scores: result.force_scores.clone(),
            vector: result.best_vector.clone(),
            contexts: self
                .retriever
                .nearest(&result.best_vector, self.context_samples),
        };

        match self.narrator.narrate(&request).await {
            Ok(summary) => {
                debug!(step = result.step_index, narrator = self.narrator.name(), "step narrated");
                Some(summary)
            }
            Err(err) => {
                warn!(
                    step = result.step_index,
                    narrator = self.narrator.name(),
                    error = %err,
                    "narration failed, emitting step without summary"
                );
                None
            }
        }
    }

    /// One overall summary of `steps`, seeded from `input`.
    ///
    /// Steps emitted without narration contribute their dominant forces
    /// instead. `None` for an empty trajectory or a failed narration.
    pub async fn summarize_trajectory(&self, input: &str, steps: &[StepRecord]) -> Option<String> {
        if steps.is_empty() {
            return None;
        }
        let digest = TrajectoryDigest {
            input: input.to_string(),
            steps: steps
                .iter()
                .map(|record| StepDigest {
                    step: record.result.step_index,
                    summary: record.summary.clone().unwrap_or_else(|| {
                        summarize_forces(&record.result.force_scores, DIGEST_TOP_FORCES)
                    }),
                })
                .collect(),
        };

        match self.narrator.summarize_trajectory(&digest).await {
            Ok(summary) => {
                debug!(steps = steps.len(), narrator = self.narrator.name(), "trajectory summarized");
                Some(summary)
            }
            Err(err) => {
                warn!(
                    steps = steps.len(),
                    narrator = self.narrator.name(),
                    error = %err,
                    "trajectory summary failed"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for FutureDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FutureDecoder")
            .field("narrator", &self.narrator.name())
            .field("context_samples", &self.context_samples)
            .finish_non_exhaustive()
    }
}

//! Serving-layer entry points: embed a description, run a trajectory,
//! narrate each step as it is produced.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::adapters::context::InMemoryContextRetriever;
use crate::adapters::embeddings::{LocalEmbeddingProvider, OpenAiEmbeddingProvider};
use crate::adapters::narration::{OpenAiChatNarrator, TemplateNarrator};
use crate::adapters::storage::{load_force_definitions, load_social_reference};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Config, SamplerConfig, SimulationConfig, StateVector, StepRecord, StepResult,
};
use crate::domain::ports::{EmbeddingProvider, HeightScorer, Narrator};
use crate::infrastructure::openai::{OpenAiClient, RetryPolicy};
use crate::services::cma_sampler::CmaSampler;
use crate::services::future_decoder::FutureDecoder;
use crate::services::scoring_context::ScoringContext;
use crate::services::trajectory::TrajectoryStepper;

/// Outcome of one trajectory: the steps that completed, in order, and the
/// terminal error if the trajectory stopped early.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryReport {
    pub trajectory_id: Uuid,
    /// Step count after clamping.
    pub requested_steps: usize,
    pub steps: Vec<StepRecord>,
    /// Why the trajectory stopped early.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrajectoryReport {
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.steps.len() == self.requested_steps
    }
}

/// Built once per process; every call runs an independent trajectory over
/// the shared scoring context.
pub struct ForecastService {
    scoring: Arc<ScoringContext>,
    scorer: Arc<dyn HeightScorer>,
    embedder: Arc<dyn EmbeddingProvider>,
    decoder: Option<FutureDecoder>,
    sampler: SamplerConfig,
    simulation: SimulationConfig,
}

impl ForecastService {
    pub fn new(
        scoring: Arc<ScoringContext>,
        embedder: Arc<dyn EmbeddingProvider>,
        decoder: Option<FutureDecoder>,
        sampler: SamplerConfig,
        simulation: SimulationConfig,
    ) -> Self {
        let scorer: Arc<dyn HeightScorer> = Arc::new(scoring.height_calculator());
        Self {
            scoring,
            scorer,
            embedder,
            decoder,
            sampler,
            simulation,
        }
    }

    /// Wire the service from configuration.
    ///
    /// `offline` swaps the OpenAI adapters for the local embedder and the
    /// template narrator.
    pub async fn from_config(config: &Config, offline: bool) -> DomainResult<Self> {
        let embedder = build_embedder(config, offline)?;
        let scoring = Arc::new(ScoringContext::load(config, embedder.as_ref()).await?);

        let decoder = if config.narration.enabled {
            let narrator = build_narrator(config, offline)?;
            let sentences = reference_sentences(config)?;
            let retriever = InMemoryContextRetriever::build(
                embedder.as_ref(),
                sentences,
                config.height.epsilon,
            )
            .await?;
            Some(FutureDecoder::new(
                narrator,
                Arc::new(retriever),
                config.narration.context_samples,
            ))
        } else {
            None
        };

        Ok(Self::new(
            scoring,
            embedder,
            decoder,
            config.sampler.clone(),
            config.simulation.clone(),
        ))
    }

    pub fn scoring(&self) -> &ScoringContext {
        &self.scoring
    }

    pub fn embedder_name(&self) -> &'static str {
        self.embedder.name()
    }

    /// Serving-layer step policy: at least one, at most `max_serving_steps`.
    pub fn clamp_steps(&self, requested: usize) -> usize {
        requested.clamp(1, self.simulation.max_serving_steps.max(1))
    }

    /// Run up to `max_serving_steps` steps from `sentence`, handing each
    /// narrated step to `sink` as soon as it is produced.
    pub async fn simulate<F>(
        &self,
        sentence: &str,
        steps: usize,
        cancel: CancellationToken,
        sink: F,
    ) -> DomainResult<TrajectoryReport>
    where
        F: FnMut(&StepRecord) -> DomainResult<()>,
    {
        let steps = self.clamp_steps(steps);
        let seed = self.embed_seed(sentence).await?;
        let stepper = self.stepper(seed, steps)?.with_cancellation(cancel);
        self.drive(stepper, sink).await
    }

    /// Run exactly one step from `sentence`.
    pub async fn transition(&self, sentence: &str) -> DomainResult<StepRecord> {
        let seed = self.embed_seed(sentence).await?;
        let mut stepper = self.stepper(seed, 1)?;
        let result = stepper
            .next_step()
            .ok_or_else(|| DomainError::step(0, "trajectory produced no step"))??;
        let summary = self.narrate(&result).await;
        Ok(StepRecord::new(result, summary))
    }

    /// Batch path without the serving bound; `steps` defaults to
    /// `simulation.default_steps`.
    pub async fn run_batch<F>(
        &self,
        sentence: &str,
        steps: Option<usize>,
        cancel: CancellationToken,
        sink: F,
    ) -> DomainResult<TrajectoryReport>
    where
        F: FnMut(&StepRecord) -> DomainResult<()>,
    {
        let steps = steps.unwrap_or(self.simulation.default_steps);
        let seed = self.embed_seed(sentence).await?;
        let stepper = self.stepper(seed, steps)?.with_cancellation(cancel);
        self.drive(stepper, sink).await
    }

    /// One narrated account of a finished trajectory.
    ///
    /// Best-effort like step narration: `None` when narration is disabled,
    /// `steps` is empty, or the narrator fails.
    pub async fn summarize_trajectory(&self, input: &str, steps: &[StepRecord]) -> Option<String> {
        match &self.decoder {
            Some(decoder) => decoder.summarize_trajectory(input, steps).await,
            None => None,
        }
    }

    async fn embed_seed(&self, sentence: &str) -> DomainResult<StateVector> {
        if sentence.trim().is_empty() {
            return Err(DomainError::InvalidConfiguration(
                "seed description must not be empty".into(),
            ));
        }
        let seed = self.embedder.embed_one(sentence).await?;
        if seed.dimension() != self.scoring.dimension() {
            return Err(DomainError::ConfigurationError(format!(
                "seed embedding has dimension {} but the force table has {}; rebuild the cache with the same embedder",
                seed.dimension(),
                self.scoring.dimension()
            )));
        }
        Ok(seed)
    }

    fn stepper(&self, seed: StateVector, steps: usize) -> DomainResult<TrajectoryStepper> {
        let sampler = CmaSampler::from_config(&self.sampler)?;
        Ok(TrajectoryStepper::new(
            Arc::clone(&self.scorer),
            Box::new(sampler),
            seed,
            steps,
        ))
    }

    async fn narrate(&self, result: &StepResult) -> Option<String> {
        match &self.decoder {
            Some(decoder) => decoder.decode(result).await,
            None => None,
        }
    }

    #[instrument(
        name = "trajectory",
        skip_all,
        fields(trajectory_id = %stepper.id(), steps = stepper.total_steps())
    )]
    async fn drive<F>(
        &self,
        mut stepper: TrajectoryStepper,
        mut sink: F,
    ) -> DomainResult<TrajectoryReport>
    where
        F: FnMut(&StepRecord) -> DomainResult<()>,
    {
        let mut report = TrajectoryReport {
            trajectory_id: stepper.id(),
            requested_steps: stepper.total_steps(),
            steps: Vec::with_capacity(stepper.total_steps()),
            error: None,
        };

        while let Some(outcome) = stepper.next_step() {
            match outcome {
                Ok(result) => {
                    let summary = self.narrate(&result).await;
                    let record = StepRecord::new(result, summary);
                    sink(&record)?;
                    report.steps.push(record);
                }
                Err(err) => {
                    warn!(error = %err, completed = report.steps.len(), "trajectory stopped early");
                    report.error = Some(err.to_string());
                    break;
                }
            }
        }

        info!(
            completed = report.steps.len(),
            complete = report.is_complete(),
            "trajectory finished"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastService")
            .field("embedder", &self.embedder.name())
            .field("decoder", &self.decoder)
            .field("sampler", &self.sampler)
            .field("simulation", &self.simulation)
            .finish_non_exhaustive()
    }
}

fn openai_client(config: &Config) -> DomainResult<OpenAiClient> {
    OpenAiClient::new(
        config.embedding.base_url.clone(),
        config.embedding.api_key.clone(),
        config.embedding.timeout_secs,
        RetryPolicy::from_config(&config.retry),
    )
    .map_err(|e| DomainError::ConfigurationError(format!("failed to build HTTP client: {e}")))
}

/// The embedder selected by `offline`.
pub fn build_embedder(config: &Config, offline: bool) -> DomainResult<Arc<dyn EmbeddingProvider>> {
    if offline {
        return Ok(Arc::new(LocalEmbeddingProvider::default()));
    }
    let client = openai_client(config)?;
    Ok(Arc::new(OpenAiEmbeddingProvider::new(client, &config.embedding)))
}

fn build_narrator(config: &Config, offline: bool) -> DomainResult<Arc<dyn Narrator>> {
    if offline {
        return Ok(Arc::new(TemplateNarrator::new(config.narration.top_forces)));
    }
    let client = openai_client(config)?;
    Ok(Arc::new(OpenAiChatNarrator::new(client, &config.narration)))
}

/// Every force definition sentence followed by the social reference
/// sentences. A missing definitions file leaves only the reference set.
fn reference_sentences(config: &Config) -> DomainResult<Vec<String>> {
    let mut sentences = Vec::new();
    match load_force_definitions(&config.paths.force_definitions) {
        Ok(definitions) => {
            sentences.extend(definitions.into_iter().flat_map(|d| d.sentences));
        }
        Err(DomainError::ConfigurationError(reason)) => {
            warn!(%reason, "force definitions unavailable for context retrieval");
        }
        Err(err) => return Err(err),
    }
    sentences.extend(load_social_reference(&config.paths.social_reference)?);
    Ok(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Force, ForceTable, HeightConfig};

    fn service(max_serving_steps: usize) -> ForecastService {
        let embedder = LocalEmbeddingProvider::new(8).unwrap();
        let table = ForceTable::new(vec![
            Force::new("calm", embedder.embed_text("quiet calm streets"), 1.0),
            Force::new("rush", embedder.embed_text("busy rush hour"), 1.0),
        ])
        .unwrap();
        let centroid = embedder.embed_text("ordinary daily life");
        let scoring = ScoringContext::new(table, centroid, HeightConfig::default()).unwrap();

        ForecastService::new(
            Arc::new(scoring),
            Arc::new(embedder),
            None,
            SamplerConfig {
                seed: Some(7),
                ..SamplerConfig::default()
            },
            SimulationConfig {
                default_steps: 3,
                max_serving_steps,
            },
        )
    }

    #[test]
    fn test_clamp_steps() {
        let service = service(5);
        assert_eq!(service.clamp_steps(0), 1);
        assert_eq!(service.clamp_steps(3), 3);
        assert_eq!(service.clamp_steps(50), 5);
    }

    #[tokio::test]
    async fn test_simulate_streams_each_step() {
        let service = service(5);
        let mut streamed = Vec::new();
        let report = service
            .simulate("a calm town", 9, CancellationToken::new(), |record| {
                streamed.push(record.result.step_index);
                Ok(())
            })
            .await
            .unwrap();

        assert!(report.is_complete());
        assert_eq!(report.requested_steps, 5);
        assert_eq!(streamed, vec![0, 1, 2, 3, 4]);
        assert!(report.steps.iter().all(|s| s.summary.is_none()));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let service = service(5);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = service
            .simulate("a calm town", 3, cancel, |_| Ok(()))
            .await
            .unwrap();
        assert!(report.steps.is_empty());
        assert!(report.error.unwrap().contains("cancelled"));
    }

    #[tokio::test]
    async fn test_transition_runs_one_step() {
        let record = service(5).transition("rush hour").await.unwrap();
        assert_eq!(record.result.step_index, 0);
        assert_eq!(record.result.candidates.len(), 12);
    }

    #[tokio::test]
    async fn test_run_batch_uses_default_steps() {
        let report = service(1)
            .run_batch("rush hour", None, CancellationToken::new(), |_| Ok(()))
            .await
            .unwrap();
        assert_eq!(report.steps.len(), 3);
    }

    #[tokio::test]
    async fn test_blank_seed_rejected() {
        let err = service(5).transition("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfiguration(_)));
    }

    #[tokio::test]
    async fn test_sink_error_propagates() {
        let err = service(5)
            .simulate("calm", 2, CancellationToken::new(), |_| {
                Err(DomainError::SerializationError("disk full".into()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }
}

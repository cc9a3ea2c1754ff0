//! Load-once scoring inputs shared by every trajectory.

use std::sync::Arc;

use tracing::info;

use crate::adapters::storage::{load_force_table, load_social_reference};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Config, ForceTable, HeightConfig, StateVector};
use crate::domain::ports::EmbeddingProvider;
use crate::services::force_interaction::WeightedForceInteraction;
use crate::services::height_calculator::HeightCalculator;
use crate::services::penalties::{CompositePenalty, DistancePenalty, SocialPenalty};

/// The force table, the social-reference centroid and the height constants.
///
/// Built once at startup and shared read-only across concurrent
/// trajectories. Nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    table: Arc<ForceTable>,
    centroid: StateVector,
    height: HeightConfig,
}

impl ScoringContext {
    /// Validate the parameters and check the centroid against the table dimension.
    pub fn new(table: ForceTable, centroid: StateVector, height: HeightConfig) -> DomainResult<Self> {
        if !(height.epsilon.is_finite() && height.epsilon > 0.0) {
            return Err(DomainError::InvalidConfiguration(format!(
                "epsilon must be positive and finite, got {}",
                height.epsilon
            )));
        }
        if !(height.distance_alpha.is_finite() && height.distance_alpha >= 0.0) {
            return Err(DomainError::InvalidConfiguration(format!(
                "distance_alpha must be non-negative and finite, got {}",
                height.distance_alpha
            )));
        }
        if centroid.dimension() != table.dimension() {
            return Err(DomainError::ConfigurationError(format!(
                "social centroid dimension {} does not match force dimension {}",
                centroid.dimension(),
                table.dimension()
            )));
        }

        Ok(Self {
            table: Arc::new(table),
            centroid,
            height,
        })
    }

    /// Read the force cache, the weights and the social reference from the
    /// configured paths and embed the reference sentences.
    pub async fn load(config: &Config, embedder: &dyn EmbeddingProvider) -> DomainResult<Self> {
        let table = load_force_table(&config.paths.force_cache, &config.paths.force_weights)?;
        let sentences = load_social_reference(&config.paths.social_reference)?;
        let centroid = social_centroid(embedder, &sentences).await?;

        info!(
            forces = table.len(),
            dimension = table.dimension(),
            reference_sentences = sentences.len(),
            "scoring context loaded"
        );
        Self::new(table, centroid, config.height)
    }

    pub fn table(&self) -> &Arc<ForceTable> {
        &self.table
    }

    pub fn centroid(&self) -> &StateVector {
        &self.centroid
    }

    pub fn height_config(&self) -> HeightConfig {
        self.height
    }

    pub fn dimension(&self) -> usize {
        self.table.dimension()
    }

    /// A height function over this context's forces and penalties.
    pub fn height_calculator(&self) -> HeightCalculator {
        let epsilon = self.height.epsilon;
        let interaction = WeightedForceInteraction::new(Arc::clone(&self.table), epsilon);
        let penalties = CompositePenalty::new(
            SocialPenalty::new(self.centroid.clone(), epsilon),
            DistancePenalty::new(self.height.distance_alpha),
        );
        HeightCalculator::new(Arc::new(interaction), Arc::new(penalties), epsilon)
    }
}

/// Mean embedding of the social reference sentences.
pub async fn social_centroid(
    embedder: &dyn EmbeddingProvider,
    sentences: &[String],
) -> DomainResult<StateVector> {
    let vectors = embedder.embed(sentences).await?;
    StateVector::mean(&vectors).ok_or_else(|| {
        DomainError::ConfigurationError(
            "social reference produced no embeddings; add reference sentences".into(),
        )
    })
}

//! Embedding provider port for state vector generation.
//!
//! Defines the trait for embedding providers that convert text into
//! dense vector representations in social-state space.

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::StateVector;

/// Trait for embedding providers.
///
/// Every call within a process lifetime must return vectors of the same
/// dimension. Empty input yields empty output.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name (e.g., "openai", "local").
    fn name(&self) -> &'static str;

    /// Embed a batch of texts, preserving input order.
    async fn embed(&self, texts: &[String]) -> DomainResult<Vec<StateVector>>;

    /// Embed a single text.
    async fn embed_one(&self, text: &str) -> DomainResult<StateVector> {
        self.embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::EmbeddingUnavailable(format!(
                    "no embedding produced for input '{text}'"
                ))
            })
    }
}

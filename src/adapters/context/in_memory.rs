//! In-memory nearest-context retriever over reference sentences.

use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::StateVector;
use crate::domain::ports::{ContextMatch, ContextRetriever, EmbeddingProvider};

/// Reference sentences paired with their embeddings.
///
/// Built once and read-only afterwards; `nearest` is a linear scan.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContextRetriever {
    entries: Vec<(String, StateVector)>,
    epsilon: f64,
}

impl InMemoryContextRetriever {
    pub fn new(entries: Vec<(String, StateVector)>, epsilon: f64) -> Self {
        Self { entries, epsilon }
    }

    /// Embed `sentences` and index them. Blank sentences are skipped.
    pub async fn build(
        embedder: &dyn EmbeddingProvider,
        sentences: Vec<String>,
        epsilon: f64,
    ) -> DomainResult<Self> {
        let sentences: Vec<String> = sentences
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        if sentences.is_empty() {
            return Ok(Self::new(Vec::new(), epsilon));
        }

        let vectors = embedder.embed(&sentences).await?;
        if vectors.len() != sentences.len() {
            return Err(DomainError::EmbeddingUnavailable(format!(
                "expected {} context embeddings, got {}",
                sentences.len(),
                vectors.len()
            )));
        }

        debug!(entries = sentences.len(), "context retriever built");
        Ok(Self::new(sentences.into_iter().zip(vectors).collect(), epsilon))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContextRetriever for InMemoryContextRetriever {
    fn nearest(&self, vector: &StateVector, k: usize) -> Vec<ContextMatch> {
        let mut matches: Vec<ContextMatch> = self
            .entries
            .iter()
            .filter(|(_, emb)| emb.dimension() == vector.dimension())
            .map(|(text, emb)| ContextMatch {
                text: text.clone(),
                similarity: vector.cosine_similarity(emb, self.epsilon),
            })
            .collect();
        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        matches.truncate(k);
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::embeddings::LocalEmbeddingProvider;

    fn retriever() -> InMemoryContextRetriever {
        InMemoryContextRetriever::new(
            vec![
                ("east".into(), StateVector::new(vec![1.0, 0.0])),
                ("north".into(), StateVector::new(vec![0.0, 1.0])),
                ("northeast".into(), StateVector::new(vec![1.0, 1.0])),
            ],
            1e-8,
        )
    }

    #[test]
    fn test_nearest_ranks_descending() {
        let found = retriever().nearest(&StateVector::new(vec![1.0, 0.1]), 2);
        let names: Vec<&str> = found.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(names, vec!["east", "northeast"]);
        assert!(found[0].similarity >= found[1].similarity);
    }

    #[test]
    fn test_k_larger_than_table() {
        assert_eq!(retriever().nearest(&StateVector::new(vec![0.0, 1.0]), 10).len(), 3);
        assert!(retriever().nearest(&StateVector::new(vec![0.0, 1.0]), 0).is_empty());
    }

    #[tokio::test]
    async fn test_build_from_embedder() {
        let embedder = LocalEmbeddingProvider::new(32).unwrap();
        let retriever = InMemoryContextRetriever::build(
            &embedder,
            vec!["Neighbors trust each other".into(), " ".into(), "Markets boom".into()],
            1e-8,
        )
        .await
        .unwrap();
        assert_eq!(retriever.len(), 2);

        let query = embedder.embed_text("neighbors trust each other");
        let top = retriever.nearest(&query, 1);
        assert_eq!(top[0].text, "Neighbors trust each other");
    }
}

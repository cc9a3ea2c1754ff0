//! Rebuilds the force vector cache from force definition sentences.

use std::path::Path;

use tracing::{info, warn};

use crate::adapters::storage::{
    load_force_definitions, save_force_vectors, ForceDefinition, ForceVectors,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::StateVector;
use crate::domain::ports::EmbeddingProvider;

/// Mean embedding of one force's sentences.
pub async fn compute_force_vector(
    embedder: &dyn EmbeddingProvider,
    sentences: &[String],
) -> DomainResult<StateVector> {
    let embeddings = embedder.embed(sentences).await?;
    if embeddings.is_empty() {
        return Err(DomainError::EmbeddingUnavailable(
            "no embeddings were produced for the provided sentences".into(),
        ));
    }
    StateVector::mean(&embeddings).ok_or_else(|| {
        DomainError::EmbeddingUnavailable("embeddings disagree on dimension".into())
    })
}

/// Progress notifications emitted while the cache is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEvent<'a> {
    /// Definitions loaded; `forces` of them will be handled.
    Started { forces: usize },
    /// One definition handled; `sentences` is 0 when it was skipped.
    Embedded { name: &'a str, sentences: usize },
}

/// Embed every definition. Forces without sentences are skipped.
pub async fn build_force_vectors<F>(
    embedder: &dyn EmbeddingProvider,
    definitions: &[ForceDefinition],
    mut on_event: F,
) -> DomainResult<ForceVectors>
where
    F: FnMut(BuildEvent<'_>),
{
    on_event(BuildEvent::Started {
        forces: definitions.len(),
    });
    let mut vectors = ForceVectors::new();
    let mut dimension = None;

    for definition in definitions {
        if definition.sentences.iter().all(|s| s.trim().is_empty()) {
            warn!(force = %definition.name, "force has no sentences, skipping");
            on_event(BuildEvent::Embedded {
                name: &definition.name,
                sentences: 0,
            });
            continue;
        }

        info!(
            force = %definition.name,
            sentences = definition.sentences.len(),
            "embedding force"
        );
        let vector = compute_force_vector(embedder, &definition.sentences).await?;

        match dimension {
            None => dimension = Some(vector.dimension()),
            Some(d) if d != vector.dimension() => {
                return Err(DomainError::EmbeddingUnavailable(format!(
                    "force '{}' embedded to dimension {}, expected {d}",
                    definition.name,
                    vector.dimension()
                )));
            }
            Some(_) => {}
        }

        vectors.insert(definition.name.clone(), vector);
        on_event(BuildEvent::Embedded {
            name: &definition.name,
            sentences: definition.sentences.len(),
        });
    }

    Ok(vectors)
}

/// Load definitions from `definitions_path`, embed them and write the
/// cache to `cache_path`.
pub async fn rebuild_force_cache<F>(
    embedder: &dyn EmbeddingProvider,
    definitions_path: &Path,
    cache_path: &Path,
    on_event: F,
) -> DomainResult<ForceVectors>
where
    F: FnMut(BuildEvent<'_>),
{
    let definitions = load_force_definitions(definitions_path)?;
    let vectors = build_force_vectors(embedder, &definitions, on_event).await?;
    if vectors.is_empty() {
        return Err(DomainError::ConfigurationError(format!(
            "{} defines no force with sentences",
            definitions_path.display()
        )));
    }
    save_force_vectors(cache_path, &vectors)?;
    info!(path = %cache_path.display(), forces = vectors.len(), "force vector cache saved");
    Ok(vectors)
}

//! Building the force cache from definitions and loading it back.

mod common;

use forcepath::adapters::embeddings::{LocalEmbeddingProvider, DEFAULT_LOCAL_DIMENSION};
use forcepath::adapters::storage::{load_force_table, load_force_vectors};
use forcepath::services::{rebuild_force_cache, BuildEvent};
use forcepath::DomainError;

#[tokio::test]
async fn test_rebuild_reports_progress_and_persists() {
    let fixture = common::data_fixture();
    let embedder = LocalEmbeddingProvider::default();

    let mut started = None;
    let mut embedded = Vec::new();
    let vectors = rebuild_force_cache(
        &embedder,
        &fixture.config.paths.force_definitions,
        &fixture.config.paths.force_cache,
        |event| match event {
            BuildEvent::Started { forces } => started = Some(forces),
            BuildEvent::Embedded { name, .. } => embedded.push(name.to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(started, Some(3));
    assert_eq!(embedded, vec!["security", "prosperity", "equity"]);
    assert_eq!(vectors.len(), 3);

    let loaded = load_force_vectors(&fixture.config.paths.force_cache).unwrap();
    assert_eq!(loaded, vectors);
}

#[tokio::test]
async fn test_cached_table_carries_weights() {
    let fixture = common::offline_fixture().await;
    let table = load_force_table(
        &fixture.config.paths.force_cache,
        &fixture.config.paths.force_weights,
    )
    .unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.dimension(), DEFAULT_LOCAL_DIMENSION);
    assert_eq!(table.weight("security"), 1.2);
    assert_eq!(table.weight("equity"), 0.8);
    assert_eq!(table.names(), vec!["equity", "prosperity", "security"]);
}

#[tokio::test]
async fn test_missing_cache_is_configuration_error() {
    let fixture = common::data_fixture();
    let result = load_force_table(
        &fixture.config.paths.force_cache,
        &fixture.config.paths.force_weights,
    );
    assert!(matches!(result, Err(DomainError::ConfigurationError(_))));
}

#[tokio::test]
async fn test_definitions_without_sentences_fail() {
    let fixture = common::data_fixture();
    std::fs::write(
        &fixture.config.paths.force_definitions,
        "forces:\n  empty: {}\n",
    )
    .unwrap();

    let result = rebuild_force_cache(
        &LocalEmbeddingProvider::default(),
        &fixture.config.paths.force_definitions,
        &fixture.config.paths.force_cache,
        |_| {},
    )
    .await;

    assert!(matches!(result, Err(DomainError::ConfigurationError(_))));
    assert!(!fixture.config.paths.force_cache.exists());
}

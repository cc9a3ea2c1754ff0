//! Common test utilities for integration tests
//!
//! Provides a self-contained data directory (force definitions, social
//! reference, weights, cache) and a configuration pointing at it, so the
//! offline service can be exercised without network access.

use std::path::{Path, PathBuf};

use forcepath::adapters::embeddings::LocalEmbeddingProvider;
use forcepath::domain::models::Config;
use forcepath::services::rebuild_force_cache;
use tempfile::TempDir;

pub const FORCES_YAML: &str = r"
forces:
  security:
    sentences:
      - People want safe streets and predictable rules.
      - Institutions guard citizens against threats.
  prosperity:
    sentences:
      - Markets expand and wages rise.
      - New businesses hire local workers.
  equity:
    sentences:
      - Resources are shared fairly between neighborhoods.
      - Public services reach the poorest residents first.
";

pub const SOCIAL_REFERENCE_YAML: &str = r"
sentences:
  - People go to work and come home to their families.
  - Neighbors share local news on the street.
  - Town councils argue over budgets and parks.
";

pub const WEIGHTS_JSON: &str = r#"{"security": 1.2, "prosperity": 1.0, "equity": 0.8}"#;

/// Temporary data directory plus a configuration that points into it.
pub struct Fixture {
    pub dir: TempDir,
    pub config: Config,
}

impl Fixture {
    #[allow(dead_code)]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

/// Write the source files and point a default configuration at them.
///
/// The force cache is NOT built; see [`offline_fixture`].
pub fn data_fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(dir.path(), "data/forces/forces.yaml", FORCES_YAML);
    write(dir.path(), "data/social_reference.yaml", SOCIAL_REFERENCE_YAML);
    write(dir.path(), "config/force_weights.json", WEIGHTS_JSON);

    let mut config = Config::default();
    config.paths.force_definitions = dir.path().join("data/forces/forces.yaml");
    config.paths.social_reference = dir.path().join("data/social_reference.yaml");
    config.paths.force_weights = dir.path().join("config/force_weights.json");
    config.paths.force_cache = dir.path().join("cache/force_vectors.json");
    config.sampler.seed = Some(11);

    Fixture { dir, config }
}

/// Data fixture with the force cache already built by the local embedder.
#[allow(dead_code)]
pub async fn offline_fixture() -> Fixture {
    let fixture = data_fixture();
    let embedder = LocalEmbeddingProvider::default();
    rebuild_force_cache(
        &embedder,
        &fixture.config.paths.force_definitions,
        &fixture.config.paths.force_cache,
        |_| {},
    )
    .await
    .expect("Failed to build force cache");
    fixture
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(path, content).expect("Failed to write fixture file");
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

//! Persisted force vector table and weight mapping.
//!
//! The cache is a JSON object keyed by force name, each value a plain array
//! of components. It is rebuilt from source sentences, never hand-edited.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ForceTable, StateVector};

/// Force name to reference vector, ordered by name.
pub type ForceVectors = BTreeMap<String, StateVector>;

/// Write the cache, creating parent directories.
pub fn save_force_vectors(path: &Path, vectors: &ForceVectors) -> DomainResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string(vectors)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_force_vectors(path: &Path) -> DomainResult<ForceVectors> {
    if !path.exists() {
        return Err(DomainError::ConfigurationError(format!(
            "force vector cache missing: {} (run `forcepath build-cache`)",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        DomainError::ConfigurationError(format!(
            "force vector cache {} is malformed: {e}",
            path.display()
        ))
    })
}

pub fn load_force_weights(path: &Path) -> DomainResult<HashMap<String, f64>> {
    if !path.exists() {
        return Err(DomainError::ConfigurationError(format!(
            "force weight file missing: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        DomainError::ConfigurationError(format!(
            "force weight file {} is malformed: {e}",
            path.display()
        ))
    })
}

/// Load the cached vectors and the weights into a validated table.
pub fn load_force_table(cache_path: &Path, weights_path: &Path) -> DomainResult<ForceTable> {
    let vectors = load_force_vectors(cache_path)?;
    let weights = load_force_weights(weights_path)?;
    ForceTable::from_parts(vectors, &weights)
}

//! Context retrieval port used by narration.

use serde::{Deserialize, Serialize};

use crate::domain::models::StateVector;

/// A reference sentence and its similarity to a query vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMatch {
    pub text: String,
    pub similarity: f64,
}

/// Nearest-neighbour lookup over reference sentences.
pub trait ContextRetriever: Send + Sync {
    /// Up to `k` matches ordered by descending similarity.
    fn nearest(&self, vector: &StateVector, k: usize) -> Vec<ContextMatch>;
}

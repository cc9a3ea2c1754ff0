//! Deterministic offline embedder.
//!
//! Hashes lowercase word tokens into a fixed number of buckets and
//! L2-normalizes the counts. Sentences that share words land close to each
//! other, which is enough for offline runs and tests. Same text, same vector.

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::StateVector;
use crate::domain::ports::EmbeddingProvider;

pub const DEFAULT_LOCAL_DIMENSION: usize = 256;

/// Buckets touched per token.
const PROBES: u64 = 3;

/// Deterministic hashed bag-of-words embedder for offline runs.
#[derive(Debug, Clone)]
pub struct LocalEmbeddingProvider {
    dimension: usize,
}

impl LocalEmbeddingProvider {
    pub fn new(dimension: usize) -> DomainResult<Self> {
        if dimension == 0 {
            return Err(DomainError::InvalidConfiguration(
                "local embedding dimension must be at least 1".into(),
            ));
        }
        Ok(Self { dimension })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed one text synchronously.
    pub fn embed_text(&self, text: &str) -> StateVector {
        let mut embedding = vec![0.0_f64; self.dimension];

        for token in tokens(text) {
            let hash = fnv1a(token.as_bytes());
            for probe in 0..PROBES {
                let mixed = hash.rotate_left((probe * 21) as u32) ^ probe.wrapping_mul(0x9e37_79b9);
                let bucket = (mixed % self.dimension as u64) as usize;
                let sign = if (mixed >> 63) & 1 == 0 { 1.0 } else { -1.0 };
                embedding[bucket] += sign;
            }
        }

        let magnitude = embedding.iter().map(|x| x * x).sum::<f64>().sqrt();
        if magnitude > 1e-12 {
            for val in &mut embedding {
                *val /= magnitude;
            }
        } else {
            let uniform = 1.0 / (self.dimension as f64).sqrt();
            embedding.fill(uniform);
        }

        StateVector::new(embedding)
    }
}

impl Default for LocalEmbeddingProvider {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_LOCAL_DIMENSION,
        }
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[async_trait]
impl EmbeddingProvider for LocalEmbeddingProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn embed(&self, texts: &[String]) -> DomainResult<Vec<StateVector>> {
        Ok(texts
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| self.embed_text(t))
            .collect())
    }
}

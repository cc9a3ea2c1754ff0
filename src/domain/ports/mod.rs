//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the trajectory core and the service
//! layer depend on:
//! - EmbeddingProvider: text to state vectors
//! - Narrator: step results to natural language
//! - ContextRetriever: nearest reference sentences for a vector
//! - ForceInteraction / PenaltyAggregator / HeightScorer: scoring capabilities
//! - CandidateSampler: population draws around the current vector

pub mod context;
pub mod embedding;
pub mod narration;
pub mod sampler;
pub mod scoring;

pub use context::{ContextMatch, ContextRetriever};
pub use embedding::EmbeddingProvider;
pub use narration::{NarrationRequest, Narrator, StepDigest, TrajectoryDigest};
pub use sampler::CandidateSampler;
pub use scoring::{ForceInteraction, HeightScorer, PenaltyAggregator};

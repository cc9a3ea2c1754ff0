//! Domain value types.

pub mod config;
pub mod force;
pub mod state_vector;
pub mod step;

pub use config::{
    Config, EmbeddingConfig, HeightConfig, LoggingConfig, NarrationConfig, PathsConfig,
    RetryConfig, SamplerConfig, SimulationConfig,
};
pub use force::{Force, ForceTable, DEFAULT_FORCE_WEIGHT};
pub use state_vector::{cosine_similarity, StateVector};
pub use step::{
    dominant_force, Candidate, ForceScores, StepDetail, StepRecord, StepResult, StepSummary,
};

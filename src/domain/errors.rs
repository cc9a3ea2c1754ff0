//! Domain errors for the forcepath trajectory engine.

use thiserror::Error;

/// Errors surfaced by the force table, the scoring core and the trajectory
/// stepper.
///
/// A trajectory that fails reports exactly one of these as its terminal
/// error. Step results emitted before the failure remain valid.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing force/weight definitions. Fatal at load.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Every embedding model in the fallback chain failed.
    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// Degenerate sampler or scoring parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Unexpected failure while sampling or scoring mid-trajectory.
    #[error("Step {step} failed: {reason}")]
    StepExecutionError { step: usize, reason: String },

    /// The caller abandoned the trajectory between steps.
    #[error("Trajectory cancelled before step {0}")]
    Cancelled(usize),

    /// Narration collaborator failure. Never aborts a trajectory.
    #[error("Narration failed: {0}")]
    NarrationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Build a step failure for the step at `step`.
    pub fn step(step: usize, reason: impl Into<String>) -> Self {
        Self::StepExecutionError {
            step,
            reason: reason.into(),
        }
    }

    /// Whether a caller may reasonably retry the whole operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::EmbeddingUnavailable(_) | Self::NarrationFailed(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for DomainError {
    fn from(err: serde_yaml::Error) -> Self {
        DomainError::ConfigurationError(err.to_string())
    }
}

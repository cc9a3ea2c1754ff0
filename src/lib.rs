//! forcepath - trajectories of social state under weighted forces
//!
//! A seed description is embedded into a state vector. Each step samples
//! candidate vectors around the current state, scores them with a height
//! function (lower is more plausible) and moves to the lowest candidate.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): state vectors, forces, step results, ports
//! - **Service Layer** (`services`): scoring, sampling, trajectories, serving
//! - **Adapters** (`adapters`): embedding and chat APIs, storage, context
//! - **Infrastructure Layer** (`infrastructure`): config, logging, HTTP
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use forcepath::{ConfigLoader, ForecastService};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let service = ForecastService::from_config(&config, true).await?;
//!     let report = service
//!         .simulate("Dense cities share transit", 3, CancellationToken::new(), |_| Ok(()))
//!         .await?;
//!     println!("{} steps", report.steps.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, Force, ForceScores, ForceTable, StateVector, StepRecord, StepResult,
};
pub use domain::ports::{
    CandidateSampler, ContextRetriever, EmbeddingProvider, ForceInteraction, HeightScorer,
    Narrator, PenaltyAggregator,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    CmaSampler, ForecastService, HeightCalculator, ScoringContext, TrajectoryReport,
    TrajectoryStepper,
};

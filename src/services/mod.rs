//! Application services: the scoring core, the sampler, the trajectory
//! stepper and the serving layer built on them.

pub mod cma_sampler;
pub mod force_builder;
pub mod force_interaction;
pub mod force_summary;
pub mod forecast_service;
pub mod future_decoder;
pub mod height_calculator;
pub mod penalties;
pub mod scoring_context;
pub mod trajectory;

pub use cma_sampler::{CmaSampler, SearchState};
pub use force_builder::{
    build_force_vectors, compute_force_vector, rebuild_force_cache, BuildEvent,
};
pub use force_interaction::WeightedForceInteraction;
pub use force_summary::{explain_direction, summarize_forces, top_forces};
pub use forecast_service::{build_embedder, ForecastService, TrajectoryReport};
pub use future_decoder::FutureDecoder;
pub use height_calculator::HeightCalculator;
pub use penalties::{CompositePenalty, DistancePenalty, SocialPenalty};
pub use scoring_context::{social_centroid, ScoringContext};
pub use trajectory::{select_best, TrajectoryState, TrajectoryStepper};

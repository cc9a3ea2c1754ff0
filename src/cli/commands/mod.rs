//! CLI command implementations.

pub mod build_cache;
pub mod forces;
pub mod simulate;
pub mod transition;

use anyhow::{Context, Result};

use crate::domain::models::{Config, StepRecord};
use crate::services::{summarize_forces, ForecastService};

/// Build the forecast service, applying a CLI seed override.
pub(crate) async fn build_service(
    config: &Config,
    offline: bool,
    seed: Option<u64>,
) -> Result<ForecastService> {
    let mut config = config.clone();
    if seed.is_some() {
        config.sampler.seed = seed;
    }
    ForecastService::from_config(&config, offline)
        .await
        .context("Failed to initialize forecast service")
}

/// Human-readable rendering of one narrated step.
pub(crate) fn format_step(record: &StepRecord, verbose: bool) -> String {
    let result = &record.result;
    let mut lines = vec![format!(
        "Step {} | current height {:.4} -> best {:.4} | dominant force {}",
        result.step_index,
        result.current_height,
        result.best_height,
        result.dominant_force().unwrap_or("-")
    )];
    if verbose {
        lines.push(format!("  {}", summarize_forces(&result.force_scores, usize::MAX)));
        lines.push(format!("  candidates: {}", result.candidates.len()));
    }
    if let Some(ref summary) = record.summary {
        lines.push(String::new());
        lines.push(summary.clone());
    }
    lines.join("\n")
}

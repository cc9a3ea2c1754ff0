//! Layered configuration loading and validation.

use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file, relative to the working directory
pub const CONFIG_FILE: &str = "forcepath.yaml";

/// Optional local overrides, relative to the working directory
pub const LOCAL_CONFIG_FILE: &str = ".forcepath/local.yaml";

/// Environment variable prefix; nested keys are split on `__`
pub const ENV_PREFIX: &str = "FORCEPATH_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid population_size: {0}. Must be at least 1")]
    InvalidPopulationSize(usize),

    #[error("Invalid sigma: {0}. Must be positive and finite")]
    InvalidSigma(f64),

    #[error("Invalid epsilon: {0}. Must be positive and finite")]
    InvalidEpsilon(f64),

    #[error("Invalid distance_alpha: {0}. Must be non-negative and finite")]
    InvalidDistanceAlpha(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Model name cannot be empty: {0}")]
    EmptyModelName(&'static str),

    #[error("Invalid batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Invalid max_serving_steps: {0}. Must be at least 1")]
    InvalidServingSteps(usize),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must not exceed max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. forcepath.yaml (project config)
    /// 3. .forcepath/local.yaml (local overrides, optional)
    /// 4. Environment variables (FORCEPATH_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        Self::load_in(Path::new("."))
    }

    /// Same as [`ConfigLoader::load`] with config files resolved against
    /// `dir`.
    pub fn load_in(dir: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join(CONFIG_FILE)))
            .merge(Yaml::file(dir.join(LOCAL_CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring environment
    /// overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.sampler.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize(0));
        }

        let sigma = config.sampler.sigma;
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ConfigError::InvalidSigma(sigma));
        }

        let epsilon = config.height.epsilon;
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }

        let alpha = config.height.distance_alpha;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(ConfigError::InvalidDistanceAlpha(alpha));
        }

        if config.embedding.model.trim().is_empty() {
            return Err(ConfigError::EmptyModelName("embedding.model"));
        }
        if config.narration.model.trim().is_empty() {
            return Err(ConfigError::EmptyModelName("narration.model"));
        }

        if config.embedding.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(0));
        }

        if config.simulation.max_serving_steps == 0 {
            return Err(ConfigError::InvalidServingSteps(0));
        }

        if config.retry.initial_backoff_ms > config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

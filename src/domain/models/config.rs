//! Configuration model with defaults for every field.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for forcepath
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Data and cache file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Embedding collaborator settings
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Narration collaborator settings
    #[serde(default)]
    pub narration: NarrationConfig,

    /// Candidate sampler settings
    #[serde(default)]
    pub sampler: SamplerConfig,

    /// Height function constants
    #[serde(default)]
    pub height: HeightConfig,

    /// Step count policy
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Retry policy for collaborator HTTP calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// File locations, relative to the working directory unless absolute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PathsConfig {
    /// Force definition sentences (YAML)
    #[serde(default = "default_force_definitions")]
    pub force_definitions: PathBuf,

    /// Social reference sentences (YAML)
    #[serde(default = "default_social_reference")]
    pub social_reference: PathBuf,

    /// Cached force vector table (JSON)
    #[serde(default = "default_force_cache")]
    pub force_cache: PathBuf,

    /// Force weight mapping (JSON)
    #[serde(default = "default_force_weights")]
    pub force_weights: PathBuf,
}

fn default_force_definitions() -> PathBuf {
    PathBuf::from("data/forces/forces.yaml")
}

fn default_social_reference() -> PathBuf {
    PathBuf::from("data/social_reference.yaml")
}

fn default_force_cache() -> PathBuf {
    PathBuf::from("cache/force_vectors.json")
}

fn default_force_weights() -> PathBuf {
    PathBuf::from("config/force_weights.json")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            force_definitions: default_force_definitions(),
            social_reference: default_social_reference(),
            force_cache: default_force_cache(),
            force_weights: default_force_weights(),
        }
    }
}

/// Embedding collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; falls back to `OPENAI_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Preferred embedding model
    #[serde(default = "default_embed_model")]
    pub model: String,

    /// Models tried, in order, when the preferred model is not found
    #[serde(default = "default_fallback_models")]
    pub fallback_models: Vec<String>,

    /// Maximum texts per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_embed_model() -> String {
    "text-embedding-4".to_string()
}

fn default_fallback_models() -> Vec<String> {
    vec![
        "text-embedding-4-large".to_string(),
        "text-embedding-3-large".to_string(),
        "text-embedding-3-small".to_string(),
    ]
}

const fn default_batch_size() -> usize {
    32
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_embed_model(),
            fallback_models: default_fallback_models(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Narration collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NarrationConfig {
    /// Attach narration to step results
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Chat model used for narration
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Sampling temperature for the chat model.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Nearest reference sentences passed as context cues
    #[serde(default = "default_context_samples")]
    pub context_samples: usize,

    /// Forces listed in the dominant-force summary
    #[serde(default = "default_top_forces")]
    pub top_forces: usize,
}

const fn default_true() -> bool {
    true
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

const fn default_temperature() -> f64 {
    0.7
}

const fn default_max_tokens() -> u32 {
    600
}

const fn default_context_samples() -> usize {
    5
}

const fn default_top_forces() -> usize {
    3
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            model: default_chat_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            context_samples: default_context_samples(),
            top_forces: default_top_forces(),
        }
    }
}

/// Candidate sampler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SamplerConfig {
    /// Candidates drawn per step
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Initial step size of the search distribution
    #[serde(default = "default_sigma")]
    pub sigma: f64,

    /// Fixed RNG seed for reproducible trajectories
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_population_size() -> usize {
    12
}

const fn default_sigma() -> f64 {
    0.4
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            sigma: default_sigma(),
            seed: None,
        }
    }
}

/// Height function constants
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HeightConfig {
    /// Floor for alignments, similarities and the final denominator
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Distance penalty slope
    #[serde(default = "default_distance_alpha")]
    pub distance_alpha: f64,
}

const fn default_epsilon() -> f64 {
    1e-8
}

const fn default_distance_alpha() -> f64 {
    0.5
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            distance_alpha: default_distance_alpha(),
        }
    }
}

/// Step count policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Steps for the batch path when the caller gives none
    #[serde(default = "default_steps")]
    pub default_steps: usize,

    /// Upper bound applied by the serving operations
    #[serde(default = "default_max_serving_steps")]
    pub max_serving_steps: usize,
}

const fn default_steps() -> usize {
    10
}

const fn default_max_serving_steps() -> usize {
    5
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_steps: default_steps(),
            max_serving_steps: default_max_serving_steps(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    500
}

const fn default_max_backoff_ms() -> u64 {
    10_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

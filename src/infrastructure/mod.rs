//! Infrastructure layer module
//!
//! - Configuration management
//! - Logging infrastructure
//! - OpenAI HTTP client, errors and retry policy

pub mod config;
pub mod logging;
pub mod openai;

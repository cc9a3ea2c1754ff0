//! Embedding provider adapters.

pub mod local;
pub mod openai;

pub use local::{LocalEmbeddingProvider, DEFAULT_LOCAL_DIMENSION};
pub use openai::OpenAiEmbeddingProvider;

//! HTTP plumbing shared by the OpenAI embedding and chat adapters.

pub mod client;
pub mod errors;
pub mod retry;

pub use client::OpenAiClient;
pub use errors::OpenAiError;
pub use retry::RetryPolicy;

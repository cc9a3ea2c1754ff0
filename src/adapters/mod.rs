//! Adapters for external systems: embedding and chat APIs, files, context.

pub mod context;
pub mod embeddings;
pub mod narration;
pub mod storage;

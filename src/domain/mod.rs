//! Domain layer for the forcepath trajectory engine
//!
//! This module contains the state-space models and the port traits the
//! scoring core depends on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};

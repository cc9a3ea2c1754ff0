//! File-backed storage: YAML definitions, the JSON force cache, JSONL output.

pub mod definitions;
pub mod force_cache;
pub mod jsonl;

pub use definitions::{
    load_force_definitions, load_social_reference, parse_force_definitions,
    parse_social_reference, ForceDefinition,
};
pub use force_cache::{
    load_force_table, load_force_vectors, load_force_weights, save_force_vectors, ForceVectors,
};
pub use jsonl::append_jsonl;

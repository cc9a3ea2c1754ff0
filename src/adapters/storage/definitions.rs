//! YAML source definitions: force sentences and social reference sentences.

use std::path::Path;

use serde_yaml::Value;

use crate::domain::errors::{DomainError, DomainResult};

/// Description sentences for one force, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForceDefinition {
    pub name: String,
    pub sentences: Vec<String>,
}

fn read_yaml(path: &Path, what: &str) -> DomainResult<Value> {
    if !path.exists() {
        return Err(DomainError::ConfigurationError(format!(
            "{what} file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| {
        DomainError::ConfigurationError(format!("failed to parse {}: {e}", path.display()))
    })
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_sequence()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse force definitions from YAML text.
///
/// Accepts `{forces: {name: ...}}` or a top-level mapping of names. Each
/// value is either `{sentences: [...]}` or a bare list of sentences.
pub fn parse_force_definitions(content: &str) -> DomainResult<Vec<ForceDefinition>> {
    let root: Value = serde_yaml::from_str(content)?;
    force_definitions_from(&root)
}

fn force_definitions_from(root: &Value) -> DomainResult<Vec<ForceDefinition>> {
    let forces = match root.get("forces") {
        Some(inner) => inner,
        None => root,
    };
    let mapping = forces.as_mapping().ok_or_else(|| {
        DomainError::ConfigurationError("force definitions must be a mapping of names".into())
    })?;

    mapping
        .iter()
        .map(|(name, payload)| {
            let name = name.as_str().ok_or_else(|| {
                DomainError::ConfigurationError(format!("force name must be a string: {name:?}"))
            })?;
            let sentences = match payload.get("sentences") {
                Some(list) => string_list(list),
                None => string_list(payload),
            };
            Ok(ForceDefinition {
                name: name.to_string(),
                sentences,
            })
        })
        .collect()
}

pub fn load_force_definitions(path: &Path) -> DomainResult<Vec<ForceDefinition>> {
    let root = read_yaml(path, "force definition")?;
    force_definitions_from(&root)
}

/// Parse social reference sentences: a `sentences` or
/// `reference_sentences` list.
pub fn parse_social_reference(content: &str) -> DomainResult<Vec<String>> {
    let root: Value = serde_yaml::from_str(content)?;
    Ok(social_reference_from(&root))
}

fn social_reference_from(root: &Value) -> Vec<String> {
    root.get("sentences")
        .or_else(|| root.get("reference_sentences"))
        .map(string_list)
        .unwrap_or_default()
}

/// Sentences whose mean embedding is the social centroid.
pub fn load_social_reference(path: &Path) -> DomainResult<Vec<String>> {
    let root = read_yaml(path, "social reference")?;
    Ok(social_reference_from(&root))
}

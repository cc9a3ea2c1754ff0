//! Append-only JSON Lines output.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::errors::DomainResult;

/// Append one JSON document per line, creating parent directories.
pub fn append_jsonl<T: Serialize>(path: &Path, records: &[T]) -> DomainResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
    }
    Ok(())
}

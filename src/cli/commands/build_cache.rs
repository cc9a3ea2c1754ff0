//! Implementation of the `forcepath build-cache` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{create_progress_bar, output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{build_embedder, rebuild_force_cache, BuildEvent};

#[derive(Args, Debug)]
pub struct BuildCacheArgs {
    /// Force definition YAML (defaults to paths.force_definitions)
    #[arg(long)]
    pub definitions: Option<PathBuf>,

    /// Cache file to write (defaults to paths.force_cache)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use the deterministic local embedder instead of the API
    #[arg(long)]
    pub offline: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct BuildCacheOutput {
    pub cache_path: PathBuf,
    pub embedder: String,
    pub forces: Vec<String>,
    pub dimension: usize,
}

impl CommandOutput for BuildCacheOutput {
    fn to_human(&self) -> String {
        format!(
            "Force vector cache saved to {}\n  embedder:  {}\n  forces:    {} ({})\n  dimension: {}",
            self.cache_path.display(),
            self.embedder,
            self.forces.len(),
            self.forces.join(", "),
            self.dimension
        )
    }
}

pub async fn execute(args: BuildCacheArgs, config: &Config, json_mode: bool) -> Result<()> {
    let definitions = args
        .definitions
        .unwrap_or_else(|| config.paths.force_definitions.clone());
    let cache_path = args
        .output
        .unwrap_or_else(|| config.paths.force_cache.clone());

    let embedder = build_embedder(config, args.offline)?;
    let progress = create_progress_bar(0, json_mode);

    let vectors = rebuild_force_cache(embedder.as_ref(), &definitions, &cache_path, |event| {
        match event {
            BuildEvent::Started { forces } => progress.set_length(forces as u64),
            BuildEvent::Embedded { name, .. } => {
                progress.set_message(name.to_string());
                progress.inc(1);
            }
        }
    })
    .await
    .with_context(|| format!("Failed to rebuild force cache from {}", definitions.display()))?;
    progress.finish_and_clear();

    let result = BuildCacheOutput {
        cache_path,
        embedder: embedder.name().to_string(),
        dimension: vectors.values().next().map_or(0, |v| v.dimension()),
        forces: vectors.keys().cloned().collect(),
    };
    output(&result, json_mode);
    Ok(())
}

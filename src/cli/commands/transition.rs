//! Implementation of the `forcepath transition` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::commands::{build_service, format_step};
use crate::cli::output::output_line;
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct TransitionArgs {
    /// Seed description of the present social state
    #[arg(short, long)]
    pub sentence: String,

    /// Fix the sampler seed for a reproducible step
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the local embedder and template narrator instead of the API
    #[arg(long)]
    pub offline: bool,
}

pub async fn execute(args: TransitionArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_service(config, args.offline, args.seed).await?;
    let record = service
        .transition(&args.sentence)
        .await
        .context("Transition failed")?;

    if json_mode {
        output_line(&record.verbose());
    } else {
        println!("{}", format_step(&record, true));
    }
    Ok(())
}

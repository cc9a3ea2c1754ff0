//! Implementation of the `forcepath simulate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::adapters::storage::append_jsonl;
use crate::cli::commands::{build_service, format_step};
use crate::cli::output::{output, output_line, CommandOutput};
use crate::domain::errors::DomainError;
use crate::domain::models::{Config, StepRecord};
use crate::services::TrajectoryReport;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Seed description of the present social state
    #[arg(short, long)]
    pub sentence: String,

    /// Steps to run (clamped to 1..=simulation.max_serving_steps)
    #[arg(long, default_value_t = 4)]
    pub steps: usize,

    /// Skip the serving bound and run exactly --steps steps
    #[arg(long)]
    pub batch: bool,

    /// Append each step record to this JSONL file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fix the sampler seed for a reproducible trajectory
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the local embedder and template narrator instead of the API
    #[arg(long)]
    pub offline: bool,

    /// Include force scores and vector previews in streamed steps
    #[arg(short, long)]
    pub verbose: bool,

    /// Narrate one overall summary once the trajectory finishes
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct SimulateOutput {
    pub trajectory_id: String,
    pub requested_steps: usize,
    pub completed_steps: usize,
    pub error: Option<String>,
    pub output_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory_summary: Option<String>,
}

impl From<(&TrajectoryReport, Option<PathBuf>)> for SimulateOutput {
    fn from((report, output_file): (&TrajectoryReport, Option<PathBuf>)) -> Self {
        Self {
            trajectory_id: report.trajectory_id.to_string(),
            requested_steps: report.requested_steps,
            completed_steps: report.steps.len(),
            error: report.error.clone(),
            output_file,
            trajectory_summary: None,
        }
    }
}

impl CommandOutput for SimulateOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Trajectory {}: {}/{} step(s) completed",
            &self.trajectory_id[..8],
            self.completed_steps,
            self.requested_steps
        )];
        if let Some(ref error) = self.error {
            lines.push(format!("Stopped early: {error}"));
        }
        if let Some(ref path) = self.output_file {
            lines.push(format!("Records appended to {}", path.display()));
        }
        if let Some(ref summary) = self.trajectory_summary {
            lines.push(format!("\nSummary:\n{summary}"));
        }
        lines.join("\n")
    }
}

pub async fn execute(args: SimulateArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_service(config, args.offline, args.seed).await?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current step");
            on_interrupt.cancel();
        }
    });

    let output_file = args.output.clone();
    let verbose = args.verbose;
    let sink = |record: &StepRecord| -> Result<(), DomainError> {
        if let Some(ref path) = output_file {
            append_jsonl(path, std::slice::from_ref(record))?;
        }
        emit_step(record, verbose, json_mode);
        Ok(())
    };

    let report = if args.batch {
        service
            .run_batch(&args.sentence, Some(args.steps), cancel, sink)
            .await
    } else {
        service.simulate(&args.sentence, args.steps, cancel, sink).await
    }
    .context("Simulation failed")?;

    let mut result = SimulateOutput::from((&report, args.output));
    if args.summary {
        result.trajectory_summary = service
            .summarize_trajectory(&args.sentence, &report.steps)
            .await;
    }
    if json_mode {
        output_line(&result);
    } else {
        output(&result, false);
    }
    Ok(())
}

fn emit_step(record: &StepRecord, verbose: bool, json_mode: bool) {
    match (json_mode, verbose) {
        (true, true) => output_line(&record.verbose()),
        (true, false) => output_line(&record.lightweight()),
        (false, _) => println!("{}\n", format_step(record, verbose)),
    }
}

//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::build_cache::BuildCacheArgs;
use crate::cli::commands::forces::ForcesArgs;
use crate::cli::commands::simulate::SimulateArgs;
use crate::cli::commands::transition::TransitionArgs;

#[derive(Parser, Debug)]
#[command(name = "forcepath")]
#[command(about = "forcepath - trajectories of social state under weighted forces", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to forcepath.yaml + .forcepath/local.yaml)
    #[arg(short, long, global = true, env = "FORCEPATH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the force vector cache from force definitions
    BuildCache(BuildCacheArgs),

    /// Run a trajectory from a seed description
    Simulate(SimulateArgs),

    /// Run exactly one step from a seed description
    Transition(TransitionArgs),

    /// Show the loaded force table
    Forces(ForcesArgs),
}

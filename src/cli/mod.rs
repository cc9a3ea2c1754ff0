//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

use anyhow::Result;

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
pub use types::{Cli, Commands};

/// Load configuration from `--config` or the default hierarchy.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Dispatch the parsed command.
pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::BuildCache(args) => commands::build_cache::execute(args, config, json).await,
        Commands::Simulate(args) => commands::simulate::execute(args, config, json).await,
        Commands::Transition(args) => commands::transition::execute(args, config, json).await,
        Commands::Forces(args) => commands::forces::execute(args, config, json).await,
    }
}

/// Print an error chain and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": chain,
        });
        println!("{body}");
    } else {
        eprintln!("Error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
    }
    std::process::exit(1);
}

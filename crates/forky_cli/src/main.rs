//! CLI entry point for Forky.

mod cli;
mod commands;
mod output;
mod views;

use clap::Parser;
use forky_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load `.env` from the working directory or the nearest parent that has one.
fn load_env() {
    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().take(32) {
            let env_file = dir.join(".env");
            if env_file.exists() {
                let _ = dotenvy::from_path(&env_file);
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() {
    load_env();
    let cli = Cli::parse();
    output::init(cli.output);

    let level = if cli.verbose { "debug" } else { "warn" };
    let mut obs = ObservabilityConfig::from_env().with_version(forky_constant::app::VERSION);
    if cli.verbose || obs.log_level.is_none() {
        obs = obs.with_log_level(level);
    }
    if let Err(e) = forky_observability::init(obs) {
        output::warning(&format!("logging disabled: {e}"));
    }

    let result = commands::handle(cli).await;
    forky_observability::shutdown();

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

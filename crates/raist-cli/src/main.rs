//! RAIST command-line driver.
//!
//! # Usage
//!
//! ```bash
//! # Run the three-cycle reference simulation
//! raist simulate
//!
//! # One cycle against the configured seed commitments
//! raist evolve --query "What must never change?" --vector 0.1,0.1,0.9,0.85 --json
//! ```
//!
//! Results go to stdout, logs to stderr. Exit code 0 on success, 1 on error.

mod commands;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use raist_core::config::LoggingConfig;
use raist_core::Config;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use commands::evolve::EvolveArgs;
use commands::simulate::SimulateArgs;

#[derive(Parser, Debug)]
#[command(name = "raist")]
#[command(version, about = "Commitment retrieval and ethical governance loop")]
struct Cli {
    /// TOML configuration file. Without it, config/default.toml,
    /// config/{RAIST_ENV}.toml and RAIST__* variables are layered.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides logging.level. RUST_LOG wins
    /// over both.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the reference simulation: genesis, ethics and secrecy questions
    Simulate(SimulateArgs),

    /// Run a single governance cycle
    Evolve(EvolveArgs),
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging, cli.log_level.as_deref());
    debug!(
        acceptance_threshold = config.governance.acceptance_threshold,
        retrieval_threshold = config.governance.retrieval_threshold,
        seeds = config.seeds.len(),
        "Configuration loaded"
    );

    let code = match cli.command {
        Commands::Simulate(args) => commands::simulate::handle_simulate(args, &config),
        Commands::Evolve(args) => commands::evolve::handle_evolve(args, &config),
    };
    std::process::exit(code);
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("invalid configuration in {}", path.display())),
        None => Config::load().context("invalid layered configuration"),
    }
}

/// Logs go to stderr so stdout stays clean for results and JSON.
fn init_logging(logging: &LoggingConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(&logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    if logging.format == "compact" {
        builder.compact().init();
    } else {
        builder.pretty().init();
    }
}

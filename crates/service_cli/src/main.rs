//! multgen CLI - Multiplier Generation and Verification
//!
//! # Commands
//!
//! - `multgen generate` - Write multipliers to stdout, one per line
//! - `multgen check` - Replay multipliers from stdin and report the realised RTP
//! - `multgen algorithms` - List available algorithms
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires settings loading and
//! logging from `infra_config` to the engine in `multgen_core` and the
//! verification harness in `multgen_checker`. Logs go to stderr; stdout
//! carries only data.
//!
//! # Example
//!
//! ```text
//! multgen generate --rtp 0.95 --count 1000000 | multgen check -n 100 -v
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use infra_config::{build_settings, init_tracing, LogLevel, SettingsOverrides};
use multgen_core::catalog_help;

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::check::CheckArgs;
use config::SolverArgs;

/// multgen - multipliers converging to a target RTP
#[derive(Parser)]
#[command(name = "multgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write multipliers to stdout, one per line
    #[command(after_help = algorithms_help())]
    Generate {
        #[command(flatten)]
        solver: SolverArgs,

        /// Sequence length; read from stdin when absent
        #[arg(short = 'n', long)]
        count: Option<u64>,
    },

    /// Replay multipliers from stdin and report the realised RTP
    Check(CheckArgs),

    /// List available algorithms
    Algorithms,
}

fn algorithms_help() -> String {
    format!("Algorithms:\n{}", catalog_help())
}

fn run(cli: Cli) -> Result<()> {
    let overrides = match &cli.command {
        Commands::Generate { solver, .. } => solver.overrides(cli.log_level),
        _ => SettingsOverrides {
            log_level: cli.log_level,
            ..SettingsOverrides::default()
        },
    };
    let settings = build_settings(cli.config.as_deref(), &overrides)?;

    init_tracing(settings.log_level);

    match cli.command {
        Commands::Generate { count, .. } => commands::generate::run(
            &settings.solver,
            count,
            io::stdin().lock(),
            io::stdout().lock(),
        ),
        Commands::Check(args) => commands::check::run(
            &args,
            io::stdin().lock(),
            io::stdout().lock(),
            io::stderr().lock(),
        ),
        Commands::Algorithms => commands::algorithms::run(io::stdout().lock()),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("multgen: {}", err);
            ExitCode::FAILURE
        }
    }
}

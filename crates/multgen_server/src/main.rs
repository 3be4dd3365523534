//! multgen HTTP server
//!
//! Serves one multiplier per `GET /get` request.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use infra_config::{build_settings, init_tracing, LogLevel, SettingsOverrides};
use multgen_core::{catalog_help, Solver};
use multgen_server::Server;

/// multgen server - serves multipliers converging to a target RTP
#[derive(Parser, Debug)]
#[command(name = "multgen_server")]
#[command(version, about, long_about = None, after_help = algorithms_help())]
struct Args {
    /// Settings file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target return-to-player ratio, in (0, 1]
    #[arg(short, long)]
    rtp: Option<f64>,

    /// Algorithm name (see below)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Lowest multiplier
    #[arg(long)]
    min_multiplier: Option<f64>,

    /// Highest multiplier
    #[arg(long)]
    max_multiplier: Option<f64>,

    /// Exponential-tail decay rate
    #[arg(short, long)]
    k: Option<f64>,

    /// Pareto shape
    #[arg(long)]
    alpha: Option<f64>,

    /// Skip the rtp range check
    #[arg(long)]
    skip_rtp_check: bool,

    /// Host address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<LogLevel>,
}

impl From<Args> for SettingsOverrides {
    fn from(args: Args) -> Self {
        SettingsOverrides {
            log_level: args.log_level,
            rtp: args.rtp,
            algorithm: args.algorithm,
            min_multiplier: args.min_multiplier,
            max_multiplier: args.max_multiplier,
            k: args.k,
            alpha: args.alpha,
            skip_rtp_check: args.skip_rtp_check,
            host: args.host,
            port: args.port,
        }
    }
}

fn algorithms_help() -> String {
    format!("Algorithms:\n{}", catalog_help())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_file = args.config.clone();
    let settings = build_settings(config_file.as_deref(), &args.into())?;

    init_tracing(settings.log_level);

    let solver = Solver::new(settings.solver.to_solver_config()?)
        .context("invalid solver configuration")?;

    tracing::info!("multgen server v{}", multgen_server::VERSION);
    tracing::info!(
        host = %settings.server.host,
        port = settings.server.port,
        algorithm = %solver.strategy(),
        rtp = solver.config().rtp,
        min_multiplier = solver.config().min_multiplier,
        max_multiplier = solver.config().max_multiplier,
        "server configuration loaded"
    );

    Server::new(settings.server, Arc::new(solver)).run().await?;
    Ok(())
}

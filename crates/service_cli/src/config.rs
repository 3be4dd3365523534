//! Solver flags shared by the generating commands

use clap::Args;
use infra_config::{LogLevel, SettingsOverrides};

/// Solver options; each overrides the settings file and environment
#[derive(Args, Debug, Clone, Default)]
pub struct SolverArgs {
    /// Target return-to-player ratio, in (0, 1]
    #[arg(short, long)]
    pub rtp: Option<f64>,

    /// Algorithm name (see `multgen algorithms`)
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Lowest multiplier
    #[arg(long)]
    pub min_multiplier: Option<f64>,

    /// Highest multiplier
    #[arg(long)]
    pub max_multiplier: Option<f64>,

    /// Exponential-tail decay rate
    #[arg(short, long)]
    pub k: Option<f64>,

    /// Pareto shape
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Skip the rtp range check
    #[arg(long)]
    pub skip_rtp_check: bool,
}

impl SolverArgs {
    /// Convert into settings overrides
    pub fn overrides(&self, log_level: Option<LogLevel>) -> SettingsOverrides {
        SettingsOverrides {
            log_level,
            rtp: self.rtp,
            algorithm: self.algorithm.clone(),
            min_multiplier: self.min_multiplier,
            max_multiplier: self.max_multiplier,
            k: self.k,
            alpha: self.alpha,
            skip_rtp_check: self.skip_rtp_check,
            ..SettingsOverrides::default()
        }
    }
}

//! Check command implementation
//!
//! Replays a multiplier stream from stdin through simulated players and
//! reports the realised RTP: a single value for one player, otherwise
//! `mean lower upper level` at each reference confidence level. With
//! `--verbose`, diagnostics are written to stderr whatever the log level.

use std::io::{BufRead, Write};

use clap::Args;
use multgen_checker::{
    human_readable, interval_line, reference_intervals, replay, PayoutMode, ReplayError,
    SimulationConfig, StakeRange, StatsError,
};
use tracing::info;

use crate::Result;

/// Options of the check command
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Lowest stake, must be >= 1
    #[arg(long = "min", default_value_t = 1.0)]
    pub min_stake: f64,

    /// Highest stake, must be >= 1
    #[arg(long = "max", default_value_t = 10_000.0)]
    pub max_stake: f64,

    /// Pay stake times multiplier instead of the stake
    #[arg(short, long)]
    pub multiply: bool,

    /// Number of simulated players (one when --min equals --max)
    #[arg(short = 'n', long, default_value_t = 1)]
    pub players: usize,

    /// Write human-readable results to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Seed for reproducible stakes
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            min_stake: 1.0,
            max_stake: 10_000.0,
            multiply: false,
            players: 1,
            verbose: false,
            seed: None,
        }
    }
}

impl CheckArgs {
    /// Validated simulation parameters for these options
    ///
    /// Players with a fixed stake are indistinguishable, so a degenerate
    /// stake range is simulated with a single player.
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = SimulationConfig {
            participants: self.players,
            stakes: StakeRange::new(self.min_stake, self.max_stake),
            mode: if self.multiply {
                PayoutMode::Scaled
            } else {
                PayoutMode::Unit
            },
            seed: self.seed,
        };
        config.validate().map_err(ReplayError::from)?;

        if config.stakes.is_degenerate() && config.participants > 1 {
            info!(
                requested = config.participants,
                stake = config.stakes.min,
                "fixed stake, simulating a single player"
            );
            config.participants = 1;
        }
        Ok(config)
    }
}

/// Run the check command
///
/// Results go to `output`; verbose diagnostics go to `diagnostics`.
pub fn run<R, W, D>(args: &CheckArgs, input: R, mut output: W, mut diagnostics: D) -> Result<()>
where
    R: BufRead,
    W: Write,
    D: Write,
{
    let config = args.simulation_config()?;
    info!(players = config.participants, "replaying multiplier stream");
    let report = replay(input, config)?;

    let peak = report.peak_multiplier().unwrap_or_default();

    if let [player] = report.participants() {
        let rtp = player.realized_rtp().ok_or(StatsError::EmptySample)?;
        if args.verbose {
            writeln!(
                diagnostics,
                "count={} elapsed={:?} payment={:.3} profit={:.3} max_multiplier={}",
                report.rounds(),
                report.elapsed(),
                player.total_payment(),
                player.total_profit(),
                peak
            )?;
        }
        writeln!(output, "{}", rtp)?;
    } else {
        if args.verbose {
            writeln!(
                diagnostics,
                "count={} elapsed={:?} max_multiplier={}",
                report.rounds(),
                report.elapsed(),
                peak
            )?;
        }
        for ci in reference_intervals(&report)? {
            writeln!(output, "{}", interval_line(&ci))?;
            if args.verbose {
                writeln!(diagnostics, "{}", human_readable(&ci))?;
            }
        }
    }

    output.flush()?;
    diagnostics.flush()?;
    Ok(())
}

//! CLI error types

use infra_config::SettingsError;
use multgen_checker::{ReplayError, StatsError};
use multgen_core::ConfigError;
use thiserror::Error;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line or stdin argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Settings could not be loaded
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Solver configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Multiplier stream could not be replayed
    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// Confidence interval could not be computed
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;

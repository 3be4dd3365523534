//! Settings management
//!
//! Loads settings from built-in defaults, an optional TOML file and
//! `MULTGEN__*` environment variables, in increasing priority. Command-line
//! values are applied last through [`SettingsOverrides`].

use std::path::Path;
use std::str::FromStr;

use config::{Config, Environment, File, FileFormat};
use multgen_core::SolverConfig;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MULTGEN";

/// Separator between the prefix and nested keys, e.g. `MULTGEN__SOLVER__RTP`.
pub const ENV_SEPARATOR: &str = "__";

/// Default listen host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 64333;

/// Default time allowed for in-flight requests after a shutdown signal.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Settings error types
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("rtp is required")]
    MissingRtp,
}

/// Log levels supported by the binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(SettingsError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Solver settings as loaded from external sources.
///
/// Mirrors [`SolverConfig`], except that `rtp` may be absent until every
/// source has been applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Target return-to-player ratio
    pub rtp: Option<f64>,
    /// Algorithm name
    pub algorithm: String,
    /// Lower multiplier bound
    pub min_multiplier: f64,
    /// Upper multiplier bound
    pub max_multiplier: f64,
    /// Exponential-tail decay rate
    pub k: f64,
    /// Pareto shape
    pub alpha: f64,
    /// Disable the rtp range check
    pub skip_rtp_check: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let defaults = SolverConfig::default();
        Self {
            rtp: None,
            algorithm: defaults.algorithm,
            min_multiplier: defaults.min_multiplier,
            max_multiplier: defaults.max_multiplier,
            k: defaults.k,
            alpha: defaults.alpha,
            skip_rtp_check: defaults.skip_rtp_check,
        }
    }
}

impl SolverSettings {
    /// Converts into a solver configuration.
    ///
    /// Validation of the resulting values is left to the solver.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::MissingRtp` when no rtp was supplied and the
    /// rtp check is not skipped.
    pub fn to_solver_config(&self) -> Result<SolverConfig, SettingsError> {
        let rtp = match self.rtp {
            Some(rtp) => rtp,
            None if self.skip_rtp_check => SolverConfig::default().rtp,
            None => return Err(SettingsError::MissingRtp),
        };

        Ok(SolverConfig {
            rtp,
            algorithm: self.algorithm.clone(),
            min_multiplier: self.min_multiplier,
            max_multiplier: self.max_multiplier,
            k: self.k,
            alpha: self.alpha,
            skip_rtp_check: self.skip_rtp_check,
        })
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl ServerSettings {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete settings shared by both binaries
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level
    pub log_level: LogLevel,
    /// Solver settings
    pub solver: SolverSettings,
    /// HTTP listener settings
    pub server: ServerSettings,
}

impl Settings {
    /// Load settings from an optional TOML file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::from_sources(path, environment())
    }

    /// Load settings from an optional TOML file and explicit environment
    /// variables (full names, including the `MULTGEN__` prefix)
    pub fn load_with_env<I, K, V>(path: Option<&Path>, vars: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_sources(path, environment().source(Some(vars)))
    }

    fn from_sources(path: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server.port == 0 {
            return Err(SettingsError::InvalidPort(self.server.port));
        }
        Ok(())
    }

    /// Merge with command-line values (command line takes precedence)
    pub fn merge(&mut self, overrides: &SettingsOverrides) {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }

        let solver = &mut self.solver;
        if let Some(rtp) = overrides.rtp {
            solver.rtp = Some(rtp);
        }
        if let Some(algorithm) = &overrides.algorithm {
            solver.algorithm = algorithm.clone();
        }
        if let Some(min) = overrides.min_multiplier {
            solver.min_multiplier = min;
        }
        if let Some(max) = overrides.max_multiplier {
            solver.max_multiplier = max;
        }
        if let Some(k) = overrides.k {
            solver.k = k;
        }
        if let Some(alpha) = overrides.alpha {
            solver.alpha = alpha;
        }
        if overrides.skip_rtp_check {
            solver.skip_rtp_check = true;
        }

        if let Some(host) = &overrides.host {
            self.server.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// RTP override
    pub rtp: Option<f64>,
    /// Algorithm override
    pub algorithm: Option<String>,
    /// Lower multiplier bound override
    pub min_multiplier: Option<f64>,
    /// Upper multiplier bound override
    pub max_multiplier: Option<f64>,
    /// Decay rate override
    pub k: Option<f64>,
    /// Pareto shape override
    pub alpha: Option<f64>,
    /// Skip the rtp range check
    pub skip_rtp_check: bool,
    /// Host override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
}

/// Build settings from all sources
///
/// Priority (highest to lowest):
/// 1. Command line
/// 2. Environment variables
/// 3. Settings file
/// 4. Default values
pub fn build_settings(
    path: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::load(path)?;
    settings.merge(overrides);
    settings.validate()?;
    Ok(settings)
}

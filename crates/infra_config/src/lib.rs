//! Settings and logging infrastructure for the multgen binaries
//!
//! - [`settings`]: layered loading (defaults, TOML file, `MULTGEN__*`
//!   environment, command line) and conversion into a solver configuration
//! - [`logging`]: `tracing` subscriber initialisation

pub mod logging;
pub mod settings;

pub use logging::init_tracing;
pub use settings::{
    build_settings, LogLevel, ServerSettings, Settings, SettingsError, SettingsOverrides,
    SolverSettings,
};

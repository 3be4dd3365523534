//! Tracing initialisation
//!
//! `RUST_LOG` takes precedence over the configured level. Events are written
//! to stderr so that stdout carries only data.

use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::LogLevel;

/// Build the filter for the given default level
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()))
}

/// Install the global subscriber
///
/// Calling this more than once keeps the first subscriber.
pub fn init_tracing(level: LogLevel) {
    let installed = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    match installed {
        Ok(()) => debug!(%level, "tracing initialised"),
        Err(_) => debug!(%level, "tracing subscriber already installed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing(LogLevel::Debug);
        init_tracing(LogLevel::Error);
        tracing::debug!("still works");
    }

    #[test]
    fn test_env_filter_for_every_level() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            let _ = env_filter(level);
        }
    }
}

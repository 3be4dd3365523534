//! Error types for the verification harness.

use std::io;

use thiserror::Error;

/// Confidence estimator input error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// No samples were supplied.
    #[error("cannot compute a confidence interval from an empty sample")]
    EmptySample,

    /// Confidence level not strictly inside (0, 1).
    #[error("confidence level {0} must be in (0, 1)")]
    InvalidLevel(f64),

    /// The reference distribution could not be constructed.
    #[error("distribution error: {0}")]
    Distribution(String),
}

/// A single violated simulation parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationViolation {
    /// Minimum stake below one or not finite.
    #[error("min stake {0} must be a finite value >= 1")]
    MinStakeOutOfRange(f64),

    /// Maximum stake below one or not finite.
    #[error("max stake {0} must be a finite value >= 1")]
    MaxStakeOutOfRange(f64),

    /// Stake range inverted.
    #[error("min stake {min} must not exceed max stake {max}")]
    InvertedStakes {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// Zero participants requested.
    #[error("number of participants must be >= 1")]
    NoParticipants,
}

/// Aggregated simulation configuration error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid simulation configuration: {}", join(.violations))]
pub struct SimulationError {
    violations: Vec<SimulationViolation>,
}

impl SimulationError {
    pub(crate) fn new(violations: Vec<SimulationViolation>) -> Self {
        Self { violations }
    }

    /// Returns every violated parameter, in check order.
    pub fn violations(&self) -> &[SimulationViolation] {
        &self.violations
    }
}

fn join(violations: &[SimulationViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure while replaying a multiplier stream.
///
/// Any of these aborts the replay; no partial report is produced.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading the stream failed.
    #[error("failed to read multiplier stream: {0}")]
    Io(#[from] io::Error),

    /// A line is not a finite decimal number.
    #[error("line {line}: unexpected input {text:?}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Offending line, without its terminator.
        text: String,
    },

    /// The stream held no multipliers.
    #[error("multiplier stream is empty")]
    Empty,

    /// The simulator could not be set up.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_error_display() {
        assert!(StatsError::EmptySample.to_string().contains("empty"));
        assert!(StatsError::InvalidLevel(1.5).to_string().contains("1.5"));
    }

    #[test]
    fn test_simulation_error_joins_violations() {
        let err = SimulationError::new(vec![
            SimulationViolation::MinStakeOutOfRange(0.5),
            SimulationViolation::NoParticipants,
        ]);

        let message = err.to_string();
        assert!(message.contains("min stake 0.5"));
        assert!(message.contains("participants"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_replay_error_names_line() {
        let err = ReplayError::Malformed {
            line: 3,
            text: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: unexpected input \"abc\"");
    }
}

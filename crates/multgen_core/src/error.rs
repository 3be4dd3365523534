//! Error types for solver configuration.
//!
//! Validation never stops at the first problem: every violated invariant is
//! collected into a single [`ConfigError`] so that a misconfigured deployment
//! can be fixed in one pass.

use thiserror::Error;

use crate::config::{MAX_MULTIPLIER, MIN_MULTIPLIER};

/// A single violated configuration invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// RTP outside (0, 1].
    #[error("rtp {0} must be in (0, 1]")]
    RtpOutOfRange(f64),

    /// RTP not a finite positive value; checked even when the range check is skipped.
    #[error("rtp {0} must be a finite value > 0")]
    RtpNotPositive(f64),

    /// Minimum multiplier outside the global bound.
    #[error("min multiplier {0} must be in [{lo}, {hi}]", lo = MIN_MULTIPLIER, hi = MAX_MULTIPLIER)]
    MinMultiplierOutOfRange(f64),

    /// Maximum multiplier outside the global bound.
    #[error("max multiplier {0} must be in [{lo}, {hi}]", lo = MIN_MULTIPLIER, hi = MAX_MULTIPLIER)]
    MaxMultiplierOutOfRange(f64),

    /// Bounds inverted.
    #[error("min multiplier {min} must not exceed max multiplier {max}")]
    InvertedBounds {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// Non-positive decay rate.
    #[error("k {0} must be > 0")]
    NonPositiveDecay(f64),

    /// Pareto shape below one.
    #[error("alpha {0} must be >= 1")]
    ShapeBelowOne(f64),
}

/// Aggregated configuration error.
///
/// # Examples
/// ```
/// use multgen_core::{SolverConfig, ConfigError};
///
/// let config = SolverConfig {
///     rtp: 1.5,
///     k: 0.0,
///     ..SolverConfig::default()
/// };
/// let err: ConfigError = config.validate().unwrap_err();
/// assert_eq!(err.violations().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid solver configuration: {}", join_violations(.violations))]
pub struct ConfigError {
    violations: Vec<Violation>,
}

impl ConfigError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns every violated invariant, in check order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns `true` if the given violation is part of this error.
    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

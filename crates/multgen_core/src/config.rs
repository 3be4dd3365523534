//! Solver configuration.
//!
//! [`SolverConfig`] is constructed once from an external source (flags,
//! environment, file) and passed by value into the [`Solver`](crate::Solver).
//! It is immutable from the solver's point of view; the only field the solver
//! rewrites is `algorithm`, which is replaced by the canonical name of the
//! strategy that actually runs.

use serde::{Deserialize, Serialize};

use crate::algorithms::DEFAULT_STRATEGY;
use crate::error::{ConfigError, Violation};

/// Lowest multiplier any strategy may be configured to produce.
pub const MIN_MULTIPLIER: f64 = 1.0;

/// Highest multiplier any strategy may be configured to produce.
pub const MAX_MULTIPLIER: f64 = 10_000.0;

/// Multiplier generation parameters.
///
/// # Examples
///
/// ```rust
/// use multgen_core::SolverConfig;
///
/// let config = SolverConfig::builder()
///     .rtp(0.95)
///     .algorithm("v1")
///     .multiplier_bounds(1.0, 100.0)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.rtp, 0.95);
/// assert_eq!(config.max_multiplier, 100.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Target return-to-player ratio, in (0, 1].
    pub rtp: f64,
    /// Catalog entry name, matched case-insensitively.
    pub algorithm: String,
    /// Lower bound on generated values.
    pub min_multiplier: f64,
    /// Upper bound on generated values.
    pub max_multiplier: f64,
    /// Decay rate of the exponential-tail strategy.
    pub k: f64,
    /// Shape of the Pareto strategy.
    pub alpha: f64,
    /// Disables the rtp range check (analysis builds only).
    pub skip_rtp_check: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            rtp: 1.0,
            algorithm: DEFAULT_STRATEGY.name().to_string(),
            min_multiplier: MIN_MULTIPLIER,
            max_multiplier: MAX_MULTIPLIER,
            k: 1.0,
            alpha: 1.0,
            skip_rtp_check: false,
        }
    }
}

impl SolverConfig {
    /// Creates a new configuration builder starting from the defaults.
    #[inline]
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::default()
    }

    /// Validates every invariant and reports all violations together.
    ///
    /// The algorithm name is not checked here: unknown names
    /// fall back to the default strategy when the solver is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` listing each of:
    /// - `rtp` outside (0, 1], or, with `skip_rtp_check` set, `rtp` not a
    ///   finite value above zero
    /// - `min_multiplier` or `max_multiplier` outside [1, 10000]
    /// - `min_multiplier > max_multiplier`
    /// - `k <= 0`
    /// - `alpha < 1`
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut violations = Vec::new();

        // Negated comparisons so that NaN is rejected too.
        if self.skip_rtp_check {
            if !(self.rtp > 0.0 && self.rtp.is_finite()) {
                violations.push(Violation::RtpNotPositive(self.rtp));
            }
        } else if !(self.rtp > 0.0 && self.rtp <= 1.0) {
            violations.push(Violation::RtpOutOfRange(self.rtp));
        }
        if !in_global_bounds(self.min_multiplier) {
            violations.push(Violation::MinMultiplierOutOfRange(self.min_multiplier));
        }
        if !in_global_bounds(self.max_multiplier) {
            violations.push(Violation::MaxMultiplierOutOfRange(self.max_multiplier));
        }
        if self.min_multiplier > self.max_multiplier {
            violations.push(Violation::InvertedBounds {
                min: self.min_multiplier,
                max: self.max_multiplier,
            });
        }
        if !(self.k > 0.0) {
            violations.push(Violation::NonPositiveDecay(self.k));
        }
        if !(self.alpha >= 1.0) {
            violations.push(Violation::ShapeBelowOne(self.alpha));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::new(violations))
        }
    }
}

#[inline]
fn in_global_bounds(value: f64) -> bool {
    (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&value)
}

/// Builder for [`SolverConfig`].
///
/// Fields not set keep their [`SolverConfig::default`] values; `build`
/// validates the result.
#[derive(Clone, Debug, Default)]
pub struct SolverConfigBuilder {
    config: SolverConfig,
}

impl SolverConfigBuilder {
    /// Sets the target RTP.
    #[inline]
    pub fn rtp(mut self, rtp: f64) -> Self {
        self.config.rtp = rtp;
        self
    }

    /// Sets the algorithm name.
    #[inline]
    pub fn algorithm(mut self, name: impl Into<String>) -> Self {
        self.config.algorithm = name.into();
        self
    }

    /// Sets both multiplier bounds.
    #[inline]
    pub fn multiplier_bounds(mut self, min: f64, max: f64) -> Self {
        self.config.min_multiplier = min;
        self.config.max_multiplier = max;
        self
    }

    /// Sets the exponential-tail decay rate.
    #[inline]
    pub fn k(mut self, k: f64) -> Self {
        self.config.k = k;
        self
    }

    /// Sets the Pareto shape.
    #[inline]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Disables the rtp range check.
    #[inline]
    pub fn skip_rtp_check(mut self, skip: bool) -> Self {
        self.config.skip_rtp_check = skip;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` with every violated invariant.
    pub fn build(self) -> Result<SolverConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

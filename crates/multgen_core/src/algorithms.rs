//! Catalog of multiplier generation strategies.
//!
//! Every strategy is a pure function of the configuration and one or more
//! fresh uniform samples. The catalog is a closed enum, registered at compile
//! time and never mutated; names are matched case-insensitively.
//!
//! ## Convergence regimes
//!
//! | Name | Regime | Uniforms per draw |
//! |------|--------|-------------------|
//! | `v1` | binary high/low, exact expectation `rtp*max + (1-rtp)*min` | 1 |
//! | `v2` | near-unity jitter `min + ε` with probability `rtp` | 1 |
//! | `v3` | continuous exponential tail, committed with probability `min(1, rtp/m)` | 2 |
//! | `fair` | Pareto with alpha = 1 | 1 |
//! | `pareto` | Pareto with configured alpha | 1 |
//! | `min`, `max`, `stub` | constants | 0 |
//!
//! The pure functions ([`binary_high_low`], [`exponential_tail`], ...) take
//! the uniform samples explicitly so that their analytic properties can be
//! checked without randomness.

use std::fmt::{self, Write as _};

use crate::config::SolverConfig;
use crate::rng::UniformSource;

/// Jitter added by the near-unity strategy.
pub const NEAR_UNITY_EPSILON: f64 = 1e-6;

/// Strategy substituted for unknown algorithm names.
pub const DEFAULT_STRATEGY: Strategy = Strategy::ExponentialTail;

/// A registered generation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `v1`: `max` with probability `rtp`, otherwise `min`.
    BinaryHighLow,
    /// `v2`: `min + ε` with probability `rtp`, otherwise `min`.
    NearUnity,
    /// `v3`: exponential-tail candidate committed with probability `min(1, rtp/m)`.
    ExponentialTail,
    /// `fair`: Pareto with shape fixed at one.
    FairPareto,
    /// `pareto`: Pareto with the configured shape.
    Pareto,
    /// `min`: always the lower bound.
    Min,
    /// `max`: always the upper bound.
    Max,
    /// `stub`: always the lower bound (baseline for load tests).
    Stub,
}

impl Strategy {
    /// Every registered strategy, in catalog order.
    pub const ALL: [Strategy; 8] = [
        Strategy::BinaryHighLow,
        Strategy::NearUnity,
        Strategy::ExponentialTail,
        Strategy::FairPareto,
        Strategy::Pareto,
        Strategy::Min,
        Strategy::Max,
        Strategy::Stub,
    ];

    /// Canonical catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::BinaryHighLow => "v1",
            Strategy::NearUnity => "v2",
            Strategy::ExponentialTail => "v3",
            Strategy::FairPareto => "fair",
            Strategy::Pareto => "pareto",
            Strategy::Min => "min",
            Strategy::Max => "max",
            Strategy::Stub => "stub",
        }
    }

    /// Human-readable description of the convergence property.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::BinaryHighLow => {
                "max multiplier with probability rtp, otherwise min; exact expectation \
                 rtp*max + (1-rtp)*min, converges under the unit payout transform"
            }
            Strategy::NearUnity => {
                "min + 1e-6 with probability rtp, otherwise min; converges under both \
                 transforms for a participant who skips unwinnable bets"
            }
            Strategy::ExponentialTail => {
                "continuous candidate min + exp(-k*u)*(max-min) committed with probability \
                 min(1, rtp/m), otherwise min; larger k concentrates mass near min"
            }
            Strategy::FairPareto => {
                "rtp*(1-u)^-1 clamped to [min, max]; a stake x pays x with probability \
                 rtp/x, so every stake earns rtp per round and payout/stake is rtp/x"
            }
            Strategy::Pareto => {
                "rtp*(1-u)^(-1/alpha) clamped to [min, max]; alpha > 1 biases realised rtp \
                 downward as stakes grow"
            }
            Strategy::Min => "always min multiplier",
            Strategy::Max => "always max multiplier",
            Strategy::Stub => "always min multiplier (baseline)",
        }
    }

    /// Looks a strategy up by name, ignoring ASCII case and surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use multgen_core::Strategy;
    ///
    /// assert_eq!(Strategy::from_name("V1"), Some(Strategy::BinaryHighLow));
    /// assert_eq!(Strategy::from_name(" Pareto "), Some(Strategy::Pareto));
    /// assert_eq!(Strategy::from_name("v9"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(name))
    }

    /// Produces one multiplier, consuming fresh samples from `source`.
    #[inline]
    pub fn generate<R: UniformSource + ?Sized>(&self, config: &SolverConfig, source: &R) -> f64 {
        match self {
            Strategy::BinaryHighLow => binary_high_low(config, source.next_uniform()),
            Strategy::NearUnity => near_unity(config, source.next_uniform()),
            Strategy::ExponentialTail => {
                let u = source.next_uniform();
                let v = source.next_uniform();
                exponential_tail(config, u, v)
            }
            Strategy::FairPareto => pareto(config, 1.0, source.next_uniform()),
            Strategy::Pareto => pareto(config, config.alpha, source.next_uniform()),
            Strategy::Min | Strategy::Stub => config.min_multiplier,
            Strategy::Max => config.max_multiplier,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `v1`: returns `max_multiplier` when `u < rtp`, otherwise `min_multiplier`.
#[inline]
pub fn binary_high_low(config: &SolverConfig, u: f64) -> f64 {
    if u < config.rtp {
        config.max_multiplier
    } else {
        config.min_multiplier
    }
}

/// Analytic expectation of [`binary_high_low`].
pub fn binary_high_low_mean(config: &SolverConfig) -> f64 {
    config.rtp * config.max_multiplier + (1.0 - config.rtp) * config.min_multiplier
}

/// `v2`: returns `min_multiplier + ε` when `u < rtp`, otherwise `min_multiplier`.
///
/// The jittered value never exceeds `max_multiplier`.
#[inline]
pub fn near_unity(config: &SolverConfig, u: f64) -> f64 {
    if u < config.rtp {
        (config.min_multiplier + NEAR_UNITY_EPSILON).min(config.max_multiplier)
    } else {
        config.min_multiplier
    }
}

/// Continuous candidate of the exponential-tail strategy,
/// `min + exp(-k*u) * (max - min)`.
#[inline]
pub fn exponential_tail_candidate(config: &SolverConfig, u: f64) -> f64 {
    let span = config.max_multiplier - config.min_multiplier;
    (config.min_multiplier + (-config.k * u).exp() * span).min(config.max_multiplier)
}

/// `v3`: draws the candidate from `u` and commits to it when
/// `v < min(1, rtp / candidate)`, otherwise returns `min_multiplier`.
#[inline]
pub fn exponential_tail(config: &SolverConfig, u: f64, v: f64) -> f64 {
    let candidate = exponential_tail_candidate(config, u);
    if v < (config.rtp / candidate).min(1.0) {
        candidate
    } else {
        config.min_multiplier
    }
}

/// Mean of the exponential-tail candidate for `u ~ U(0, 1)`:
/// `min + (max - min) * (1 - exp(-k)) / k`.
pub fn exponential_tail_mean_candidate(config: &SolverConfig) -> f64 {
    let span = config.max_multiplier - config.min_multiplier;
    config.min_multiplier + span * (-(-config.k).exp_m1()) / config.k
}

/// Probability that the exponential-tail strategy commits to its candidate,
/// `rtp * E[1/m]`, valid while `rtp <= min_multiplier`.
///
/// This is not `rtp / E[m]`: the two differ by Jensen's inequality, and only
/// `E[1/m]` matches the per-candidate commit rule `min(1, rtp/m)`.
///
/// With `a = min`, `b = max - min`:
/// `E[1/m] = (k + ln(a + b*exp(-k)) - ln(a + b)) / (a*k)`.
/// The complement is the probability of returning `min_multiplier` through a
/// rejected candidate.
pub fn exponential_tail_commit_probability(config: &SolverConfig) -> f64 {
    let a = config.min_multiplier;
    let b = config.max_multiplier - config.min_multiplier;
    let k = config.k;
    let mean_inverse = (k + (a + b * (-k).exp()).ln() - (a + b).ln()) / (a * k);
    (config.rtp * mean_inverse).min(1.0)
}

/// Pareto strategies: `rtp * (1 - u)^(-1/alpha)` clamped to the configured bounds.
///
/// With `alpha = 1`, `P(m > x) = rtp / x` for every `x` in `[rtp, max)`. Under
/// the unit payout transform a stake `x` therefore earns `rtp` per round on
/// average, one unit bet at cash-out target `x`. The realised payout/stake
/// ratio is `rtp / E[x]` and falls as stakes grow.
#[inline]
pub fn pareto(config: &SolverConfig, alpha: f64, u: f64) -> f64 {
    let m = config.rtp * (1.0 - u).powf(-1.0 / alpha);
    m.clamp(config.min_multiplier, config.max_multiplier)
}

/// Renders the catalog as one `"name" - description` line per strategy.
pub fn catalog_help() -> String {
    let mut help = String::new();
    for strategy in Strategy::ALL {
        let marker = if strategy == DEFAULT_STRATEGY {
            " (default)"
        } else {
            ""
        };
        // Writing into a String cannot fail.
        let _ = writeln!(
            help,
            "{:<9} - {}{}",
            format!("{:?}", strategy.name()),
            strategy.description(),
            marker
        );
    }
    help
}

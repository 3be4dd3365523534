//! The solver binds a validated configuration to one catalog strategy.

use tracing::{debug, warn};

use crate::algorithms::{Strategy, DEFAULT_STRATEGY};
use crate::config::SolverConfig;
use crate::error::ConfigError;
use crate::rng::{ThreadRngSource, UniformSource};

/// Anything that can produce one multiplier per call.
///
/// This is the contract consumed by the HTTP layer and the `generate`
/// command; it never fails.
pub trait Solve: Send + Sync {
    /// Returns one multiplier.
    fn solve(&self) -> f64;
}

/// Stateless multiplier generator.
///
/// Holds the effective configuration, the resolved strategy and a shared
/// random source. [`draw`](Self::draw) takes `&self` and touches no mutable
/// state of its own, so a single solver can be shared across threads behind
/// an `Arc` without locking.
///
/// # Examples
///
/// ```rust
/// use multgen_core::{Solver, SolverConfig};
///
/// let config = SolverConfig::builder()
///     .rtp(0.95)
///     .algorithm("v1")
///     .multiplier_bounds(1.0, 100.0)
///     .build()
///     .unwrap();
///
/// let solver = Solver::new(config).unwrap();
/// let m = solver.draw();
/// assert!(m == 1.0 || m == 100.0);
/// ```
#[derive(Debug)]
pub struct Solver<R = ThreadRngSource> {
    config: SolverConfig,
    strategy: Strategy,
    fell_back: bool,
    source: R,
}

impl Solver<ThreadRngSource> {
    /// Creates a solver drawing from the per-thread generator.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` listing every violated invariant.
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, ThreadRngSource)
    }
}

impl<R: UniformSource> Solver<R> {
    /// Creates a solver drawing from the given source.
    ///
    /// An unknown algorithm name is not an error: the default strategy is
    /// substituted, a warning is logged and the effective configuration
    /// records the substitution.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` listing every violated invariant.
    pub fn with_source(mut config: SolverConfig, source: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let (strategy, fell_back) = match Strategy::from_name(&config.algorithm) {
            Some(strategy) => (strategy, false),
            None => {
                warn!(
                    requested = %config.algorithm,
                    fallback = %DEFAULT_STRATEGY,
                    "unknown algorithm, using default"
                );
                (DEFAULT_STRATEGY, true)
            }
        };
        config.algorithm = strategy.name().to_string();

        debug!(
            algorithm = %strategy,
            rtp = config.rtp,
            min_multiplier = config.min_multiplier,
            max_multiplier = config.max_multiplier,
            k = config.k,
            alpha = config.alpha,
            "solver ready"
        );

        Ok(Self {
            config,
            strategy,
            fell_back,
            source,
        })
    }

    /// Draws one multiplier.
    #[inline]
    pub fn draw(&self) -> f64 {
        self.strategy.generate(&self.config, &self.source)
    }

    /// Returns the effective configuration.
    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the strategy that actually runs.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns `true` if the requested algorithm was unknown.
    #[inline]
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    /// Returns the random source.
    #[inline]
    pub fn source(&self) -> &R {
        &self.source
    }
}

impl<R: UniformSource> Solve for Solver<R> {
    #[inline]
    fn solve(&self) -> f64 {
        self.draw()
    }
}

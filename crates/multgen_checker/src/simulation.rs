//! Multi-participant payout simulation.
//!
//! A [`PayoutSimulator`] receives one multiplier per round. For every round,
//! each participant draws an independent stake from the configured range,
//! converts it into a payout through the [`PayoutMode`] transform and adds
//! both to its running totals. Participants never share stakes or state.
//!
//! # Reproducibility
//!
//! Every participant owns a generator seeded from one master seed, so a
//! seeded run produces the same report whether the per-round loop runs
//! sequentially or in parallel.

use std::time::{Duration, Instant};

use multgen_core::Solve;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::error::{SimulationError, SimulationViolation};
use crate::stats::{confidence_interval, ConfidenceInterval};
use crate::StatsError;

/// Participant count from which rounds are played in parallel.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Rule converting a stake and a multiplier into a payout.
///
/// A payout is realised only when the multiplier is strictly greater than the
/// stake. Consequently, a stream pinned at the upper bound never pays a stake
/// that reaches the same bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PayoutMode {
    /// Payout equals the stake.
    #[default]
    Unit,
    /// Payout equals stake times multiplier.
    Scaled,
}

impl PayoutMode {
    /// Applies the transform.
    ///
    /// # Examples
    /// ```
    /// use multgen_checker::PayoutMode;
    ///
    /// assert_eq!(PayoutMode::Unit.transform(5.0, 10.0), 5.0);
    /// assert_eq!(PayoutMode::Scaled.transform(5.0, 10.0), 50.0);
    /// assert_eq!(PayoutMode::Scaled.transform(10.0, 10.0), 0.0);
    /// ```
    #[inline]
    pub fn transform(self, stake: f64, multiplier: f64) -> f64 {
        if multiplier > stake {
            match self {
                PayoutMode::Unit => stake,
                PayoutMode::Scaled => stake * multiplier,
            }
        } else {
            0.0
        }
    }
}

/// Inclusive stake range `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StakeRange {
    /// Lowest stake.
    pub min: f64,
    /// Highest stake.
    pub max: f64,
}

impl StakeRange {
    /// Creates a range; validation happens with the owning configuration.
    #[inline]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns `true` when every stake equals `min`.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

impl Default for StakeRange {
    fn default() -> Self {
        Self::new(1.0, 10_000.0)
    }
}

/// Simulation parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Number of simulated participants.
    pub participants: usize,
    /// Stake sampling range.
    pub stakes: StakeRange,
    /// Payout transform.
    pub mode: PayoutMode,
    /// Master seed; `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            participants: 1,
            stakes: StakeRange::default(),
            mode: PayoutMode::Unit,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Creates a new builder starting from the defaults.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Validates every parameter and reports all violations together.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError` listing each of:
    /// - a stake bound below 1 or not finite
    /// - `stakes.min > stakes.max`
    /// - zero participants
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), SimulationError> {
        let mut violations = Vec::new();
        let StakeRange { min, max } = self.stakes;

        if !(min >= 1.0 && min.is_finite()) {
            violations.push(SimulationViolation::MinStakeOutOfRange(min));
        }
        if !(max >= 1.0 && max.is_finite()) {
            violations.push(SimulationViolation::MaxStakeOutOfRange(max));
        }
        if min > max {
            violations.push(SimulationViolation::InvertedStakes { min, max });
        }
        if self.participants == 0 {
            violations.push(SimulationViolation::NoParticipants);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SimulationError::new(violations))
        }
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    /// Sets the number of participants.
    #[inline]
    pub fn participants(mut self, participants: usize) -> Self {
        self.config.participants = participants;
        self
    }

    /// Sets the stake range.
    #[inline]
    pub fn stakes(mut self, min: f64, max: f64) -> Self {
        self.config.stakes = StakeRange::new(min, max);
        self
    }

    /// Sets the payout transform.
    #[inline]
    pub fn mode(mut self, mode: PayoutMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Sets the master seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError` with every violated parameter.
    pub fn build(self) -> Result<SimulationConfig, SimulationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Running totals of one simulated participant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Participant {
    total_payment: f64,
    total_profit: f64,
}

impl Participant {
    /// Cumulative stake.
    #[inline]
    pub fn total_payment(&self) -> f64 {
        self.total_payment
    }

    /// Cumulative payout.
    #[inline]
    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    /// Returns `total_profit / total_payment`, or `None` before any stake.
    #[inline]
    pub fn realized_rtp(&self) -> Option<f64> {
        (self.total_payment > 0.0).then(|| self.total_profit / self.total_payment)
    }

    #[inline]
    fn record(&mut self, stake: f64, payout: f64) {
        self.total_payment += stake;
        self.total_profit += payout;
    }
}

#[derive(Clone, Debug)]
enum StakeSampler {
    Fixed(f64),
    Uniform(Uniform<f64>),
}

impl StakeSampler {
    fn new(range: StakeRange) -> Self {
        if range.is_degenerate() {
            StakeSampler::Fixed(range.min)
        } else {
            StakeSampler::Uniform(Uniform::new_inclusive(range.min, range.max))
        }
    }

    #[inline]
    fn sample(&self, rng: &mut StdRng) -> f64 {
        match self {
            StakeSampler::Fixed(stake) => *stake,
            StakeSampler::Uniform(uniform) => uniform.sample(rng),
        }
    }
}

#[derive(Debug)]
struct Player {
    rng: StdRng,
    totals: Participant,
}

impl Player {
    #[inline]
    fn play(&mut self, sampler: &StakeSampler, mode: PayoutMode, multiplier: f64) {
        let stake = sampler.sample(&mut self.rng);
        self.totals.record(stake, mode.transform(stake, multiplier));
    }
}

/// Drives simulated participants through a multiplier stream.
///
/// # Examples
///
/// ```rust
/// use multgen_checker::{PayoutMode, PayoutSimulator, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .participants(3)
///     .stakes(5.0, 5.0)
///     .mode(PayoutMode::Unit)
///     .seed(1)
///     .build()
///     .unwrap();
///
/// let mut simulator = PayoutSimulator::new(config).unwrap();
/// simulator.run([10.0, 1.0]);
///
/// let report = simulator.finish();
/// assert_eq!(report.rounds(), 2);
/// assert_eq!(report.rtps(), vec![0.5, 0.5, 0.5]);
/// ```
#[derive(Debug)]
pub struct PayoutSimulator {
    config: SimulationConfig,
    sampler: StakeSampler,
    players: Vec<Player>,
    rounds: u64,
    peak_multiplier: Option<f64>,
    started: Instant,
}

impl PayoutSimulator {
    /// Creates a simulator with fresh participant totals.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError` if the configuration is invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut master = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let players = (0..config.participants)
            .map(|_| Player {
                rng: StdRng::seed_from_u64(master.gen()),
                totals: Participant::default(),
            })
            .collect();

        debug!(
            participants = config.participants,
            min_stake = config.stakes.min,
            max_stake = config.stakes.max,
            mode = ?config.mode,
            "simulator ready"
        );

        Ok(Self {
            sampler: StakeSampler::new(config.stakes),
            config,
            players,
            rounds: 0,
            peak_multiplier: None,
            started: Instant::now(),
        })
    }

    /// Plays one round against `multiplier`.
    pub fn observe(&mut self, multiplier: f64) {
        play_round(&mut self.players, &self.sampler, self.config.mode, multiplier);

        self.rounds += 1;
        self.peak_multiplier = Some(match self.peak_multiplier {
            Some(peak) => peak.max(multiplier),
            None => multiplier,
        });
    }

    /// Plays one round per multiplier.
    pub fn run<I>(&mut self, multipliers: I)
    where
        I: IntoIterator<Item = f64>,
    {
        for multiplier in multipliers {
            self.observe(multiplier);
        }
    }

    /// Plays `rounds` rounds against fresh draws from `solver`.
    pub fn simulate<S: Solve + ?Sized>(&mut self, solver: &S, rounds: u64) {
        for _ in 0..rounds {
            self.observe(solver.solve());
        }
    }

    /// Rounds played so far.
    #[inline]
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Current participant totals.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.players.iter().map(|player| &player.totals)
    }

    /// Ends the run.
    pub fn finish(self) -> SimulationReport {
        let report = SimulationReport {
            participants: self.players.into_iter().map(|p| p.totals).collect(),
            rounds: self.rounds,
            peak_multiplier: self.peak_multiplier,
            elapsed: self.started.elapsed(),
            mode: self.config.mode,
        };

        debug!(
            rounds = report.rounds,
            elapsed = ?report.elapsed,
            peak_multiplier = ?report.peak_multiplier,
            "simulation finished"
        );
        report
    }
}

#[cfg(feature = "parallel")]
fn play_round(players: &mut [Player], sampler: &StakeSampler, mode: PayoutMode, multiplier: f64) {
    if players.len() >= PARALLEL_THRESHOLD {
        players
            .par_iter_mut()
            .for_each(|player| player.play(sampler, mode, multiplier));
    } else {
        for player in players {
            player.play(sampler, mode, multiplier);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn play_round(players: &mut [Player], sampler: &StakeSampler, mode: PayoutMode, multiplier: f64) {
    for player in players {
        player.play(sampler, mode, multiplier);
    }
}

/// Final state of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationReport {
    participants: Vec<Participant>,
    rounds: u64,
    peak_multiplier: Option<f64>,
    elapsed: Duration,
    mode: PayoutMode,
}

impl SimulationReport {
    /// Per-participant totals, in creation order.
    #[inline]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Number of rounds played.
    #[inline]
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Largest multiplier observed, `None` if no round was played.
    #[inline]
    pub fn peak_multiplier(&self) -> Option<f64> {
        self.peak_multiplier
    }

    /// Wall-clock time from simulator creation to `finish`.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Payout transform used.
    #[inline]
    pub fn mode(&self) -> PayoutMode {
        self.mode
    }

    /// Realised RTP of every participant that placed a stake.
    pub fn rtps(&self) -> Vec<f64> {
        self.participants
            .iter()
            .filter_map(Participant::realized_rtp)
            .collect()
    }

    /// Confidence interval of the realised RTPs at `level`.
    ///
    /// # Errors
    ///
    /// Returns `StatsError` if no participant placed a stake or `level` is
    /// outside (0, 1).
    pub fn confidence_interval(&self, level: f64) -> Result<ConfidenceInterval, StatsError> {
        confidence_interval(&self.rtps(), level)
    }
}

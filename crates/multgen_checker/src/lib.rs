//! # multgen_checker: Statistical Verification Harness
//!
//! Estimates the realised RTP of a multiplier stream from simulated play and
//! reports it with calibrated uncertainty.
//!
//! ## Components
//!
//! - [`simulation`]: [`PayoutSimulator`], driving independent participants
//!   through one multiplier per round
//! - [`replay`](mod@replay): feeds an external, line-oriented multiplier stream
//!   into the simulator
//! - [`stats`]: [`confidence_interval`], Student's t for small samples and
//!   the normal approximation otherwise
//! - [`report`]: output line rendering
//!
//! ## Feature Flags
//!
//! - `parallel` (default): plays rounds for large participant counts on the
//!   rayon thread pool
//!
//! ## Usage Example
//!
//! ```rust
//! use multgen_checker::{PayoutMode, PayoutSimulator, SimulationConfig};
//! use multgen_core::{Solver, SolverConfig};
//!
//! let solver = Solver::new(SolverConfig::builder().rtp(0.9).build().unwrap()).unwrap();
//! let config = SimulationConfig::builder()
//!     .participants(10)
//!     .stakes(1.0, 100.0)
//!     .mode(PayoutMode::Unit)
//!     .build()
//!     .unwrap();
//!
//! let mut simulator = PayoutSimulator::new(config).unwrap();
//! simulator.simulate(&solver, 1_000);
//!
//! let ci = simulator.finish().confidence_interval(0.95).unwrap();
//! assert!(ci.lower <= ci.mean && ci.mean <= ci.upper);
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod replay;
pub mod report;
pub mod simulation;
pub mod stats;

pub use error::{ReplayError, SimulationError, SimulationViolation, StatsError};
pub use replay::replay;
pub use report::{human_readable, interval_line, reference_intervals, REFERENCE_LEVELS};
pub use simulation::{
    Participant, PayoutMode, PayoutSimulator, SimulationConfig, SimulationConfigBuilder,
    SimulationReport, StakeRange,
};
pub use stats::{confidence_interval, ConfidenceInterval};

//! # multgen_core: Multiplier Generation Engine
//!
//! Produces one numeric multiplier per draw such that, over a long run of
//! independent draws, the ratio of total payout to total stake converges to a
//! configured return-to-player (RTP) target.
//!
//! ## Components
//!
//! - [`config`]: [`SolverConfig`] and eager validation with aggregated errors
//! - [`algorithms`]: the catalog of named, pure generation strategies
//! - [`rng`]: the [`UniformSource`](rng::UniformSource) capability and its
//!   thread-safe implementations
//! - [`solver`]: [`Solver`], which binds a configuration to one strategy
//!
//! ## Usage Example
//!
//! ```rust
//! use multgen_core::{Solver, SolverConfig};
//! use multgen_core::rng::SeededSource;
//!
//! let config = SolverConfig::builder()
//!     .rtp(0.96)
//!     .algorithm("v3")
//!     .k(2.0)
//!     .build()
//!     .unwrap();
//!
//! let solver = Solver::with_source(config, SeededSource::from_seed(42)).unwrap();
//! let m = solver.draw();
//! assert!((1.0..=10_000.0).contains(&m));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod algorithms;
pub mod config;
pub mod error;
pub mod rng;
pub mod solver;

pub use algorithms::{catalog_help, Strategy, DEFAULT_STRATEGY};
pub use config::{SolverConfig, SolverConfigBuilder, MAX_MULTIPLIER, MIN_MULTIPLIER};
pub use error::{ConfigError, Violation};
pub use solver::{Solve, Solver};

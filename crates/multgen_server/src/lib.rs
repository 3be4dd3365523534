//! HTTP service for the multiplier generator
//!
//! Exposes `GET /get`, returning one freshly drawn multiplier as JSON, and
//! `GET /ping` for liveness checks.

pub mod routes;
pub mod server;

pub use routes::{build_router, AppState};
pub use server::{shutdown_signal, Server};

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

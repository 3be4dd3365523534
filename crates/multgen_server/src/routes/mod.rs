//! Route modules for the multgen server
//!
//! - multiplier: `GET /get`
//! - health: `GET /ping`
//!
//! Every response carries no-cache headers.

pub mod health;
pub mod multiplier;

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::Router;
use multgen_core::Solve;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Multiplier source
    pub solver: Arc<dyn Solve>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(solver: Arc<dyn Solve>) -> Self {
        Self { solver }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(solver: Arc<dyn Solve>) -> Router {
    let state = AppState::new(solver);

    Router::new()
        .merge(multiplier::routes())
        .merge(health::routes())
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub(crate) mod test_support {
    use multgen_core::Solve;

    /// Returns the same multiplier on every call
    pub struct FixedSolver(pub f64);

    impl Solve for FixedSolver {
        fn solve(&self) -> f64 {
            self.0
        }
    }
}

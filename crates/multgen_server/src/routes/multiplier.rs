//! Multiplier endpoint

use axum::{extract::State, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Multiplier response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierResponse {
    /// Freshly drawn multiplier
    pub result: f64,
}

/// Build the multiplier routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/get", get(get_handler))
}

/// GET /get - Draw one multiplier
async fn get_handler(State(state): State<AppState>) -> Json<MultiplierResponse> {
    Json(MultiplierResponse {
        result: state.solver.solve(),
    })
}

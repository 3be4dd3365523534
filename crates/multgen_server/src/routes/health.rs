//! Liveness endpoint

use axum::{routing::get, Router};

use super::AppState;

/// Build the health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping_handler))
}

/// GET /ping - Liveness probe
async fn ping_handler() -> &'static str {
    "pong"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::FixedSolver;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_ping_returns_pong() {
        let router = routes().with_state(AppState::new(Arc::new(FixedSolver(1.0))));

        let response = router
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"pong");
    }
}

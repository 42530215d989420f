//! Common routes: health and readiness.

use crate::handlers::health::{health, ready};
use crate::state::AppState;
use axum::{routing::any, Router};

/// `/health` never touches downstream services; `/ready` checks the store and cache.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", any(health))
        .route("/ready", any(ready))
        .with_state(state)
}

//! Router assembly: component and probe routes plus the cross-cutting layers.

mod common;
mod components;

pub use common::common_routes_with_ready;
pub use components::component_routes;

use crate::config::ServerConfig;
use crate::handlers::health::not_found;
use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Read-only API; request bodies are never consumed.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// The body limit is applied on its own so CORS wraps a plain `Body` service
/// (preflight responses need `ResBody: Default`).
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(component_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&server.allowed_origins)),
        )
}

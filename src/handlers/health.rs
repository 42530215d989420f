//! Liveness and readiness probes.

use crate::error::AppError;
use crate::response::{Envelope, HEALTH_MESSAGE, PAGE_NOT_FOUND_MESSAGE, READY_MESSAGE, UNAVAILABLE_MESSAGE};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{Method, StatusCode},
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ReadyBody {
    pub database: &'static str,
    pub cache: &'static str,
}

/// Never touches the store or cache.
pub async fn health(method: Method) -> Result<Envelope<()>, AppError> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed(method));
    }
    Ok(Envelope::new(StatusCode::OK, HEALTH_MESSAGE, None))
}

pub async fn ready(State(state): State<AppState>, method: Method) -> Result<Envelope<ReadyBody>, AppError> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed(method));
    }
    let readiness = state.components.readiness().await;
    let body = ReadyBody {
        database: if readiness.database { "ok" } else { "unavailable" },
        cache: readiness.cache.as_str(),
    };
    if readiness.is_ready() {
        Ok(Envelope::new(StatusCode::OK, READY_MESSAGE, Some(body)))
    } else {
        tracing::warn!(database = body.database, cache = body.cache, "not ready");
        Ok(Envelope::new(StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_MESSAGE, Some(body)))
    }
}

pub async fn not_found() -> Envelope<()> {
    Envelope::error(StatusCode::NOT_FOUND, PAGE_NOT_FOUND_MESSAGE)
}

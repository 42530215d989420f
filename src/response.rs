//! Uniform `{code, message, data}` response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Success";
pub const HEALTH_MESSAGE: &str = "Backend is running";
pub const READY_MESSAGE: &str = "Ready";
pub const UNAVAILABLE_MESSAGE: &str = "Service unavailable";
pub const PAGE_NOT_FOUND_MESSAGE: &str = "Page not found";

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    /// Serialized as `null` when absent.
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(status: StatusCode, message: &str, data: Option<T>) -> Self {
        Envelope {
            code: status.as_u16(),
            message: message.to_string(),
            data,
        }
    }

    pub fn success(data: T) -> Self {
        Self::new(StatusCode::OK, SUCCESS_MESSAGE, Some(data))
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub fn success_one<T: Serialize>(data: T) -> Envelope<T> {
    Envelope::success(data)
}

/// List payloads are always arrays, never `null`.
pub fn success_many<T: Serialize>(data: Vec<T>) -> Envelope<Vec<T>> {
    Envelope::success(data)
}

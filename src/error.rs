//! Typed errors and HTTP mapping.

use crate::response::Envelope;
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::time::Duration;
use thiserror::Error;

pub const BAD_REQUEST_MESSAGE: &str = "Bad request";
pub const COMPONENT_NOT_FOUND_MESSAGE: &str = "Component not found";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),
    #[error("invalid category value: {0}")]
    InvalidCategory(String),
    #[error("query: {0}")]
    Query(String),
    #[error("query timed out after {0:?}")]
    Timeout(Duration),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidCategory(_)
            | AppError::Query(_)
            | AppError::Timeout(_)
            | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Never carries the underlying error text.
    pub fn public_message(&self) -> &'static str {
        match self.status() {
            StatusCode::BAD_REQUEST => BAD_REQUEST_MESSAGE,
            StatusCode::NOT_FOUND => COMPONENT_NOT_FOUND_MESSAGE,
            StatusCode::METHOD_NOT_ALLOWED => METHOD_NOT_ALLOWED_MESSAGE,
            _ => INTERNAL_SERVER_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        Envelope::<()>::error(status, self.public_message()).into_response()
    }
}

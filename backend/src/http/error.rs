//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::db::repository::RepositoryError;
use crate::models::WindowSpecError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    Internal(String),
    Repository(RepositoryError),
    Config(ConfigError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => {
                let status = match &e {
                    RepositoryError::NotFound { .. } => StatusCode::NOT_FOUND,
                    RepositoryError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                    RepositoryError::ConnectionError { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let code = if e.is_not_found() {
                    "NOT_FOUND"
                } else {
                    "REPOSITORY_ERROR"
                };
                (status, ApiError::new(code, e.to_string()))
            }
            AppError::Config(e) if e.is_unknown_industry() => (
                StatusCode::NOT_FOUND,
                ApiError::new("UNKNOWN_INDUSTRY", e.to_string()),
            ),
            AppError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CONFIG_ERROR", "Dashboard configuration error")
                    .with_details(e.to_string()),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<WindowSpecError> for AppError {
    fn from(err: WindowSpecError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

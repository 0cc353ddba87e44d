//! API error handling
//!
//! Every failure is terminal for its request and maps to exactly one status
//! code and a short message. Driver and hasher details are logged by the
//! service, never echoed to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Human-readable message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Application error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A required field is missing or empty
    #[error("{0}")]
    Validation(String),
    /// Username or aadhaar already registered
    #[error("{0}")]
    Conflict(String),
    /// Credentials rejected; message never says which part was wrong
    #[error("Invalid credentials")]
    Auth,
    /// Unexpected persistence failure
    #[error("{0}")]
    Store(String),
    /// Unexpected internal failure
    #[error("{0}")]
    Server(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Auth => StatusCode::UNAUTHORIZED,
            AppError::Store(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Auth => "Invalid credentials",
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Store(msg)
            | AppError::Server(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.message()))).into_response()
    }
}

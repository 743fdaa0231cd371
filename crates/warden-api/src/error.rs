//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use warden_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An `AppError` on its way out of a handler, with an optional
/// endpoint-specific error code.
#[derive(Debug)]
pub struct ApiError {
    /// The underlying error.
    pub error: AppError,
    /// Overrides the default code for the error kind.
    pub code: Option<&'static str>,
    /// Optional details, e.g. per-field validation failures.
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Replaces the error code when the error is of `kind`.
    pub fn code_for(mut self, kind: ErrorKind, code: &'static str) -> Self {
        if self.error.kind == kind {
            self.code = Some(code);
        }
        self
    }

    /// Attaches details to the response body.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            code: None,
            details: None,
        }
    }
}

/// Status and default code for an error kind.
fn classify(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Credentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "validation_error"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "conflict"),
        ErrorKind::Configuration
        | ErrorKind::Randomness
        | ErrorKind::Internal
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, default_code) = classify(self.error.kind);

        let message = if self.error.kind.is_server_fault() {
            tracing::error!(kind = %self.error.kind, error = %self.error.message, "Internal server error");
            "An internal error occurred".to_string()
        } else {
            self.error.message
        };

        let body = ApiErrorResponse {
            error: self.code.unwrap_or(default_code).to_string(),
            message,
            details: self.details,
        };

        (status, Json(body)).into_response()
    }
}

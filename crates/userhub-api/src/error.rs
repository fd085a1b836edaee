//! Maps domain `AppError` to HTTP responses.
//!
//! The orphan rule keeps `IntoResponse` off `AppError` itself (both are
//! foreign to this crate), so the mapping lives on the local [`ApiError`]
//! wrapper. Handlers return `ApiError` and `?` converts through
//! `From<AppError>`.
//!
//! Credential and session errors become the exact client-facing shapes
//! the login protocol promises; server faults are logged in full and
//! reduced to a generic 500 so no internal detail leaks.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use userhub_core::error::{AppError, ErrorKind};

/// HTTP-facing wrapper around the domain error.
#[derive(Debug, Clone)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Body returned for failed logins: `{"type":"error","msg":"..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialError {
    /// Always `"error"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Uniform message regardless of cause.
    pub msg: String,
}

/// Standard API error response body for non-auth failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.kind {
            ErrorKind::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                Json(CredentialError {
                    kind: "error".to_string(),
                    msg: err.message,
                }),
            )
                .into_response(),
            // The gate promises plain-text 401 reasons.
            ErrorKind::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            ErrorKind::SessionExpired => {
                (StatusCode::UNAUTHORIZED, "Session expired").into_response()
            }
            ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ApiErrorResponse {
                    error: "NOT_FOUND".to_string(),
                    message: err.message,
                }),
            )
                .into_response(),
            ErrorKind::Validation => (
                StatusCode::BAD_REQUEST,
                Json(ApiErrorResponse {
                    error: "VALIDATION_ERROR".to_string(),
                    message: err.message,
                }),
            )
                .into_response(),
            ErrorKind::Conflict => (
                StatusCode::CONFLICT,
                Json(ApiErrorResponse {
                    error: "CONFLICT".to_string(),
                    message: err.message,
                }),
            )
                .into_response(),
            ErrorKind::WeakTokenRequest
            | ErrorKind::EntropyUnavailable
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorResponse {
                        error: "INTERNAL_ERROR".to_string(),
                        message: "internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

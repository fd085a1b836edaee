//! Unified application error types for UserHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The HTTP layer translates each
//! [`ErrorKind`] into a status code and a client-safe body.

use std::fmt;

use thiserror::Error;

/// Top-level error categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Login failed. Deliberately covers both unknown-account and
    /// wrong-password so callers cannot enumerate accounts.
    InvalidCredentials,
    /// No valid session accompanies the request.
    Unauthenticated,
    /// The presented session exists but its expiry has passed.
    SessionExpired,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate email, duplicate token, etc.).
    Conflict,
    /// A token was requested with too little entropy.
    WeakTokenRequest,
    /// The OS entropy source failed.
    EntropyUnavailable,
    /// A database or session-store error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::SessionExpired => write!(f, "SESSION_EXPIRED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::WeakTokenRequest => write!(f, "WEAK_TOKEN_REQUEST"),
            Self::EntropyUnavailable => write!(f, "ENTROPY_UNAVAILABLE"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout UserHub.
///
/// Crate-specific errors are mapped into `AppError` using `From` impls or
/// explicit `.map_err()` calls, giving the whole application a single
/// error type at its boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create the uniform invalid-credentials error.
    ///
    /// The message is fixed so the response is identical for unknown
    /// accounts and wrong passwords.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "invalid credentials")
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a session-expired error.
    pub fn session_expired() -> Self {
        Self::new(ErrorKind::SessionExpired, "session has expired")
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a weak-token-request error.
    pub fn weak_token_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WeakTokenRequest, message)
    }

    /// Create an entropy-unavailable error.
    pub fn entropy_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EntropyUnavailable, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error should be hidden behind a generic 500 response.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::WeakTokenRequest
                | ErrorKind::EntropyUnavailable
                | ErrorKind::Database
                | ErrorKind::Configuration
                | ErrorKind::Serialization
                | ErrorKind::Internal
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

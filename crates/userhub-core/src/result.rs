//! Result alias used across the workspace.

use crate::error::AppError;

/// Convenience alias for results carrying [`AppError`].
pub type AppResult<T> = Result<T, AppError>;

//! # userhub-core
//!
//! Shared foundation for the UserHub service: configuration schemas,
//! the unified [`error::AppError`] type, and the [`result::AppResult`]
//! alias used by every other crate in the workspace.

pub mod config;
pub mod error;
pub mod result;

pub use config::AppConfig;
pub use error::{AppError, ErrorKind};
pub use result::AppResult;

//! # userhub-api
//!
//! HTTP surface for the UserHub service: request/response DTOs, cookie
//! helpers, the authentication gate, route handlers, and the router.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

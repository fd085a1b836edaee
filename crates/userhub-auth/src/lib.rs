//! # userhub-auth
//!
//! Authentication core for the UserHub service.
//!
//! ## Modules
//!
//! - `token` — cryptographically strong opaque session tokens
//! - `password` — Argon2id password hashing and verification
//! - `session` — session lifecycle: issue, authenticate, validate, terminate

pub mod password;
pub mod session;
pub mod token;

pub use password::PasswordHasher;
pub use session::{SessionManager, SessionStore};
pub use token::TokenGenerator;

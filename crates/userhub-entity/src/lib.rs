//! # userhub-entity
//!
//! Entity models shared between the repositories, the auth crate, and
//! the HTTP layer.

pub mod session;
pub mod user;

pub use session::{NewSession, Session};
pub use user::{NewUser, UpdateUser, User};

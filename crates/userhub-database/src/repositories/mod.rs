//! Repository traits and their implementations.
//!
//! `user` and `session` define the traits alongside the PostgreSQL
//! implementations; `memory` holds the in-memory doubles used by unit
//! and integration tests.

pub mod memory;
pub mod session;
pub mod user;

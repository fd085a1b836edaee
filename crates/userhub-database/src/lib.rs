//! # userhub-database
//!
//! PostgreSQL connection management plus the repository abstractions the
//! rest of the application is written against. Each repository is a trait
//! with two implementations: a durable PostgreSQL one and a deterministic
//! in-memory double for tests, selected by dependency injection at
//! construction.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use repositories::memory::{MemorySessionRepository, MemoryUserRepository};
pub use repositories::session::{PgSessionRepository, SessionRepository};
pub use repositories::user::{PgUserRepository, UserRepository};

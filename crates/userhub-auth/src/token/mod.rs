//! Opaque session token generation.

pub mod generator;

pub use generator::{MIN_ENTROPY_BYTES, TOKEN_LENGTH, TokenGenerator};

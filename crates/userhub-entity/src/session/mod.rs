//! Session entity.

pub mod model;

pub use model::{NewSession, Session};

//! Session lifecycle: issue, authenticate, validate, terminate.

pub mod manager;
pub mod store;

pub use manager::SessionManager;
pub use store::SessionStore;

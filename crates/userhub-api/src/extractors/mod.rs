//! Handler extractors.

pub mod auth;

pub use auth::CurrentUser;

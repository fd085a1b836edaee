//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user account.
///
/// The auth core only reads `id`, `email`, and `password_hash`; the
/// remaining fields are plain profile data.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display username.
    pub username: String,
    /// Email address (unique, used for login).
    pub email: String,
    /// Argon2id password hash. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Administrator flag.
    pub is_admin: bool,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2id hash of the chosen password.
    pub password_hash: String,
}

/// Mutable user fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New username.
    pub username: String,
}

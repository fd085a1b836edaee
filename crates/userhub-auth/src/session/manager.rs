//! Session lifecycle manager — login, validation, and logout flows.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use userhub_core::config::session::SessionConfig;
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_database::repositories::user::UserRepository;
use userhub_entity::session::Session;

use crate::password::PasswordHasher;
use crate::token::TokenGenerator;

use super::store::SessionStore;

/// Manages the complete session lifecycle.
///
/// This is the sole writer of session rows. Sessions are never mutated
/// in place: a session is either present in the store (valid until its
/// expiry) or absent (logically invalid). Every validation re-reads the
/// store, so there is no staleness window beyond store consistency.
#[derive(Clone)]
pub struct SessionManager {
    /// Session persistence.
    store: Arc<SessionStore>,
    /// User repository for credential lookup.
    user_repo: Arc<dyn UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Opaque token generator.
    token_generator: TokenGenerator,
    /// Session configuration.
    config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionManager {
    /// Create a new session manager with all required dependencies.
    pub fn new(
        store: Arc<SessionStore>,
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        token_generator: TokenGenerator,
        config: SessionConfig,
    ) -> Self {
        Self {
            store,
            user_repo,
            password_hasher,
            token_generator,
            config,
        }
    }

    /// Issue a new session for a user: generate a token, compute the
    /// expiry, and persist the record with a single durable write.
    ///
    /// Not retried on failure; a failed create is a failed login, never
    /// a half-issued session.
    pub async fn issue(&self, user_id: Uuid) -> AppResult<Session> {
        let token = self
            .token_generator
            .generate(self.config.token_entropy_bytes)?;

        let session = self.store.create_session(user_id, &token).await?;

        info!(
            user_id = %user_id,
            session_id = session.id,
            expires_at = %session.expires_at,
            "Session issued"
        );

        Ok(session)
    }

    /// Authenticate credentials and issue a session on success.
    ///
    /// An unknown email and a wrong password both produce the same
    /// `InvalidCredentials` error so the response cannot be used to
    /// enumerate accounts.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Session> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::invalid_credentials());
        }

        self.issue(user.id).await
    }

    /// Validate a token and return the session it names.
    ///
    /// Unknown tokens — forged or already logged out, indistinguishable
    /// by design — fail `Unauthenticated`. An expired session is deleted
    /// on the spot (lazy cleanup, no background reaper) and fails
    /// `SessionExpired`.
    pub async fn validate(&self, token: &str) -> AppResult<Session> {
        let Some(session) = self.store.find_by_token(token).await? else {
            return Err(AppError::unauthenticated("Unknown session token"));
        };

        if session.is_expired() {
            self.store.delete_by_token(token).await?;
            info!(
                session_id = session.id,
                user_id = %session.user_id,
                "Expired session removed on probe"
            );
            return Err(AppError::session_expired());
        }

        Ok(session)
    }

    /// Terminate a session by token. Idempotent: terminating an absent
    /// token is not an error.
    pub async fn terminate(&self, token: &str) -> AppResult<()> {
        self.store.delete_by_token(token).await?;
        info!("Session terminated");
        Ok(())
    }
}

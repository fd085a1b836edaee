//! Session storage operations wrapping the session repository.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use uuid::Uuid;

use userhub_core::config::session::SessionConfig;
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_database::repositories::session::SessionRepository;
use userhub_entity::session::{NewSession, Session};

/// Abstracts session persistence operations.
///
/// Owns expiry computation and bounds every repository call with a
/// timeout so a stalled store surfaces as a server fault rather than
/// hanging the request.
#[derive(Clone)]
pub struct SessionStore {
    /// Session repository (durable or in-memory, injected).
    repo: Arc<dyn SessionRepository>,
    /// Session configuration.
    config: SessionConfig,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionStore {
    /// Create a new session store.
    pub fn new(repo: Arc<dyn SessionRepository>, config: SessionConfig) -> Self {
        Self { repo, config }
    }

    /// Create a new session record expiring `ttl_minutes` from now.
    pub async fn create_session(&self, user_id: Uuid, token: &str) -> AppResult<Session> {
        let expires_at = Utc::now() + Duration::minutes(self.config.ttl_minutes as i64);

        let new = NewSession {
            user_id,
            token: token.to_string(),
            expires_at,
        };

        self.bounded(self.repo.create(&new))
            .await
            .map_err(|e| AppError::database(format!("Failed to persist session: {e}")))
    }

    /// Look up a session by its token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        self.bounded(self.repo.find_by_token(token)).await
    }

    /// Delete a session by its token. Idempotent.
    pub async fn delete_by_token(&self, token: &str) -> AppResult<()> {
        self.bounded(self.repo.delete_by_token(token)).await
    }

    /// Bound a repository call by the configured store timeout.
    async fn bounded<T>(&self, fut: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        let limit = StdDuration::from_secs(self.config.store_timeout_seconds);
        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::database("Session store call timed out")),
        }
    }
}

//! Session repository trait and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_entity::session::{NewSession, Session};

/// Durable storage of session records, keyed by token.
///
/// Implementations must provide read-your-writes consistency: a session
/// created must be immediately visible to a subsequent lookup by the
/// same token.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Insert a new session and return it with its assigned id.
    async fn create(&self, new: &NewSession) -> AppResult<Session>;

    /// Find a session by its token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>>;

    /// Delete a session by its token. Idempotent: deleting an absent
    /// token is not an error.
    async fn delete_by_token(&self, token: &str) -> AppResult<()>;

    /// Delete every session belonging to a user. Returns the number of
    /// rows removed.
    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64>;
}

/// PostgreSQL-backed session repository.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, new: &NewSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (user_id, token, expires_at) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(new.user_id)
        .bind(&new.token)
        .bind(new.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("Session token collision")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert session", e),
        })
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
            })
    }

    async fn delete_by_token(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete session", e)
            })?;
        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete user sessions", e)
            })?;
        Ok(result.rows_affected())
    }
}

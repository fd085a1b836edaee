//! User repository trait and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_entity::user::{NewUser, UpdateUser, User};

/// Durable storage of user accounts.
///
/// Implementations must provide read-your-writes consistency: a created
/// user is immediately visible to a subsequent lookup.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new user and return it with its assigned id.
    async fn create(&self, new: &NewUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Update a user's mutable fields. Returns `None` if the user does
    /// not exist.
    async fn update(&self, id: Uuid, update: &UpdateUser) -> AppResult<Option<User>>;

    /// Delete a user and all of their sessions. Returns `true` if a user
    /// row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<()>;
}

/// PostgreSQL-backed user repository.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new: &NewUser) -> AppResult<User> {
        let id = Uuid::new_v4();

        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, password_hash, is_admin) \
             VALUES ($1, $2, $3, $4, FALSE) RETURNING *",
        )
        .bind(id)
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("A user with this email already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert user", e),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn update(&self, id: Uuid, update: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = $1 WHERE id = $2 RETURNING *",
        )
        .bind(&update.username)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        // Session rows go with the user via the ON DELETE CASCADE foreign
        // key, so a single statement covers the cascade.
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))?;
        Ok(())
    }
}

//! In-memory repository doubles using Tokio mutexes.
//!
//! Deterministic single-process implementations of the repository traits,
//! used by unit tests and by integration tests that drive the full HTTP
//! stack without a database.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_entity::session::{NewSession, Session};
use userhub_entity::user::{NewUser, UpdateUser, User};

use super::session::SessionRepository;
use super::user::UserRepository;

/// In-memory session repository keyed by token.
#[derive(Debug, Default)]
pub struct MemorySessionRepository {
    /// Live sessions, keyed by token.
    sessions: Mutex<HashMap<String, Session>>,
    /// Monotonic surrogate id counter.
    next_id: AtomicI64,
}

impl MemorySessionRepository {
    /// Create an empty in-memory session repository.
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn create(&self, new: &NewSession) -> AppResult<Session> {
        let mut sessions = self.sessions.lock().await;

        if sessions.contains_key(&new.token) {
            return Err(AppError::conflict("Session token collision"));
        }

        let session = Session {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            user_id: new.user_id,
            token: new.token.clone(),
            expires_at: new.expires_at,
        };
        sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        Ok(self.sessions.lock().await.get(token).cloned())
    }

    async fn delete_by_token(&self, token: &str) -> AppResult<()> {
        self.sessions.lock().await.remove(token);
        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }
}

/// In-memory user repository.
///
/// Holds a handle to the session repository so that user deletion can
/// cascade the same way the PostgreSQL foreign key does.
#[derive(Debug)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
    sessions: Arc<MemorySessionRepository>,
}

impl MemoryUserRepository {
    /// Create an empty in-memory user repository cascading into the
    /// given session repository.
    pub fn new(sessions: Arc<MemorySessionRepository>) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            sessions,
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new: &NewUser) -> AppResult<User> {
        let mut users = self.users.lock().await;

        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&new.email))
        {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new.username.clone(),
            email: new.email.clone(),
            password_hash: new.password_hash.clone(),
            is_admin: false,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.lock().await.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn update(&self, id: Uuid, update: &UpdateUser) -> AppResult<Option<User>> {
        let mut users = self.users.lock().await;
        Ok(users.get_mut(&id).map(|user| {
            user.username = update.username.clone();
            user.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let removed = self.users.lock().await.remove(&id).is_some();
        if removed {
            self.sessions.delete_by_user(id).await?;
        }
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn new_session(user_id: Uuid, token: &str) -> NewSession {
        NewSession {
            user_id,
            token: token.to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[tokio::test]
    async fn created_session_is_immediately_visible() {
        let repo = MemorySessionRepository::new();
        let user_id = Uuid::new_v4();

        let created = repo.create(&new_session(user_id, "tok-1")).await.unwrap();
        let found = repo.find_by_token("tok-1").await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.user_id, user_id);
    }

    #[tokio::test]
    async fn duplicate_token_is_a_conflict() {
        let repo = MemorySessionRepository::new();
        let user_id = Uuid::new_v4();

        repo.create(&new_session(user_id, "tok")).await.unwrap();
        let err = repo.create(&new_session(user_id, "tok")).await.unwrap_err();
        assert_eq!(err.kind, userhub_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn delete_by_token_is_idempotent() {
        let repo = MemorySessionRepository::new();
        repo.create(&new_session(Uuid::new_v4(), "tok"))
            .await
            .unwrap();

        repo.delete_by_token("tok").await.unwrap();
        repo.delete_by_token("tok").await.unwrap();
        assert!(repo.find_by_token("tok").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_into_sessions() {
        let sessions = Arc::new(MemorySessionRepository::new());
        let users = MemoryUserRepository::new(Arc::clone(&sessions));

        let user = users
            .create(&NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        sessions.create(&new_session(user.id, "tok-a")).await.unwrap();
        sessions.create(&new_session(user.id, "tok-b")).await.unwrap();

        assert!(users.delete(user.id).await.unwrap());
        assert!(sessions.find_by_token("tok-a").await.unwrap().is_none());
        assert!(sessions.find_by_token("tok-b").await.unwrap().is_none());
    }
}

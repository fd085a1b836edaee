//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use userhub_auth::password::PasswordHasher;
use userhub_auth::session::SessionManager;
use userhub_core::config::AppConfig;
use userhub_database::repositories::user::UserRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across request tasks; the repository
/// is a trait object so tests can inject the in-memory double.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// User repository (durable or in-memory, injected).
    pub user_repo: Arc<dyn UserRepository>,
    /// Password hasher (Argon2id).
    pub password_hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish()
    }
}

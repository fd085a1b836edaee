//! Shared test helpers for integration tests.
//!
//! The test app runs the real router over the in-memory repositories,
//! so tests exercise the full HTTP surface without a database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use userhub_api::AppState;
use userhub_auth::password::PasswordHasher;
use userhub_auth::session::{SessionManager, SessionStore};
use userhub_auth::token::TokenGenerator;
use userhub_core::config::AppConfig;
use userhub_database::repositories::memory::{MemorySessionRepository, MemoryUserRepository};
use userhub_database::repositories::session::SessionRepository;
use userhub_database::repositories::user::UserRepository;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Session repository for direct inspection and seeding
    pub session_repo: Arc<MemorySessionRepository>,
    /// User repository for direct inspection
    pub user_repo: Arc<MemoryUserRepository>,
    /// Password hasher matching the one inside the app
    pub hasher: Arc<PasswordHasher>,
}

impl TestApp {
    /// Create a new test application backed by in-memory repositories.
    pub fn new() -> Self {
        let config = AppConfig::default();

        let session_repo = Arc::new(MemorySessionRepository::new());
        let user_repo = Arc::new(MemoryUserRepository::new(Arc::clone(&session_repo)));

        let hasher = Arc::new(PasswordHasher::new());
        let store = Arc::new(SessionStore::new(
            Arc::clone(&session_repo) as Arc<dyn SessionRepository>,
            config.session.clone(),
        ));
        let session_manager = Arc::new(SessionManager::new(
            store,
            Arc::clone(&user_repo) as Arc<dyn UserRepository>,
            Arc::clone(&hasher),
            TokenGenerator::new(),
            config.session.clone(),
        ));

        let app_state = AppState {
            config: Arc::new(config.clone()),
            session_manager,
            user_repo: Arc::clone(&user_repo) as Arc<dyn UserRepository>,
            password_hasher: Arc::clone(&hasher),
        };

        let router = userhub_api::build_router(app_state);

        Self {
            router,
            config,
            session_repo,
            user_repo,
            hasher,
        }
    }

    /// Create a user directly in the repository and return their ID.
    pub async fn create_test_user(&self, username: &str, email: &str, password: &str) -> Uuid {
        let hash = self.hasher.hash_password(password).expect("hash password");

        let user = self
            .user_repo
            .create(&userhub_entity::user::NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash,
            })
            .await
            .expect("create test user");

        user.id
    }

    /// Login and return the session token from the `Set-Cookie` header.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {}",
            response.text
        );

        let set_cookie = response
            .set_cookie()
            .expect("No Set-Cookie header in login response");
        cookie_value(&set_cookie).to_string()
    }

    /// Make an HTTP request to the test app.
    ///
    /// `token` is sent as the `session_token` cookie when present.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(
                COOKIE,
                format!("{}={}", self.config.session.cookie_name, token),
            );
        }

        let req = req.body(Body::from(body_str)).expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");

        TestResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub text: String,
}

impl TestResponse {
    /// Parse the body as JSON, `Value::Null` if it is not JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }

    /// The first `Set-Cookie` header, if any.
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }
}

/// Extract the cookie value from a `Set-Cookie` header.
pub fn cookie_value(set_cookie: &str) -> &str {
    let pair = set_cookie.split(';').next().unwrap_or("");
    pair.split_once('=').map(|(_, v)| v).unwrap_or("")
}

//! UserHub Server — session-authenticated user management service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use userhub_api::AppState;
use userhub_auth::password::PasswordHasher;
use userhub_auth::session::{SessionManager, SessionStore};
use userhub_auth::token::TokenGenerator;
use userhub_core::config::AppConfig;
use userhub_core::error::AppError;
use userhub_database::repositories::session::{PgSessionRepository, SessionRepository};
use userhub_database::repositories::user::{PgUserRepository, UserRepository};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("USERHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting UserHub v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db_pool = userhub_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    userhub_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    let user_repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(db_pool.clone()));
    let session_repo: Arc<dyn SessionRepository> =
        Arc::new(PgSessionRepository::new(db_pool.clone()));

    tracing::info!("Initializing authentication system...");
    let password_hasher = Arc::new(PasswordHasher::new());
    let session_store = Arc::new(SessionStore::new(session_repo, config.session.clone()));
    let session_manager = Arc::new(SessionManager::new(
        session_store,
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        TokenGenerator::new(),
        config.session.clone(),
    ));

    let app_state = AppState {
        config: Arc::new(config.clone()),
        session_manager,
        user_repo,
        password_hasher,
    };

    let app = userhub_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("UserHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("UserHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

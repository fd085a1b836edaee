//! Route definitions for the UserHub HTTP API.
//!
//! Routes are split into a public set and a gated set; the gated set
//! carries the session-validation middleware as a `route_layer` so the
//! gate only runs for routes that actually require it.

use std::time::Duration;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    // Keep the default 408 behavior rather than picking a status here.
    #[allow(deprecated)]
    let timeout_layer = TimeoutLayer::new(request_timeout);

    Router::new()
        .merge(public_routes())
        .merge(gated_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(timeout_layer)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Routes reachable without a session: health, login, and the public
/// user surface (signup, single read, list).
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/login", post(handlers::auth::login))
        .route("/user", post(handlers::user::create_user))
        .route("/users", get(handlers::user::list_users))
        .route("/user/{id}", get(handlers::user::get_user))
}

/// Routes behind the session gate: logout, user update, user delete.
fn gated_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/user/{id}", put(handlers::user::update_user))
        .route("/user/{id}", delete(handlers::user::delete_user))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_session,
        ))
}

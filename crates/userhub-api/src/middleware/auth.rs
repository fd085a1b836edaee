//! Authentication gate middleware.
//!
//! The only gate between "any caller" and the mutating operations.
//! Extracts the session cookie, validates it against the store, and
//! either short-circuits with a 401 or forwards the request with the
//! authenticated identity attached to its extensions.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use userhub_core::error::ErrorKind;

use crate::cookies;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// Gate applied to protected routes.
///
/// Rejections carry the plain-text reasons the protocol promises:
/// `Unauthorized` for a missing or unknown token, `Session expired`
/// (plus a clearing `Set-Cookie`) for a lapsed one. The wrapped handler
/// never runs on rejection.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session.cookie_name.as_str();

    let Some(cookie) = jar.get(cookie_name) else {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    };

    match state.session_manager.validate(cookie.value()).await {
        Ok(session) => {
            request.extensions_mut().insert(CurrentUser {
                user_id: session.user_id,
                token: session.token,
            });
            next.run(request).await
        }
        Err(err) if err.kind == ErrorKind::SessionExpired => {
            let clearing = CookieJar::default().add(cookies::clear_session_cookie(cookie_name));
            (clearing, (StatusCode::UNAUTHORIZED, "Session expired")).into_response()
        }
        Err(err) if err.kind == ErrorKind::Unauthenticated => {
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
        // Store faults surface as 500, never as a forged validation failure.
        Err(err) => ApiError::from(err).into_response(),
    }
}

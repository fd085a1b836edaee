//! Auth handlers — login and logout.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use userhub_core::error::AppError;

use crate::cookies;
use crate::dto::request::LoginRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /login
///
/// On success the session token is bound to the response cookie; on bad
/// credentials the uniform 400 body is returned with no cookie set.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state
        .session_manager
        .authenticate(&req.email, &req.password)
        .await?;

    let cookie = cookies::session_cookie(
        &state.config.session.cookie_name,
        &session.token,
        session.expires_at,
    );

    Ok((
        jar.add(cookie),
        Json(MessageResponse::new("Login successful")),
    ))
}

/// POST /logout
///
/// Runs behind the gate, so the session has already been validated.
/// Deletes the session row and clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    state.session_manager.terminate(&current.token).await?;

    let clearing = cookies::clear_session_cookie(&state.config.session.cookie_name);

    Ok((
        jar.add(clearing),
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

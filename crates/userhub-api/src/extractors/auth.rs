//! `CurrentUser` extractor — the identity the authentication gate
//! attached to the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use userhub_core::error::AppError;

use crate::error::ApiError;

/// The authenticated identity for the current request.
///
/// Inserted into request extensions by the gate middleware; requests on
/// ungated routes never carry it. Request-scoped by construction — the
/// identity lives in the request, never in process globals, so
/// concurrent requests stay isolated.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The authenticated user's id.
    pub user_id: Uuid,
    /// The session token that authenticated this request.
    pub token: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| {
                AppError::unauthenticated("Request reached a protected handler without a session")
                    .into()
            })
    }
}

//! User CRUD handlers.
//!
//! Creation, single read, and list are deliberately ungated (public
//! signup as shipped); update and delete run behind the authentication
//! gate.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use userhub_core::error::AppError;
use userhub_entity::user::{NewUser, UpdateUser};

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /user
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let password_hash = state.password_hasher.hash_password(&req.password)?;

    let user = state
        .user_repo
        .create(&NewUser {
            username: req.username,
            email: req.email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_repo.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /user/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No user with id {id}")))?;

    Ok(Json(user.into()))
}

/// PUT /user/{id} (gated)
pub async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .user_repo
        .update(
            id,
            &UpdateUser {
                username: req.username,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found(format!("No user with id {id}")))?;

    info!(user_id = %id, actor = %current.user_id, "User updated");

    Ok(Json(user.into()))
}

/// DELETE /user/{id} (gated)
///
/// Deletes the user and cascades away their sessions.
pub async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state.user_repo.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("No user with id {id}")).into());
    }

    info!(user_id = %id, actor = %current.user_id, "User deleted");

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

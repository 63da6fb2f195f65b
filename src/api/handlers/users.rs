//! Handlers for user CRUD endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all users.
///
/// # Endpoint
///
/// `GET /api/users`
///
/// Served from the `user_list` cache entry when present; a miss reads the
/// repository and populates the entry with the default TTL.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Retrieves a single user.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the id does not exist.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get(id).await?;
    Ok(Json(user.into()))
}

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// Invalidates the cached user collection after the insert commits.
///
/// # Errors
///
/// Returns 400 Bad Request on validation failure and 409 Conflict for a
/// duplicate email.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state.user_service.create(payload.into_new_user()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Updates a user.
///
/// # Endpoint
///
/// `PUT /api/users/{id}`
///
/// Fields absent from the body are left unchanged. The fresh value is
/// written through to the cache, so an immediate retrieve observes it.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let user = state.user_service.update(id, payload.into_patch()).await?;
    Ok(Json(user.into()))
}

/// Deletes a user.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
///
/// Evicts both user cache keys after the delete commits; passenger keys
/// are never touched.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

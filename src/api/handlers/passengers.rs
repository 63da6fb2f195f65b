//! Handlers for passenger CRUD endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::passenger::{
    CreatePassengerRequest, PassengerResponse, UpdatePassengerRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all passengers with their resolved users.
///
/// # Endpoint
///
/// `GET /api/passengers`
pub async fn list_passengers_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PassengerResponse>>, AppError> {
    let passengers = state.passenger_service.list().await?;
    Ok(Json(
        passengers.into_iter().map(PassengerResponse::from).collect(),
    ))
}

/// Retrieves a single passenger.
///
/// # Endpoint
///
/// `GET /api/passengers/{id}`
pub async fn get_passenger_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PassengerResponse>, AppError> {
    let passenger = state.passenger_service.get(id).await?;
    Ok(Json(passenger.into()))
}

/// Creates a passenger profile for an existing passenger-type user.
///
/// # Endpoint
///
/// `POST /api/passengers`
///
/// # Errors
///
/// Returns 400 Bad Request if the referenced user does not exist or is not
/// a passenger account, and 409 Conflict if the user already has a
/// profile.
pub async fn create_passenger_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreatePassengerRequest>,
) -> Result<(StatusCode, Json<PassengerResponse>), AppError> {
    payload.validate()?;

    let passenger = state
        .passenger_service
        .create(payload.into_new_passenger())
        .await?;
    Ok((StatusCode::CREATED, Json(passenger.into())))
}

/// Updates a passenger profile.
///
/// # Endpoint
///
/// `PUT /api/passengers/{id}`
pub async fn update_passenger_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePassengerRequest>,
) -> Result<Json<PassengerResponse>, AppError> {
    payload.validate()?;

    let passenger = state
        .passenger_service
        .update(id, payload.into_patch())
        .await?;
    Ok(Json(passenger.into()))
}

/// Deletes a passenger profile.
///
/// # Endpoint
///
/// `DELETE /api/passengers/{id}`
///
/// Evicts only `passenger_*` cache keys; the cached user entries for the
/// profile's owner are deliberately left alone.
pub async fn delete_passenger_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.passenger_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

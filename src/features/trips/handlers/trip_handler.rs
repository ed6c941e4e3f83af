use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::trips::dtos::{
    CreateTripDto, DeleteTripResponseDto, TripResponseDto, UpdateTripDto,
};
use crate::features::trips::services::TripService;
use crate::shared::types::{ApiResponse, Meta};

/// List the user's trips
#[utoipa::path(
    get,
    path = "/api/trips",
    responses(
        (status = 200, description = "List of the user's trips", body = ApiResponse<Vec<TripResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "trips"
)]
pub async fn list_trips(
    user: AuthenticatedUser,
    State(service): State<Arc<TripService>>,
) -> Result<Json<ApiResponse<Vec<TripResponseDto>>>> {
    let trips = service.list_by_user(&user.sub).await?;
    let meta = Meta {
        total: trips.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(trips), None, Some(meta))))
}

/// Get a trip by ID
#[utoipa::path(
    get,
    path = "/api/trips/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip found", body = ApiResponse<TripResponseDto>),
        (status = 404, description = "Trip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "trips"
)]
pub async fn get_trip(
    user: AuthenticatedUser,
    State(service): State<Arc<TripService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TripResponseDto>>> {
    let trip = service.get_by_id(id, &user.sub).await?;
    Ok(Json(ApiResponse::success(Some(trip), None, None)))
}

/// Create a new trip
#[utoipa::path(
    post,
    path = "/api/trips",
    request_body = CreateTripDto,
    responses(
        (status = 201, description = "Trip created", body = ApiResponse<TripResponseDto>),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "trips"
)]
pub async fn create_trip(
    user: AuthenticatedUser,
    State(service): State<Arc<TripService>>,
    AppJson(dto): AppJson<CreateTripDto>,
) -> Result<(StatusCode, Json<ApiResponse<TripResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let trip = service.create(&user.sub, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(trip), None, None)),
    ))
}

/// Partially update a trip
#[utoipa::path(
    patch,
    path = "/api/trips/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    request_body = UpdateTripDto,
    responses(
        (status = 200, description = "Trip updated", body = ApiResponse<TripResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Trip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "trips"
)]
pub async fn update_trip(
    user: AuthenticatedUser,
    State(service): State<Arc<TripService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateTripDto>,
) -> Result<Json<ApiResponse<TripResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let trip = service.update(id, &user.sub, dto).await?;
    Ok(Json(ApiResponse::success(Some(trip), None, None)))
}

/// Delete a trip and all of its check-ins
#[utoipa::path(
    delete,
    path = "/api/trips/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip deleted", body = ApiResponse<DeleteTripResponseDto>),
        (status = 404, description = "Trip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "trips"
)]
pub async fn delete_trip(
    user: AuthenticatedUser,
    State(service): State<Arc<TripService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteTripResponseDto>>> {
    service.delete(id, &user.sub).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteTripResponseDto { deleted: true }),
        Some("Trip deleted successfully".to_string()),
        None,
    )))
}

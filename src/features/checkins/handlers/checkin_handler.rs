use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::checkins::dtos::{
    CheckinResponseDto, CreateCheckinDto, DeleteCheckinResponseDto, DistanceQuery,
    DistanceResponseDto, ListCheckinsQuery, TripPathDto, UpdateCheckinDto,
};
use crate::features::checkins::services::CheckinService;
use crate::shared::geo::{distance_km, is_valid_gps, PhotoLocation};
use crate::shared::types::{ApiResponse, Meta};

/// List the user's check-ins, most recent first
#[utoipa::path(
    get,
    path = "/api/checkins",
    params(ListCheckinsQuery),
    responses(
        (status = 200, description = "List of check-ins, most recent first", body = ApiResponse<Vec<CheckinResponseDto>>),
        (status = 404, description = "Trip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "checkins"
)]
pub async fn list_checkins(
    user: AuthenticatedUser,
    State(service): State<Arc<CheckinService>>,
    Query(query): Query<ListCheckinsQuery>,
) -> Result<Json<ApiResponse<Vec<CheckinResponseDto>>>> {
    let checkins = service.list(&user.sub, query.trip_id).await?;
    let meta = Meta {
        total: checkins.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(checkins), None, Some(meta))))
}

/// Create a new check-in
#[utoipa::path(
    post,
    path = "/api/checkins",
    request_body = CreateCheckinDto,
    responses(
        (status = 201, description = "Check-in created", body = ApiResponse<CheckinResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Trip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "checkins"
)]
pub async fn create_checkin(
    user: AuthenticatedUser,
    State(service): State<Arc<CheckinService>>,
    AppJson(dto): AppJson<CreateCheckinDto>,
) -> Result<(StatusCode, Json<ApiResponse<CheckinResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let checkin = service.create(&user.sub, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(checkin), None, None)),
    ))
}

/// Partially update a check-in
#[utoipa::path(
    patch,
    path = "/api/checkins/{id}",
    params(
        ("id" = Uuid, Path, description = "Check-in ID")
    ),
    request_body = UpdateCheckinDto,
    responses(
        (status = 200, description = "Check-in updated", body = ApiResponse<CheckinResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Check-in not found")
    ),
    security(("bearer_auth" = [])),
    tag = "checkins"
)]
pub async fn update_checkin(
    user: AuthenticatedUser,
    State(service): State<Arc<CheckinService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCheckinDto>,
) -> Result<Json<ApiResponse<CheckinResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let checkin = service.update(id, &user.sub, dto).await?;
    Ok(Json(ApiResponse::success(Some(checkin), None, None)))
}

/// Delete a check-in
#[utoipa::path(
    delete,
    path = "/api/checkins/{id}",
    params(
        ("id" = Uuid, Path, description = "Check-in ID")
    ),
    responses(
        (status = 200, description = "Check-in deleted", body = ApiResponse<DeleteCheckinResponseDto>),
        (status = 404, description = "Check-in not found")
    ),
    security(("bearer_auth" = [])),
    tag = "checkins"
)]
pub async fn delete_checkin(
    user: AuthenticatedUser,
    State(service): State<Arc<CheckinService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteCheckinResponseDto>>> {
    service.delete(id, &user.sub).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteCheckinResponseDto { deleted: true }),
        Some("Check-in deleted successfully".to_string()),
        None,
    )))
}

/// Great-circle distance between two coordinates in kilometers
#[utoipa::path(
    get,
    path = "/api/checkins/distance",
    params(DistanceQuery),
    responses(
        (status = 200, description = "Distance in kilometers", body = ApiResponse<DistanceResponseDto>),
        (status = 400, description = "Coordinates out of range")
    ),
    security(("bearer_auth" = [])),
    tag = "checkins"
)]
pub async fn distance_between(
    _user: AuthenticatedUser,
    Query(query): Query<DistanceQuery>,
) -> Result<Json<ApiResponse<DistanceResponseDto>>> {
    let from = PhotoLocation::new(query.from_latitude, query.from_longitude);
    let to = PhotoLocation::new(query.to_latitude, query.to_longitude);

    if !is_valid_gps(Some(&from)) || !is_valid_gps(Some(&to)) {
        return Err(AppError::Validation(
            "Coordinates out of range".to_string(),
        ));
    }

    let distance = DistanceResponseDto {
        distance_km: distance_km(&from, &to),
    };
    Ok(Json(ApiResponse::success(Some(distance), None, None)))
}

/// Get a trip's path: ordered points plus total distance traveled
#[utoipa::path(
    get,
    path = "/api/trips/{id}/path",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip path", body = ApiResponse<TripPathDto>),
        (status = 404, description = "Trip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "checkins"
)]
pub async fn get_trip_path(
    user: AuthenticatedUser,
    State(service): State<Arc<CheckinService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TripPathDto>>> {
    let path = service.trip_path(id, &user.sub).await?;
    Ok(Json(ApiResponse::success(Some(path), None, None)))
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::Value;

    use super::*;
    use crate::shared::test_helpers::with_test_auth;

    fn distance_router() -> Router {
        with_test_auth(Router::new().route("/api/checkins/distance", get(distance_between)))
    }

    #[tokio::test]
    async fn distance_endpoint_returns_seoul_busan_distance() {
        let server = TestServer::new(distance_router()).unwrap();

        let response = server
            .get("/api/checkins/distance")
            .add_query_param("fromLatitude", 37.5665)
            .add_query_param("fromLongitude", 126.9780)
            .add_query_param("toLatitude", 35.1796)
            .add_query_param("toLongitude", 129.0756)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let km = body["data"]["distanceKm"].as_f64().unwrap();
        assert!(km > 320.0 && km < 330.0, "unexpected distance: {km}");
    }

    #[tokio::test]
    async fn distance_endpoint_rejects_out_of_range_coordinates() {
        let server = TestServer::new(distance_router()).unwrap();

        let response = server
            .get("/api/checkins/distance")
            .add_query_param("fromLatitude", 91.0)
            .add_query_param("fromLongitude", 0.0)
            .add_query_param("toLatitude", 0.0)
            .add_query_param("toLongitude", 0.0)
            .await;

        response.assert_status_bad_request();
    }
}

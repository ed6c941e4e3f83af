use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::places::dtos::{
    AutocompleteQuery, DetailsQuery, NearbyQuery, PlaceDetailsDto, PlaceSummaryDto, PredictionDto,
};
use crate::features::places::services::PlaceService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::PLACE_TYPE_FILTER_REGEX;

/// Search for places near a coordinate
#[utoipa::path(
    get,
    path = "/api/places/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Places near the coordinate", body = ApiResponse<Vec<PlaceSummaryDto>>),
        (status = 400, description = "Invalid coordinates or type filter"),
        (status = 502, description = "Places API unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "places"
)]
pub async fn nearby_places(
    _user: AuthenticatedUser,
    State(service): State<Arc<PlaceService>>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<Vec<PlaceSummaryDto>>>> {
    if !(-90.0..=90.0).contains(&query.latitude) || !(-180.0..=180.0).contains(&query.longitude) {
        return Err(AppError::Validation(
            "Coordinates out of range".to_string(),
        ));
    }
    if let Some(types) = &query.types {
        if !PLACE_TYPE_FILTER_REGEX.is_match(types) {
            return Err(AppError::Validation(
                "Invalid place type filter".to_string(),
            ));
        }
    }

    let places = service
        .nearby(query.latitude, query.longitude, query.types.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(Some(places), None, None)))
}

/// Get place name predictions for a partial input
#[utoipa::path(
    get,
    path = "/api/places/autocomplete",
    params(AutocompleteQuery),
    responses(
        (status = 200, description = "Place name predictions", body = ApiResponse<Vec<PredictionDto>>),
        (status = 502, description = "Places API unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "places"
)]
pub async fn autocomplete_places(
    _user: AuthenticatedUser,
    State(service): State<Arc<PlaceService>>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<ApiResponse<Vec<PredictionDto>>>> {
    let predictions = service.autocomplete(&query.input).await?;
    Ok(Json(ApiResponse::success(Some(predictions), None, None)))
}

/// Get details of a single place
#[utoipa::path(
    get,
    path = "/api/places/details",
    params(DetailsQuery),
    responses(
        (status = 200, description = "Place details", body = ApiResponse<PlaceDetailsDto>),
        (status = 404, description = "Place not found"),
        (status = 502, description = "Places API unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "places"
)]
pub async fn place_details(
    _user: AuthenticatedUser,
    State(service): State<Arc<PlaceService>>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<ApiResponse<PlaceDetailsDto>>> {
    let details = service.details(&query.place_id).await?;
    Ok(Json(ApiResponse::success(Some(details), None, None)))
}

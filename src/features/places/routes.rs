use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::places::handlers;
use crate::features::places::services::PlaceService;

/// Create routes for the places feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<PlaceService>) -> Router {
    Router::new()
        .route("/api/places/nearby", get(handlers::nearby_places))
        .route(
            "/api/places/autocomplete",
            get(handlers::autocomplete_places),
        )
        .route("/api/places/details", get(handlers::place_details))
        .with_state(service)
}

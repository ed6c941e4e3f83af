use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::checkins::handlers;
use crate::features::checkins::services::CheckinService;

/// Create routes for the check-ins feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<CheckinService>) -> Router {
    Router::new()
        .route(
            "/api/checkins",
            get(handlers::list_checkins).post(handlers::create_checkin),
        )
        .route("/api/checkins/distance", get(handlers::distance_between))
        .route(
            "/api/checkins/{id}",
            patch(handlers::update_checkin).delete(handlers::delete_checkin),
        )
        .route("/api/trips/{id}/path", get(handlers::get_trip_path))
        .with_state(service)
}

use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::trips::handlers;
use crate::features::trips::services::TripService;

/// Create routes for the trips feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<TripService>) -> Router {
    Router::new()
        .route(
            "/api/trips",
            get(handlers::list_trips).post(handlers::create_trip),
        )
        .route(
            "/api/trips/{id}",
            patch(handlers::update_trip)
                .get(handlers::get_trip)
                .delete(handlers::delete_trip),
        )
        .with_state(service)
}

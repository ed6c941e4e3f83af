use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::features::photos::dtos::MAX_PHOTO_SIZE;
use crate::features::photos::handlers::{delete_photo_by_url, upload_photo};
use crate::features::photos::services::PhotoService;

/// Create routes for the photos feature
pub fn routes(photo_service: Arc<PhotoService>) -> Router {
    Router::new()
        .route(
            "/api/photos/upload",
            // Allow body size up to MAX_PHOTO_SIZE + buffer for multipart overhead
            post(upload_photo).layer(DefaultBodyLimit::max(MAX_PHOTO_SIZE + 1024 * 1024)),
        )
        .route("/api/photos", delete(delete_photo_by_url))
        .with_state(photo_service)
}

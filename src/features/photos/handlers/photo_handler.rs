use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::photos::dtos::{
    is_image_type_allowed, DeletePhotoByUrlDto, DeletePhotoResponseDto, PhotoResponseDto,
    UploadPhotoDto, ALLOWED_IMAGE_TYPES, MAX_PHOTO_SIZE,
};
use crate::features::photos::services::PhotoService;
use crate::shared::types::ApiResponse;

/// Upload a photo
///
/// Accepts multipart/form-data with a single `file` field. The response
/// carries the stored photo's URL and the EXIF metadata extracted from
/// it, including GPS position and capture time when the photo has them.
#[utoipa::path(
    post,
    path = "/api/photos/upload",
    tag = "photos",
    request_body(
        content = UploadPhotoDto,
        content_type = "multipart/form-data",
        description = "Photo upload form",
    ),
    responses(
        (status = 201, description = "Photo uploaded", body = ApiResponse<PhotoResponseDto>),
        (status = 400, description = "Invalid file or validation error"),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "Photo too large")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_photo(
    user: AuthenticatedUser,
    State(service): State<Arc<PhotoService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PhotoResponseDto>>), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    if file_data.len() > MAX_PHOTO_SIZE {
        return Err(AppError::BadRequest(format!(
            "Photo too large. Maximum size is {} bytes ({} MB)",
            MAX_PHOTO_SIZE,
            MAX_PHOTO_SIZE / 1024 / 1024
        )));
    }

    if !is_image_type_allowed(&content_type) {
        return Err(AppError::BadRequest(format!(
            "File type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_IMAGE_TYPES.join(", ")
        )));
    }

    let response = service
        .upload_photo(file_data, &file_name, &content_type, &user.sub)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}

/// Delete a photo by its URL
///
/// Only the user who uploaded the photo can delete it.
#[utoipa::path(
    delete,
    path = "/api/photos",
    tag = "photos",
    request_body = DeletePhotoByUrlDto,
    responses(
        (status = 200, description = "Photo deleted", body = ApiResponse<DeletePhotoResponseDto>),
        (status = 400, description = "Invalid URL"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not authorized to delete this photo")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_photo_by_url(
    user: AuthenticatedUser,
    State(service): State<Arc<PhotoService>>,
    Json(dto): Json<DeletePhotoByUrlDto>,
) -> Result<Json<ApiResponse<DeletePhotoResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.delete_by_url(&dto.url, &user.sub).await?;

    Ok(Json(ApiResponse::success(
        Some(DeletePhotoResponseDto { deleted: true }),
        Some("Photo deleted successfully".to_string()),
        None,
    )))
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::geo::exif::PhotoMetadata;

/// Upload photo request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadPhotoDto {
    /// The photo to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Response DTO for photo uploads
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponseDto {
    /// Public URL of the uploaded photo
    pub url: String,
    /// EXIF metadata extracted from the photo
    pub metadata: PhotoMetadata,
}

/// Request DTO for deleting a photo by URL
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeletePhotoByUrlDto {
    /// The URL of the photo to delete
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletePhotoResponseDto {
    /// Confirmation that the photo was deleted
    pub deleted: bool,
}

/// Allowed MIME types for photo uploads
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum photo size in bytes (10MB)
pub const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024;

/// Check if a MIME type is an allowed image type
pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// Get file extension from content type
pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_types_allowed() {
        assert!(is_image_type_allowed("image/jpeg"));
        assert!(is_image_type_allowed("image/webp"));
        assert!(!is_image_type_allowed("application/pdf"));
        assert!(!is_image_type_allowed("text/html"));
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(get_extension_from_content_type("image/jpeg"), Some("jpg"));
        assert_eq!(get_extension_from_content_type("image/png"), Some("png"));
        assert_eq!(get_extension_from_content_type("video/mp4"), None);
    }
}

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::photos::dtos::{get_extension_from_content_type, PhotoResponseDto};
use crate::modules::storage::{ObjectVisibility, StorageClient};
use crate::shared::geo::exif::extract_photo_metadata;

/// Service for photo uploads
///
/// Photos live in object storage only. The check-in row stores the
/// returned URL and metadata.
pub struct PhotoService {
    storage: Arc<StorageClient>,
}

impl PhotoService {
    pub fn new(storage: Arc<StorageClient>) -> Self {
        Self { storage }
    }

    /// Upload a photo and extract its EXIF metadata
    pub async fn upload_photo(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
        user_id: &str,
    ) -> Result<PhotoResponseDto> {
        let extension = get_extension_from_content_type(content_type)
            .unwrap_or_else(|| original_filename.rsplit('.').next().unwrap_or("jpg"));

        let photo_id = Uuid::new_v4();
        let path = format!("photos/{}/{}.{}", user_id, photo_id, extension);
        let photo_key = self.storage.generate_key(ObjectVisibility::Public, &path);

        // EXIF parsing is CPU-bound, keep it off the async runtime. The
        // buffer moves into the task and comes back for the upload.
        let (metadata, data) = tokio::task::spawn_blocking(move || {
            let metadata = extract_photo_metadata(&data);
            (metadata, data)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Metadata extraction task failed: {}", e)))?;

        self.storage.upload(&photo_key, data, content_type).await?;

        debug!("Photo stored at {}", photo_key);

        let url = self.storage.get_file_url(&photo_key);

        info!(
            "Photo uploaded: key={}, user={}, gps={}",
            photo_key,
            user_id,
            metadata.gps.is_some()
        );

        Ok(PhotoResponseDto { url, metadata })
    }

    /// Delete a photo by its URL
    ///
    /// Only the user who uploaded the photo can delete it. Ownership is
    /// derived from the key layout `{prefix}/photos/{user_id}/{file}`.
    pub async fn delete_by_url(&self, url: &str, user_id: &str) -> Result<()> {
        let key = self
            .storage
            .extract_key_from_url(url)
            .ok_or_else(|| AppError::BadRequest("URL does not reference a photo".to_string()))?;

        if !Self::is_owned_by(&key, user_id) {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this photo".to_string(),
            ));
        }

        self.storage.delete(&key).await?;

        info!("Photo deleted: key={}, user={}", key, user_id);

        Ok(())
    }

    fn is_owned_by(key: &str, user_id: &str) -> bool {
        let mut segments = key.split('/');
        // {visibility}/photos/{user_id}/{file}
        segments.next();
        segments.next() == Some("photos") && segments.next() == Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_derived_from_key_layout() {
        assert!(PhotoService::is_owned_by(
            "public/photos/user-1/abc.jpg",
            "user-1"
        ));
        assert!(!PhotoService::is_owned_by(
            "public/photos/user-1/abc.jpg",
            "user-2"
        ));
        assert!(!PhotoService::is_owned_by("public/uploads/user-1/abc.jpg", "user-1"));
        assert!(!PhotoService::is_owned_by("garbage", "user-1"));
    }
}

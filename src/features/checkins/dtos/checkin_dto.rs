use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Request DTO for creating a check-in
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckinDto {
    /// Trip this check-in belongs to
    pub trip_id: Uuid,

    #[validate(length(max = 255, message = "Location name must not exceed 255 characters"))]
    pub location_name: Option<String>,

    #[validate(length(max = 2000, message = "Message must not exceed 2000 characters"))]
    pub message: Option<String>,

    /// Category, one of the known check-in categories
    pub category: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    /// URL of an uploaded photo
    pub photo_url: Option<String>,

    /// EXIF metadata extracted from the photo at upload time
    #[schema(value_type = Object)]
    pub photo_metadata: Option<serde_json::Value>,

    /// When the check-in happened (defaults to now)
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Request DTO for partially updating a check-in
///
/// Fields left out of the request keep their current values. Latitude
/// and longitude must be updated together.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheckinDto {
    #[validate(length(max = 255, message = "Location name must not exceed 255 characters"))]
    pub location_name: Option<String>,

    #[validate(length(max = 2000, message = "Message must not exceed 2000 characters"))]
    pub message: Option<String>,

    pub category: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,

    pub photo_url: Option<String>,

    #[schema(value_type = Object)]
    pub photo_metadata: Option<serde_json::Value>,

    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Response DTO for a check-in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponseDto {
    pub id: Uuid,
    pub trip_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub photo_metadata: Option<serde_json::Value>,
    pub checked_in_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing check-ins
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListCheckinsQuery {
    /// Restrict the listing to one trip
    pub trip_id: Option<Uuid>,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteCheckinResponseDto {
    /// Confirmation that the check-in was deleted
    pub deleted: bool,
}

/// Query parameters for the distance endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DistanceQuery {
    pub from_latitude: f64,
    pub from_longitude: f64,
    pub to_latitude: f64,
    pub to_longitude: f64,
}

/// Response DTO for the distance endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResponseDto {
    pub distance_km: f64,
}

/// A single point on a trip's path
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PathPointDto {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    pub checked_in_at: DateTime<Utc>,
}

/// Response DTO for a trip's path
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripPathDto {
    /// Check-in points in chronological order
    pub points: Vec<PathPointDto>,
    /// Sum of leg distances between consecutive points, in kilometers
    pub total_distance_km: f64,
}

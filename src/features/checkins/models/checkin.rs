use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::checkins::dtos::CheckinResponseDto;

/// Database model for a check-in
#[derive(Debug, Clone, FromRow)]
pub struct Checkin {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub location_name: Option<String>,
    pub message: Option<String>,
    pub category: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub photo_url: Option<String>,
    pub photo_metadata: Option<serde_json::Value>,
    pub checked_in_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Checkin> for CheckinResponseDto {
    fn from(c: Checkin) -> Self {
        Self {
            id: c.id,
            trip_id: c.trip_id,
            location_name: c.location_name,
            message: c.message,
            category: c.category,
            latitude: c.latitude,
            longitude: c.longitude,
            photo_url: c.photo_url,
            photo_metadata: c.photo_metadata,
            checked_in_at: c.checked_in_at,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::trips::dtos::TripResponseDto;

/// Database model for a trip
#[derive(Debug, Clone, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Trip> for TripResponseDto {
    fn from(t: Trip) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            start_date: t.start_date,
            end_date: t.end_date,
            is_public: t.is_public,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::trips::dtos::{CreateTripDto, TripResponseDto, UpdateTripDto};
use crate::features::trips::models::Trip;

/// Service for trip operations
pub struct TripService {
    pool: PgPool,
}

impl TripService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the user's trips, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<TripResponseDto>> {
        let trips = sqlx::query_as::<_, Trip>(
            r#"
            SELECT id, user_id, title, description, start_date, end_date,
                   is_public, created_at, updated_at
            FROM trips
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list trips: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(trips.into_iter().map(|t| t.into()).collect())
    }

    /// Get a trip by ID
    pub async fn get_by_id(&self, id: Uuid, user_id: &str) -> Result<TripResponseDto> {
        self.fetch_owned(id, user_id).await.map(|t| t.into())
    }

    /// Create a new trip
    pub async fn create(&self, user_id: &str, dto: CreateTripDto) -> Result<TripResponseDto> {
        let title = dto.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Title must not be blank".to_string()));
        }
        let description = dto.description.as_deref().map(str::trim);
        validate_date_range(dto.start_date, dto.end_date)?;

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (user_id, title, description, start_date, end_date, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, description, start_date, end_date,
                      is_public, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.is_public.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create trip: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Trip created: id={}, user={}", trip.id, user_id);

        Ok(trip.into())
    }

    /// Partially update a trip; omitted fields keep their current values
    pub async fn update(
        &self,
        id: Uuid,
        user_id: &str,
        dto: UpdateTripDto,
    ) -> Result<TripResponseDto> {
        let current = self.fetch_owned(id, user_id).await?;

        let title = match &dto.title {
            Some(t) => {
                let trimmed = t.trim();
                if trimmed.is_empty() {
                    return Err(AppError::Validation("Title must not be blank".to_string()));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        let description = dto.description.as_deref().map(str::trim);

        let start_date = dto.start_date.or(current.start_date);
        let end_date = dto.end_date.or(current.end_date);
        validate_date_range(start_date, end_date)?;

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                is_public = COALESCE($7, is_public),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, start_date, end_date,
                      is_public, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.is_public)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update trip: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Trip updated: id={}, user={}", trip.id, user_id);

        Ok(trip.into())
    }

    /// Delete a trip; its check-ins are removed by the foreign key cascade
    pub async fn delete(&self, id: Uuid, user_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete trip: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Trip '{}' not found", id)));
        }

        tracing::info!("Trip deleted: id={}, user={}", id, user_id);

        Ok(())
    }

    async fn fetch_owned(&self, id: Uuid, user_id: &str) -> Result<Trip> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            SELECT id, user_id, title, description, start_date, end_date,
                   is_public, created_at, updated_at
            FROM trips
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get trip by ID: {:?}", e);
            AppError::Database(e)
        })?;

        trip.ok_or_else(|| AppError::NotFound(format!("Trip '{}' not found", id)))
    }
}

fn validate_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(AppError::Validation(
                "End date must not be before start date".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_accepts_open_and_ordered_ranges() {
        let d1 = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        assert!(validate_date_range(None, None).is_ok());
        assert!(validate_date_range(Some(d1), None).is_ok());
        assert!(validate_date_range(None, Some(d2)).is_ok());
        assert!(validate_date_range(Some(d1), Some(d2)).is_ok());
        assert!(validate_date_range(Some(d1), Some(d1)).is_ok());
    }

    #[test]
    fn date_range_rejects_end_before_start() {
        let d1 = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        assert!(validate_date_range(Some(d2), Some(d1)).is_err());
    }
}

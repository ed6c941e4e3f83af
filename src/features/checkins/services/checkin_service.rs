use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::checkins::dtos::{
    CheckinResponseDto, CreateCheckinDto, PathPointDto, TripPathDto, UpdateCheckinDto,
};
use crate::features::checkins::models::Checkin;
use crate::shared::constants::is_known_category;
use crate::shared::geo::{path_length_km, PhotoLocation};

const CHECKIN_COLUMNS: &str = r#"
    id, trip_id, location_name, message, category, latitude, longitude,
    photo_url, photo_metadata, checked_in_at, created_at, updated_at
"#;

/// Service for check-in operations
pub struct CheckinService {
    pool: PgPool,
}

impl CheckinService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the user's check-ins, most recent first, optionally filtered
    /// to a single trip
    pub async fn list(
        &self,
        user_id: &str,
        trip_id: Option<Uuid>,
    ) -> Result<Vec<CheckinResponseDto>> {
        if let Some(trip_id) = trip_id {
            self.verify_trip_ownership(trip_id, user_id).await?;
        }

        let checkins = sqlx::query_as::<_, Checkin>(&format!(
            r#"
            SELECT {CHECKIN_COLUMNS}
            FROM checkins
            WHERE trip_id IN (SELECT id FROM trips WHERE user_id = $1)
              AND ($2::uuid IS NULL OR trip_id = $2)
            ORDER BY checked_in_at DESC
            "#
        ))
        .bind(user_id)
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list check-ins: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(checkins.into_iter().map(|c| c.into()).collect())
    }

    /// Create a new check-in on one of the user's trips
    pub async fn create(&self, user_id: &str, dto: CreateCheckinDto) -> Result<CheckinResponseDto> {
        self.verify_trip_ownership(dto.trip_id, user_id).await?;
        validate_category(dto.category.as_deref())?;

        let checked_in_at = dto.checked_in_at.unwrap_or_else(Utc::now);
        let location_name = dto.location_name.as_deref().map(str::trim);
        let message = dto.message.as_deref().map(str::trim);

        let checkin = sqlx::query_as::<_, Checkin>(&format!(
            r#"
            INSERT INTO checkins (
                trip_id, location_name, message, category, latitude, longitude,
                photo_url, photo_metadata, checked_in_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {CHECKIN_COLUMNS}
            "#
        ))
        .bind(dto.trip_id)
        .bind(location_name)
        .bind(message)
        .bind(&dto.category)
        .bind(dto.latitude)
        .bind(dto.longitude)
        .bind(&dto.photo_url)
        .bind(&dto.photo_metadata)
        .bind(checked_in_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create check-in: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Check-in created: id={}, trip={}, user={}",
            checkin.id,
            dto.trip_id,
            user_id
        );

        Ok(checkin.into())
    }

    /// Partially update a check-in; omitted fields keep their current values
    pub async fn update(
        &self,
        id: Uuid,
        user_id: &str,
        dto: UpdateCheckinDto,
    ) -> Result<CheckinResponseDto> {
        // Coordinates describe one point, so a partial update of only
        // one axis is rejected
        if dto.latitude.is_some() != dto.longitude.is_some() {
            return Err(AppError::Validation(
                "Latitude and longitude must be updated together".to_string(),
            ));
        }
        validate_category(dto.category.as_deref())?;

        let location_name = dto.location_name.as_deref().map(str::trim);
        let message = dto.message.as_deref().map(str::trim);

        let checkin = sqlx::query_as::<_, Checkin>(&format!(
            r#"
            UPDATE checkins
            SET location_name = COALESCE($3, location_name),
                message = COALESCE($4, message),
                category = COALESCE($5, category),
                latitude = COALESCE($6, latitude),
                longitude = COALESCE($7, longitude),
                photo_url = COALESCE($8, photo_url),
                photo_metadata = COALESCE($9, photo_metadata),
                checked_in_at = COALESCE($10, checked_in_at),
                updated_at = NOW()
            WHERE id = $1
              AND trip_id IN (SELECT id FROM trips WHERE user_id = $2)
            RETURNING {CHECKIN_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(location_name)
        .bind(message)
        .bind(&dto.category)
        .bind(dto.latitude)
        .bind(dto.longitude)
        .bind(&dto.photo_url)
        .bind(&dto.photo_metadata)
        .bind(dto.checked_in_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update check-in: {:?}", e);
            AppError::Database(e)
        })?;

        let checkin = checkin
            .ok_or_else(|| AppError::NotFound(format!("Check-in '{}' not found", id)))?;

        tracing::info!("Check-in updated: id={}, user={}", id, user_id);

        Ok(checkin.into())
    }

    /// Delete a check-in
    pub async fn delete(&self, id: Uuid, user_id: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM checkins
            WHERE id = $1
              AND trip_id IN (SELECT id FROM trips WHERE user_id = $2)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete check-in: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Check-in '{}' not found", id)));
        }

        tracing::info!("Check-in deleted: id={}, user={}", id, user_id);

        Ok(())
    }

    /// Get a trip's path: check-in points in chronological order plus
    /// the total distance traveled between consecutive points
    pub async fn trip_path(&self, trip_id: Uuid, user_id: &str) -> Result<TripPathDto> {
        self.verify_trip_ownership(trip_id, user_id).await?;

        let checkins = sqlx::query_as::<_, Checkin>(&format!(
            r#"
            SELECT {CHECKIN_COLUMNS}
            FROM checkins
            WHERE trip_id = $1
            ORDER BY checked_in_at ASC
            "#
        ))
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load trip path: {:?}", e);
            AppError::Database(e)
        })?;

        let locations: Vec<PhotoLocation> = checkins
            .iter()
            .map(|c| PhotoLocation::new(c.latitude, c.longitude))
            .collect();
        let total_distance_km = path_length_km(&locations);

        let points = checkins
            .into_iter()
            .map(|c| PathPointDto {
                id: c.id,
                latitude: c.latitude,
                longitude: c.longitude,
                location_name: c.location_name,
                checked_in_at: c.checked_in_at,
            })
            .collect();

        Ok(TripPathDto {
            points,
            total_distance_km,
        })
    }

    async fn verify_trip_ownership(&self, trip_id: Uuid, user_id: &str) -> Result<()> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM trips WHERE id = $1 AND user_id = $2",
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check trip ownership: {:?}", e);
            AppError::Database(e)
        })?;

        if exists == 0 {
            return Err(AppError::NotFound(format!("Trip '{}' not found", trip_id)));
        }

        Ok(())
    }
}

fn validate_category(category: Option<&str>) -> Result<()> {
    if let Some(category) = category {
        if !is_known_category(category) {
            return Err(AppError::Validation(format!(
                "Unknown category '{}'",
                category
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_pass_validation() {
        assert!(validate_category(None).is_ok());
        assert!(validate_category(Some("restaurant")).is_ok());
        assert!(validate_category(Some("nature")).is_ok());
        assert!(validate_category(Some("other")).is_ok());
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(validate_category(Some("spaceport")).is_err());
        assert!(validate_category(Some("")).is_err());
        assert!(validate_category(Some("Restaurant")).is_err());
    }
}

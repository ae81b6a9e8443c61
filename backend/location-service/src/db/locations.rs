/// Location database operations
use super::LocationRepository;
use crate::error::Result;
use crate::models::Location;
use async_trait::async_trait;
use sqlx::PgPool;

const LOCATION_COLUMNS: &str = "id, user_id, longitude, latitude, comment, created_at, updated_at";

#[derive(Clone)]
pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn create(
        &self,
        user_id: i64,
        longitude: f64,
        latitude: f64,
        comment: Option<&str>,
    ) -> Result<Location> {
        let location = sqlx::query_as::<_, Location>(&format!(
            r#"
            INSERT INTO locations (user_id, longitude, latitude, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            LOCATION_COLUMNS
        ))
        .bind(user_id)
        .bind(longitude)
        .bind(latitude)
        .bind(comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE id = $1",
            LOCATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE user_id = $1 ORDER BY id",
            LOCATION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    async fn update(
        &self,
        id: i64,
        longitude: f64,
        latitude: f64,
        comment: Option<&str>,
    ) -> Result<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(&format!(
            r#"
            UPDATE locations
            SET longitude = $2, latitude = $3, comment = $4, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {}
            "#,
            LOCATION_COLUMNS
        ))
        .bind(id)
        .bind(longitude)
        .bind(latitude)
        .bind(comment)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    async fn delete(&self, id: i64) -> Result<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(&format!(
            "DELETE FROM locations WHERE id = $1 RETURNING {}",
            LOCATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }
}

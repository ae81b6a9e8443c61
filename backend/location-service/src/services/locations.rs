/// Location CRUD scoped to the authenticated user
use crate::db::LocationRepository;
use crate::error::{AppError, Result};
use crate::models::Location;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct LocationService {
    repo: Arc<dyn LocationRepository>,
    enforce_ownership: bool,
}

impl LocationService {
    pub fn new(repo: Arc<dyn LocationRepository>, enforce_ownership: bool) -> Self {
        Self {
            repo,
            enforce_ownership,
        }
    }

    pub async fn create(
        &self,
        user_id: i64,
        longitude: f64,
        latitude: f64,
        comment: Option<&str>,
    ) -> Result<Location> {
        let location = self.repo.create(user_id, longitude, latitude, comment).await?;
        debug!(user_id, location_id = location.id, "Location created");
        Ok(location)
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Location>> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn update(
        &self,
        caller_id: i64,
        location_id: i64,
        longitude: f64,
        latitude: f64,
        comment: Option<&str>,
    ) -> Result<Location> {
        self.authorize(caller_id, location_id).await?;

        let location = self
            .repo
            .update(location_id, longitude, latitude, comment)
            .await?
            .ok_or_else(|| not_found(location_id))?;
        debug!(user_id = caller_id, location_id, "Location updated");
        Ok(location)
    }

    /// Delete a location and return the removed record
    pub async fn delete(&self, caller_id: i64, location_id: i64) -> Result<Location> {
        self.authorize(caller_id, location_id).await?;

        let location = self
            .repo
            .delete(location_id)
            .await?
            .ok_or_else(|| not_found(location_id))?;
        debug!(user_id = caller_id, location_id, "Location deleted");
        Ok(location)
    }

    /// Another user's location is reported as missing
    async fn authorize(&self, caller_id: i64, location_id: i64) -> Result<()> {
        if !self.enforce_ownership {
            return Ok(());
        }

        match self.repo.find_by_id(location_id).await? {
            Some(location) if location.user_id == caller_id => Ok(()),
            Some(location) => {
                warn!(
                    user_id = caller_id,
                    owner_id = location.user_id,
                    location_id,
                    "Rejected access to foreign location"
                );
                Err(not_found(location_id))
            }
            None => Err(not_found(location_id)),
        }
    }
}

fn not_found(location_id: i64) -> AppError {
    AppError::NotFound(format!("Location {} doesnt exist", location_id))
}

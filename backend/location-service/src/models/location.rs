/// Location entity and the request/response bodies of `/location`
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const MAX_COMMENT_LENGTH: u64 = 1024;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Location {
    pub id: i64,
    pub user_id: i64,
    pub longitude: f64,
    pub latitude: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be within [-180, 180]"))]
    pub lon: f64,

    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be within [-90, 90]"))]
    pub lat: f64,

    #[validate(length(max = 1024, message = "comments must be at most 1024 characters"))]
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    pub location_id: i64,

    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be within [-180, 180]"))]
    pub lon: f64,

    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be within [-90, 90]"))]
    pub lat: f64,

    #[validate(length(max = 1024, message = "comments must be at most 1024 characters"))]
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteLocationRequest {
    pub location_id: i64,
}

/// Wire form of a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub location_id: i64,
    pub lon: f64,
    pub lat: f64,
    pub comments: Option<String>,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            location_id: location.id,
            lon: location.longitude,
            lat: location.latitude,
            comments: location.comment,
        }
    }
}

/// User entity and the request/response bodies of the auth endpoints
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `/signup` and `/login`
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, max = 255, message = "This field cannot be blank"))]
    pub username: String,

    #[validate(length(min = 1, message = "This field cannot be blank"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub msg: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Identity behind the presented access token
#[derive(Debug, Serialize, Deserialize)]
pub struct SecretResponse {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for SecretResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credentials_rejected() {
        let req = CredentialsRequest {
            username: String::new(),
            password: "pw1".to_string(),
        };
        assert!(req.validate().is_err());

        let req = CredentialsRequest {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_short_password_accepted() {
        let req = CredentialsRequest {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}

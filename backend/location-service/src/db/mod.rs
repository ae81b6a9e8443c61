/// Persistence layer
///
/// Entities in `models` are plain data; the traits here own how they are
/// stored. Services depend on the traits so they can run against PostgreSQL
/// in production and in-memory stores in unit tests.
use crate::error::Result;
use crate::models::{Location, User};
use async_trait::async_trait;
use crypto_core::TokenKind;

pub mod locations;
pub mod token_revocation;
pub mod users;

#[cfg(test)]
pub mod memory;

pub use locations::PgLocationRepository;
pub use token_revocation::PgRevocationLedger;
pub use users::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken username surfaces as `AppError::Conflict`
    async fn create(&self, username: &str, password_hash: &str) -> Result<User>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(
        &self,
        user_id: i64,
        longitude: f64,
        latitude: f64,
        comment: Option<&str>,
    ) -> Result<Location>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>>;

    /// All locations of a user, ordered by id
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Location>>;

    /// Overwrite coordinates and comment; `None` if the id does not exist
    async fn update(
        &self,
        id: i64,
        longitude: f64,
        latitude: f64,
        comment: Option<&str>,
    ) -> Result<Option<Location>>;

    /// Remove and return the row; `None` if the id does not exist
    async fn delete(&self, id: i64) -> Result<Option<Location>>;
}

/// Append-only set of revoked token ids
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Record a jti as revoked; revoking the same jti twice is a no-op
    async fn revoke(&self, jti: &str, kind: TokenKind) -> Result<()>;

    async fn is_revoked(&self, jti: &str) -> Result<bool>;
}

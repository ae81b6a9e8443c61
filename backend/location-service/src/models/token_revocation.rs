/// Entry of the revocation ledger
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RevokedToken {
    pub id: i64,
    pub jti: String,
    pub token_type: String,
    pub revoked_at: DateTime<Utc>,
}

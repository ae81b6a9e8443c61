/// Token revocation database operations
use super::RevocationLedger;
use crate::error::Result;
use crate::models::RevokedToken;
use async_trait::async_trait;
use crypto_core::TokenKind;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgRevocationLedger {
    pool: PgPool,
}

impl PgRevocationLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ledger entry for a jti, if it was revoked
    pub async fn find_by_jti(&self, jti: &str) -> Result<Option<RevokedToken>> {
        let entry = sqlx::query_as::<_, RevokedToken>(
            "SELECT id, jti, token_type, revoked_at FROM revoked_tokens WHERE jti = $1",
        )
        .bind(jti)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }
}

#[async_trait]
impl RevocationLedger for PgRevocationLedger {
    async fn revoke(&self, jti: &str, kind: TokenKind) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (jti, token_type)
            VALUES ($1, $2)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .bind(kind.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)",
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await?;

        Ok(revoked)
    }
}

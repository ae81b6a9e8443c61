/// Authentication service
///
/// Owns the token lifecycle: credential checks, issuing access/refresh
/// pairs, validating presented tokens against the revocation ledger and
/// revoking them on logout.
use crate::db::{RevocationLedger, UserRepository};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::PasswordHasher;
use actix_middleware::{AuthRejection, TokenVerifier};
use async_trait::async_trait;
use crypto_core::{Claims, JwtCodec, TokenKind, TokenPair};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    ledger: Arc<dyn RevocationLedger>,
    hasher: PasswordHasher,
    codec: JwtCodec,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        ledger: Arc<dyn RevocationLedger>,
        hasher: PasswordHasher,
        codec: JwtCodec,
    ) -> Self {
        Self {
            users,
            ledger,
            hasher,
            codec,
        }
    }

    /// Register a new user
    ///
    /// The existence check gives a friendly error for the common case; a
    /// concurrent signup that loses at the unique constraint is also `Conflict`.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<User> {
        if self.users.find_by_username(username).await?.is_some() {
            warn!(username = %username, "Signup rejected: username taken");
            return Err(AppError::Conflict(format!("User {} already exists", username)));
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = self.users.create(username, &password_hash).await?;

        info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Check credentials and issue a fresh access/refresh pair
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} doesnt exist", username)))?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!(username = %username, "Login failed: wrong credentials");
            return Err(AppError::Unauthorized("Wrong credentials".to_string()));
        }

        let pair = self.codec.issue_pair(&user.username)?;
        info!(user_id = user.id, username = %user.username, "User logged in");
        Ok(pair)
    }

    async fn validate(&self, token: &str, kind: TokenKind) -> Result<Claims> {
        let claims = self.codec.decode_kind(token, kind)?;

        if self.ledger.is_revoked(&claims.jti).await? {
            return Err(AppError::Unauthorized(revoked_message(kind).to_string()));
        }

        Ok(claims)
    }

    /// Signature, expiry, kind and revocation check for an access token
    pub async fn validate_access_token(&self, token: &str) -> Result<Claims> {
        self.validate(token, TokenKind::Access).await
    }

    pub async fn validate_refresh_token(&self, token: &str) -> Result<Claims> {
        self.validate(token, TokenKind::Refresh).await
    }

    /// Add the token's jti to the revocation ledger
    pub async fn revoke(&self, claims: &Claims) -> Result<()> {
        self.ledger.revoke(&claims.jti, claims.token_type).await?;
        info!(
            username = %claims.sub,
            token_type = %claims.token_type,
            "Token revoked"
        );
        Ok(())
    }

    /// Mint a new access token for the subject of a validated refresh token
    ///
    /// The password is not rechecked.
    pub async fn refresh_access_token(&self, refresh_claims: &Claims) -> Result<String> {
        if refresh_claims.token_type != TokenKind::Refresh {
            return Err(AppError::Unauthorized("Refresh token required".to_string()));
        }

        Ok(self.codec.issue_access_token(&refresh_claims.sub)?)
    }

    /// Map a token subject to the stored user
    pub async fn resolve_user(&self, username: &str) -> Result<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(format!("User {} doesnt exist", username)))
    }
}

fn revoked_message(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Access => "Access token has been revoked",
        TokenKind::Refresh => "Refresh token has been revoked",
    }
}

#[async_trait]
impl TokenVerifier for AuthService {
    async fn verify(&self, token: &str, kind: TokenKind) -> std::result::Result<Claims, AuthRejection> {
        self.validate(token, kind).await.map_err(|err| match err {
            AppError::Database(msg) | AppError::Internal(msg) => AuthRejection::Internal(msg),
            other => AuthRejection::Unauthorized(other.to_string()),
        })
    }
}

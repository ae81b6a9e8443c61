/// JWT issuance and validation for Waypoint services
///
/// Tokens carry the subject (username), a unique `jti` used as the revocation key,
/// issue/expiry timestamps and the token kind (access or refresh).
///
/// ## Key Handling
///
/// Keys are owned by a [`JwtCodec`] value that is built once at startup and passed to
/// whoever needs it. Two key layouts are supported:
///
/// - **HS256**: a shared server-side secret (default)
/// - **RS256**: PEM-encoded RSA key pair
///
/// ## Usage
///
/// ```rust
/// use crypto_core::jwt::{JwtCodec, TokenKind};
///
/// let codec = JwtCodec::from_secret(b"change-me").unwrap();
/// let pair = codec.issue_pair("alice").unwrap();
/// let claims = codec.decode_kind(&pair.access_token, TokenKind::Access).unwrap();
/// assert_eq!(claims.sub, "alice");
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

// ============================================================================
// Data Structures
// ============================================================================

/// Kind of bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// JWT ID, unique per issued token
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token kind
    pub token_type: TokenKind,
}

impl Claims {
    fn new(subject: &str, kind: TokenKind, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            token_type: kind,
        }
    }
}

/// Access + refresh token pair handed out on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Expected {expected} token, got {found} token")]
    WrongKind { expected: TokenKind, found: TokenKind },

    #[error("Invalid key material: {0}")]
    Key(String),

    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, JwtError>;

// ============================================================================
// Codec
// ============================================================================

/// Signs and validates tokens with a fixed key and lifetime policy
#[derive(Clone)]
pub struct JwtCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &self.algorithm)
            .field("keys", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl JwtCodec {
    /// Build an HS256 codec from a shared secret
    pub fn from_secret(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(JwtError::Key("JWT secret must not be empty".to_string()));
        }

        Ok(Self::with_keys(
            Algorithm::HS256,
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        ))
    }

    /// Build an RS256 codec from PEM-encoded RSA keys
    pub fn from_rsa_pem(private_key_pem: &str, public_key_pem: &str) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| JwtError::Key(format!("Failed to parse RSA private key: {e}")))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::Key(format!("Failed to parse RSA public key: {e}")))?;

        Ok(Self::with_keys(Algorithm::RS256, encoding_key, decoding_key))
    }

    fn with_keys(algorithm: Algorithm, encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        Self {
            algorithm,
            encoding_key,
            decoding_key,
            access_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECS),
            refresh_ttl: Duration::seconds(DEFAULT_REFRESH_TOKEN_TTL_SECS),
        }
    }

    /// Override token lifetimes
    pub fn with_lifetimes(mut self, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        self.access_ttl = access_ttl;
        self.refresh_ttl = refresh_ttl;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    fn ttl_for(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    /// Issue a signed token of the given kind, returning it with its claims
    pub fn issue(&self, subject: &str, kind: TokenKind) -> Result<(String, Claims)> {
        let claims = Claims::new(subject, kind, self.ttl_for(kind));
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Encoding(e.to_string()))?;
        Ok((token, claims))
    }

    pub fn issue_access_token(&self, subject: &str) -> Result<String> {
        self.issue(subject, TokenKind::Access).map(|(token, _)| token)
    }

    pub fn issue_refresh_token(&self, subject: &str) -> Result<String> {
        self.issue(subject, TokenKind::Refresh).map(|(token, _)| token)
    }

    /// Issue a fresh access + refresh pair, each with its own jti
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair> {
        let access_token = self.issue_access_token(subject)?;
        let refresh_token = self.issue_refresh_token(subject)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    /// Verify signature and expiry and return the claims
    ///
    /// Expiry is compared against the wall clock with zero leeway.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })
    }

    /// Decode and additionally require a specific token kind
    pub fn decode_kind(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        let claims = self.decode(token)?;
        if claims.token_type != expected {
            return Err(JwtError::WrongKind {
                expected,
                found: claims.token_type,
            });
        }
        Ok(claims)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Shared cryptographic primitives for Waypoint services.
//!
//! - `jwt`: access/refresh token issuance and validation

pub mod jwt;

pub use jsonwebtoken::Algorithm;
pub use jwt::{Claims, JwtCodec, JwtError, TokenKind, TokenPair};

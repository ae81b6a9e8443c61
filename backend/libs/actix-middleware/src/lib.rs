//! # Actix Middleware Library
//!
//! Unified middleware components for Waypoint Actix services
//!
//! ## Modules
//! - `jwt_auth`: bearer-token guard (signature, expiry, kind and revocation via a verifier)
//! - `logging`: request/response logging through tracing
//! - `metrics`: Prometheus metrics middleware and scrape handler

pub mod jwt_auth;
pub mod logging;
pub mod metrics;

pub use jwt_auth::{bearer_token, AuthRejection, AuthenticatedToken, JwtAuthMiddleware, TokenVerifier};
pub use logging::Logging;
pub use metrics::{metrics_handler, MetricsMiddleware};

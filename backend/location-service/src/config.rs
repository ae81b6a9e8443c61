//! Configuration management for Location Service
//!
//! Settings are read from environment variables; in debug builds a `.env`
//! file is loaded first.
//!
//! # Example
//!
//! ```no_run
//! use location_service::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("Listening on {}", settings.server.bind_address());
//!     Ok(())
//! }
//! ```

use crate::security::PasswordSettings;
use anyhow::{anyhow, Context, Result};
use crypto_core::jwt::{
    JwtCodec, DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_REFRESH_TOKEN_TTL_SECS,
};
use db_pool::env_utils::parse_env_flag;
use db_pool::DbConfig;
use std::env;
use std::fmt;
use std::str::FromStr;

pub const SERVICE_NAME: &str = "location-service";

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DbConfig,
    pub jwt: JwtSettings,
    pub server: ServerSettings,
    pub password: PasswordSettings,
    pub locations: LocationSettings,
    pub log: LogSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        Ok(Settings {
            database: DbConfig::from_env(SERVICE_NAME)
                .map_err(|e| anyhow!(e))
                .context("DATABASE_URL must be set")?,
            jwt: JwtSettings::from_env()?,
            server: ServerSettings::from_env()?,
            password: password_settings_from_env()?,
            locations: LocationSettings::from_env(),
            log: LogSettings::from_env(),
        })
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid {}: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// JWT signing settings
#[derive(Clone)]
pub struct JwtSettings {
    /// HS256 shared secret
    pub secret: Option<String>,
    /// RS256 PEM keys; take precedence over `secret`
    pub private_key_pem: Option<String>,
    pub public_key_pem: Option<String>,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field(
                "private_key_pem",
                &self.private_key_pem.as_ref().map(|_| "[REDACTED]"),
            )
            .field("public_key_pem", &self.public_key_pem.is_some())
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish()
    }
}

impl JwtSettings {
    fn from_env() -> Result<Self> {
        let settings = Self {
            secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            private_key_pem: env::var("JWT_PRIVATE_KEY").ok().filter(|s| !s.is_empty()),
            public_key_pem: env::var("JWT_PUBLIC_KEY").ok().filter(|s| !s.is_empty()),
            access_ttl_secs: parse_or("JWT_ACCESS_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?,
            refresh_ttl_secs: parse_or("JWT_REFRESH_TTL_SECS", DEFAULT_REFRESH_TOKEN_TTL_SECS)?,
        };

        if settings.access_ttl_secs <= 0 || settings.refresh_ttl_secs <= 0 {
            return Err(anyhow!("JWT token lifetimes must be positive"));
        }

        if settings.private_key_pem.is_some() && settings.public_key_pem.is_none() {
            return Err(anyhow!("JWT_PUBLIC_KEY must be set together with JWT_PRIVATE_KEY"));
        }

        if settings.private_key_pem.is_none() && settings.secret.is_none() {
            return Err(anyhow!(
                "JWT_SECRET must be set when no PEM keys are configured"
            ));
        }

        Ok(settings)
    }

    /// Build the codec; RS256 when PEM keys are present, HS256 otherwise
    pub fn build_codec(&self) -> Result<JwtCodec> {
        let codec = match (&self.private_key_pem, &self.public_key_pem, &self.secret) {
            (Some(private_pem), Some(public_pem), _) => {
                JwtCodec::from_rsa_pem(private_pem, public_pem)
                    .context("Failed to load RS256 keys")?
            }
            (_, _, Some(secret)) => {
                JwtCodec::from_secret(secret.as_bytes()).context("Invalid JWT_SECRET")?
            }
            _ => return Err(anyhow!("No JWT signing key configured")),
        };

        Ok(codec.with_lifetimes(
            chrono::Duration::seconds(self.access_ttl_secs),
            chrono::Duration::seconds(self.refresh_ttl_secs),
        ))
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("SERVER_PORT", 5000)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn password_settings_from_env() -> Result<PasswordSettings> {
    let defaults = PasswordSettings::default();
    Ok(PasswordSettings {
        memory_kib: parse_or("PASSWORD_MEMORY_KIB", defaults.memory_kib)?,
        iterations: parse_or("PASSWORD_ITERATIONS", defaults.iterations)?,
        parallelism: parse_or("PASSWORD_PARALLELISM", defaults.parallelism)?,
    })
}

#[derive(Debug, Clone)]
pub struct LocationSettings {
    /// Restrict update/delete to the owner of the location
    pub enforce_ownership: bool,
}

impl LocationSettings {
    fn from_env() -> Self {
        Self {
            enforce_ownership: parse_env_flag("LOCATION_ENFORCE_OWNERSHIP", true),
        }
    }
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            enforce_ownership: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub filter: String,
    pub format: LogFormat,
}

impl LogSettings {
    pub fn from_env() -> Self {
        let format = match env::var("LOG_FORMAT")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str()
        {
            "pretty" | "text" => LogFormat::Pretty,
            _ => LogFormat::Json,
        };

        Self {
            filter: env::var("RUST_LOG")
                .unwrap_or_else(|_| "location_service=info,info".to_string()),
            format,
        }
    }
}

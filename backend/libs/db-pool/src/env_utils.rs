//! Environment variable parsing utilities
//!
//! Small helpers for reading typed settings with defaults, so callers never
//! need to unwrap parse results.

use std::str::FromStr;

/// Parse an environment variable with a default fallback
///
/// Missing and unparsable values both fall back to `default`.
///
/// # Example
/// ```ignore
/// let port: u16 = parse_env_with_default("PORT", 8000);
/// ```
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse an environment variable, returning Result
///
/// # Example
/// ```ignore
/// let database_url = parse_env_required::<String>("DATABASE_URL")?;
/// ```
pub fn parse_env_required<T: FromStr>(key: &str) -> Result<T, String> {
    std::env::var(key)
        .map_err(|_| format!("Environment variable {} not found", key))?
        .parse()
        .map_err(|_| format!("Failed to parse environment variable {}", key))
}

/// Parse a boolean flag, accepting `1/0`, `true/false`, `yes/no`, `on/off`
pub fn parse_env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

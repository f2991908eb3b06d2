//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SAHO_API_BASE_URL` - Remote service base URL (default: `https://sahobackend.onrender.com`)
//! - `SAHO_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://sahobackend.onrender.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is appended to
    pub base_url: Url,
    /// Timeout applied to each HTTP exchange (not to the whole retry chain)
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration for the given base URL with default settings.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_env_or_default("SAHO_API_BASE_URL", DEFAULT_BASE_URL))?;
        let timeout_secs = get_env_or_default("SAHO_API_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SAHO_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Absolute URL for a request path such as `/products`.
    ///
    /// The path is appended to the base URL, so a base with a path prefix
    /// (`https://host/api`) keeps that prefix.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the combined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        // DEFAULT_BASE_URL is a constant, known-valid URL
        #[allow(clippy::expect_used)]
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid");
        Self::new(base_url)
    }
}

/// Parse and validate the base URL (must be http or https).
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar("SAHO_API_BASE_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "SAHO_API_BASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        let config = ClientConfig::new(Url::parse("https://api.saho.sn").unwrap());
        assert_eq!(
            config.endpoint("/products").unwrap().as_str(),
            "https://api.saho.sn/products"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:8080/api/").unwrap());
        assert_eq!(
            config.endpoint("/auth/refresh").unwrap().as_str(),
            "http://127.0.0.1:8080/api/auth/refresh"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://files.saho.sn").is_err());
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("http://localhost:4000").is_ok());
    }

    #[test]
    fn test_default_points_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "https://sahobackend.onrender.com/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}

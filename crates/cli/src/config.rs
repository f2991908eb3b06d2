//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SAHO_API_BASE_URL` - Remote service base URL
//! - `SAHO_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `SAHO_DATA_DIR` - Directory holding the persisted cart (default: `.saho`)
//! - `SAHO_ADMIN_EMAIL` - Back-office login, required by `admin` commands
//! - `SAHO_ADMIN_PASSWORD` - Back-office password, required by `admin` commands
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use saho_client::{ClientConfig, ConfigError};
use saho_core::Email;
use secrecy::SecretString;

const DEFAULT_DATA_DIR: &str = ".saho";

/// Everything the binary needs from the environment.
#[derive(Clone)]
pub struct CliConfig {
    pub client: ClientConfig,
    pub data_dir: PathBuf,
    pub admin_email: Option<String>,
    pub admin_password: Option<SecretString>,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Also loads .env
        let client = ClientConfig::from_env()?;

        Ok(Self {
            client,
            data_dir: get_optional_env("SAHO_DATA_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            admin_email: get_optional_env("SAHO_ADMIN_EMAIL"),
            admin_password: get_optional_env("SAHO_ADMIN_PASSWORD").map(SecretString::from),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Back-office credentials, validated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if either variable is unset and
    /// `ConfigError::InvalidEnvVar` if the email is malformed.
    pub fn admin_credentials(&self) -> Result<(Email, SecretString), ConfigError> {
        let email = self
            .admin_email
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SAHO_ADMIN_EMAIL".to_string()))?;
        let email = Email::parse(email).map_err(|e| {
            ConfigError::InvalidEnvVar("SAHO_ADMIN_EMAIL".to_string(), e.to_string())
        })?;
        let password = self
            .admin_password
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("SAHO_ADMIN_PASSWORD".to_string()))?;
        Ok((email, password))
    }
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("client", &self.client)
            .field("data_dir", &self.data_dir)
            .field("admin_email", &self.admin_email)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

/// An environment variable, with empty values treated as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

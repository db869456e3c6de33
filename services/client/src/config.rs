//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use reqwest::Url;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Root of the Bibliofind server; always ends with `/` so endpoints join onto it.
    pub base_url: Url,
    pub log_level: Level,
    /// Sent as the `Cookie` header so endpoints behind the login can be reached.
    pub session_cookie: Option<String>,
    /// Transport timeout. `None` waits for as long as the server takes.
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- Server Settings ---
        let base_url_str =
            lookup("BIBLIOFIND_BASE_URL").unwrap_or_else(|| "http://localhost:5000".to_string());
        let mut base_url = Url::parse(&base_url_str).map_err(|e| {
            ConfigError::InvalidValue("BIBLIOFIND_BASE_URL".to_string(), e.to_string())
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue(
                "BIBLIOFIND_BASE_URL".to_string(),
                format!("'{}' cannot be used as a base URL", base_url_str),
            ));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Transport Settings ---
        let session_cookie = lookup("BIBLIOFIND_SESSION_COOKIE").filter(|c| !c.trim().is_empty());

        let request_timeout = match lookup("BIBLIOFIND_TIMEOUT_SECS") {
            None => None,
            Some(secs) => match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "BIBLIOFIND_TIMEOUT_SECS".to_string(),
                        format!("'{}' is not a positive number of seconds", secs),
                    ))
                }
            },
        };

        Ok(Self {
            base_url,
            log_level,
            session_cookie,
            request_timeout,
        })
    }
}

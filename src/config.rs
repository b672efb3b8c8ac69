// Configuration management

use crate::core::errors::ClientError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Client configuration loaded from environment variables
///
/// All fields have defaults suitable for local development; everything is
/// validated on load with clear error messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend origin, e.g. `https://api.unisphere.example`
    pub api_base_url: String,
    /// Fixed base path every endpoint resolves under
    pub api_base_path: String,

    /// Where the persistent session key/value file lives
    pub session_file_path: PathBuf,

    /// HTTP request timeout
    pub request_timeout_secs: u64,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    pub fn from_env() -> Result<Self, ClientError> {
        // Skip in test environment to avoid interfering with test env vars
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok(); // File may not exist
        }

        let config = Self {
            api_base_url: Self::get_env_or_default("UNISPHERE_API_BASE_URL", "http://localhost:5000"),
            api_base_path: Self::get_env_or_default("UNISPHERE_API_BASE_PATH", "/api"),
            session_file_path: PathBuf::from(Self::get_env_or_default(
                "UNISPHERE_SESSION_FILE",
                ".unisphere/session.json",
            )),
            request_timeout_secs: Self::parse_u64_or_default("UNISPHERE_REQUEST_TIMEOUT_SECS", 30)?,
            log_level: Self::get_env_or_default("UNISPHERE_LOG_LEVEL", "info"),
            log_format: Self::get_env_or_default("UNISPHERE_LOG_FORMAT", "text"),
        };

        config.validate()?;

        Ok(config)
    }

    /// Configuration for tests: local backend, throwaway session path
    pub fn test_config() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            api_base_path: "/api".to_string(),
            session_file_path: PathBuf::from("session.test.json"),
            request_timeout_secs: 5,
            log_level: "debug".to_string(),
            log_format: "text".to_string(),
        }
    }

    fn get_env_or_default(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, ClientError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u64>().map_err(|e| {
                    ClientError::Configuration(format!("Invalid {} value '{}': {}", key, value, e))
                })?;

                if parsed == 0 {
                    return Err(ClientError::Configuration(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Post-load validation
    fn validate(&self) -> Result<(), ClientError> {
        url::Url::parse(&self.api_base_url).map_err(|e| {
            ClientError::Configuration(format!(
                "Invalid UNISPHERE_API_BASE_URL '{}': {}",
                self.api_base_url, e
            ))
        })?;

        if !self.api_base_path.starts_with('/') {
            return Err(ClientError::Configuration(format!(
                "UNISPHERE_API_BASE_PATH must start with '/', got '{}'",
                self.api_base_path
            )));
        }

        match self.log_format.as_str() {
            "json" | "text" => {}
            other => {
                return Err(ClientError::Configuration(format!(
                    "UNISPHERE_LOG_FORMAT must be 'json' or 'text', got '{}'",
                    other
                )));
            }
        }

        parse_log_level(&self.log_level).map_err(ClientError::Configuration)?;

        Ok(())
    }
}

/// Initialize the tracing subscriber from config values.
///
/// Must be called at most once per process - tracing panics on a second
/// init. Library consumers that install their own subscriber skip this.
pub fn init_tracing(config: &Config) -> Result<(), ClientError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let level = parse_log_level(&config.log_level).map_err(ClientError::Configuration)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_env_filter(filter);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}

/// Parse log level string to tracing Level
fn parse_log_level(level: &str) -> Result<tracing::Level, String> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        _ => Err(format!("Invalid log level: {}", level)),
    }
}

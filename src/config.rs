use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{DEFAULT_GRAPH_API_URL, DEFAULT_GRAPH_API_VERSION, DEFAULT_PAGE_DELAY_MS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    // Credentials
    pub ig_user_id: String,
    pub access_token: String,

    // Graph API
    pub graph_api_url: String,
    pub graph_api_version: String,
    pub include_thumbnails: bool,

    // Pagination
    pub page_delay: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("ig_user_id", &self.ig_user_id)
            .field("access_token", &"<redacted>")
            .field("graph_api_url", &self.graph_api_url)
            .field("graph_api_version", &self.graph_api_version)
            .field("include_thumbnails", &self.include_thumbnails)
            .field("page_delay", &self.page_delay)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Credentials
            ig_user_id: required_env("IG_USER_ID")?,
            access_token: required_env("ACCESS_TOKEN")?,

            // Graph API
            graph_api_url: env_or_default("GRAPH_API_URL", DEFAULT_GRAPH_API_URL),
            graph_api_version: env_or_default("GRAPH_API_VERSION", DEFAULT_GRAPH_API_VERSION),
            include_thumbnails: parse_env_bool("INCLUDE_THUMBNAILS", true)?,

            // Pagination
            page_delay: Duration::from_millis(parse_env_u64(
                "PAGE_DELAY_MS",
                DEFAULT_PAGE_DELAY_MS,
            )?),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ig_user_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "IG_USER_ID".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "ACCESS_TOKEN".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.graph_api_version.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "GRAPH_API_VERSION".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if let Err(e) = url::Url::parse(&self.graph_api_url) {
            return Err(ConfigError::InvalidValue {
                name: "GRAPH_API_URL".to_string(),
                message: e.to_string(),
            });
        }
        Ok(())
    }

    /// Configuration with placeholder credentials and no page delay.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            ig_user_id: "17841400000000000".to_string(),
            access_token: "test-token".to_string(),
            graph_api_url: DEFAULT_GRAPH_API_URL.to_string(),
            graph_api_version: DEFAULT_GRAPH_API_VERSION.to_string(),
            include_thumbnails: true,
            page_delay: Duration::ZERO,
        }
    }

    /// Full URL of the discovery endpoint for the configured account.
    #[must_use]
    pub fn discovery_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.graph_api_url.trim_end_matches('/'),
            self.graph_api_version.trim_matches('/'),
            self.ig_user_id
        )
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => parse_bool(name, &val),
        _ => Ok(default),
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::ParseBool {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::poller::PollConfig;

/// Scan service API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the scan service
    pub base_url: String,
    /// Bearer token used by the HTTP transport
    pub token: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Timeout for individual HTTP requests (in seconds)
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.graphscan.dev".to_string(),
            token: String::new(),
            user_agent: "graphscan-client/0.1.0".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

/// Polling budget and backoff schedule (serializable version)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Overall wall-clock budget for a scan to reach a terminal state (in seconds)
    pub timeout_seconds: u64,
    /// First backoff delay (in milliseconds)
    pub initial_delay_ms: u64,
    /// Backoff ceiling (in milliseconds)
    pub max_delay_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 600,
            initial_delay_ms: 2000,
            max_delay_ms: 30_000,
        }
    }
}

impl PollSettings {
    /// Convert to the runtime PollConfig
    pub fn to_poll_config(&self) -> PollConfig {
        PollConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

/// Completed-report cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportCacheConfig {
    pub max_entries: u64,
    pub ttl_seconds: u64,
}

impl Default for ReportCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            ttl_seconds: 3600,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. "info" or "graphscan_client=debug"
    pub level: String,
    /// Output format: "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub poll: PollSettings,
    pub report_cache: ReportCacheConfig,
    pub logging: LoggingConfig,
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::api("base_url must not be empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::api(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::api(
                "request_timeout_seconds must be positive",
            ));
        }
        Ok(())
    }
}

impl Validate for PollSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ValidationError::poll("timeout_seconds must be positive"));
        }
        if self.initial_delay_ms == 0 {
            return Err(ValidationError::poll("initial_delay_ms must be positive"));
        }
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(ValidationError::poll(format!(
                "max_delay_ms ({}) must be >= initial_delay_ms ({})",
                self.max_delay_ms, self.initial_delay_ms
            )));
        }
        Ok(())
    }
}

impl Validate for ReportCacheConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_entries == 0 {
            return Err(ValidationError::report_cache("max_entries must be positive"));
        }
        if self.ttl_seconds == 0 {
            return Err(ValidationError::report_cache("ttl_seconds must be positive"));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.level.is_empty() {
            return Err(ValidationError::logging("level must not be empty"));
        }
        match self.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "unknown log format '{}' (expected 'json' or 'pretty')",
                other
            ))),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.poll.validate()?;
        self.report_cache.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Add local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("GRAPHSCAN").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;

        // Validate the loaded configuration
        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_poll_settings_conversion() {
        let settings = PollSettings {
            timeout_seconds: 300,
            initial_delay_ms: 1000,
            max_delay_ms: 10_000,
        };
        let poll = settings.to_poll_config();
        assert_eq!(poll.timeout, Duration::from_secs(300));
        assert_eq!(poll.initial_delay, Duration::from_millis(1000));
        assert_eq!(poll.max_delay, Duration::from_millis(10_000));
    }

    #[test]
    fn test_poll_settings_rejects_inverted_delays() {
        let settings = PollSettings {
            timeout_seconds: 600,
            initial_delay_ms: 30_000,
            max_delay_ms: 2000,
        };
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::Poll { .. })
        ));
    }

    #[test]
    fn test_api_config_requires_http_url() {
        let api = ApiConfig {
            base_url: "ftp://api.graphscan.dev".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(api.validate(), Err(ValidationError::Api { .. })));
    }

    #[test]
    fn test_logging_config_rejects_unknown_format() {
        let logging = LoggingConfig {
            level: "info".to_string(),
            format: "xml".to_string(),
        };
        assert!(matches!(
            logging.validate(),
            Err(ValidationError::Logging { .. })
        ));
    }
}

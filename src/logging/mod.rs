//! Structured logging with tracing

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Error type for logging initialization
#[derive(Debug, Error)]
pub enum LoggingInitError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Initialize the global tracing subscriber from logging configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set, so a
/// developer can raise verbosity without touching configuration files.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingInitError> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(env_filter) => {
            EnvFilter::try_new(&env_filter).map_err(|e| LoggingInitError::InvalidFilter {
                filter: env_filter,
                message: e.to_string(),
            })?
        }
        Err(_) => {
            EnvFilter::try_new(&config.level).map_err(|e| LoggingInitError::InvalidFilter {
                filter: config.level.clone(),
                message: e.to_string(),
            })?
        }
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| LoggingInitError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_reported() {
        let config = LoggingConfig {
            level: "not a [valid] directive!!!".to_string(),
            format: "pretty".to_string(),
        };
        // Guard against an ambient RUST_LOG masking the configured level.
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let err = init_tracing(&config).unwrap_err();
        assert!(matches!(err, LoggingInitError::InvalidFilter { .. }));
    }
}

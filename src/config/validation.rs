//! Configuration validation module

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("API configuration error: {message}")]
    Api { message: String },

    #[error("Poll configuration error: {message}")]
    Poll { message: String },

    #[error("Report cache configuration error: {message}")]
    ReportCache { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },
}

impl ValidationError {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    pub fn poll(message: impl Into<String>) -> Self {
        Self::Poll {
            message: message.into(),
        }
    }

    pub fn report_cache(message: impl Into<String>) -> Self {
        Self::ReportCache {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

//! Scan service API client abstraction
//!
//! The poller and use cases depend on the [`ScanServiceApi`] trait; the
//! concrete HTTP implementation lives in [`http`].

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::scan::{ScanHandle, ScanReport, ScanRequest, ScanStatus};

pub use http::HttpScanApi;

/// Transport-level failure of a single API call.
///
/// Distinct from a `failed` scan status: the remote service reporting a
/// failed scan is a successful API call carrying a terminal result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response payload: {0}")]
    Decode(String),
}

impl TransportError {
    /// Whether a call that produced this error is worth retrying.
    ///
    /// Server errors and rate limiting are transient; client errors and
    /// undecodable payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

/// Remote scan service operations consumed by this crate.
///
/// Implementations must be safely shareable across concurrent polling loops;
/// connection pooling is the implementation's concern, not the caller's.
#[async_trait]
pub trait ScanServiceApi: Send + Sync {
    /// Upload a dependency graph, returning the handle to poll
    async fn submit_scan(&self, request: &ScanRequest) -> Result<ScanHandle, TransportError>;

    /// One status check for a previously submitted scan
    async fn scan_status(&self, handle: &ScanHandle) -> Result<ScanStatus, TransportError>;

    /// Fetch the full report; only valid after a `completed` status
    async fn scan_report(&self, handle: &ScanHandle) -> Result<ScanReport, TransportError>;
}

//! Application-level error taxonomy
//!
//! Every terminal exit of a polling loop maps to exactly one variant, with
//! enough context (handle, elapsed time, last observed status) for logging
//! and alerting. Nothing is silently swallowed.

use std::time::Duration;

use thiserror::Error;

use crate::domain::scan::{ScanHandle, ScanRequestError, ScanStatus};
use crate::infrastructure::api_client::TransportError;

/// Terminal outcomes of scan submission and polling
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    /// The timeout budget elapsed without the scan reaching a terminal state
    #[error("Scan {handle} timed out after {elapsed:?} (last status: {last_status:?})")]
    Timeout {
        handle: ScanHandle,
        elapsed: Duration,
        last_status: Option<ScanStatus>,
    },

    /// The remote service reported the scan as failed
    #[error("Scan {handle} failed remotely after {elapsed:?}")]
    RemoteFailure {
        handle: ScanHandle,
        elapsed: Duration,
    },

    /// A non-retryable transport failure on an individual API call
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The caller's cancellation signal fired before a terminal state
    #[error("Scan {handle} cancelled after {elapsed:?} (last status: {last_status:?})")]
    Cancelled {
        handle: ScanHandle,
        elapsed: Duration,
        last_status: Option<ScanStatus>,
    },

    /// Poll configuration failed validation
    #[error("Invalid poll configuration: {0}")]
    InvalidPollConfig(String),

    /// The scan request failed domain validation before submission
    #[error(transparent)]
    Request(#[from] ScanRequestError),
}

impl ScanError {
    /// Whether this outcome is attributable to the remote scan itself rather
    /// than to the client or transport.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteFailure { .. })
    }
}

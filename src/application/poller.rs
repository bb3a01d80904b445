//! Scan polling state machine
//!
//! Given a submitted scan handle, [`ScanPoller`] repeatedly queries remote
//! status until a terminal state is reached or the timeout budget elapses,
//! using capped exponential backoff to bound request rate.
//!
//! One logical task per handle: status checks for a single handle are
//! strictly sequential, and the only suspension point is the backoff sleep.
//! Independent handles may be polled concurrently through the same
//! [`ScanServiceApi`] instance.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::errors::ScanError;
use crate::domain::scan::{ScanHandle, ScanReport, ScanStatus};
use crate::infrastructure::api_client::ScanServiceApi;

/// Polling budget and backoff schedule
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Overall wall-clock budget for reaching a terminal state
    pub timeout: Duration,
    /// First backoff delay
    pub initial_delay: Duration,
    /// Backoff ceiling; the delay doubles until it reaches this cap
    pub max_delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            initial_delay: Duration::from_millis(2000),
            max_delay: Duration::from_millis(30_000),
        }
    }
}

impl PollConfig {
    /// Check that the budget and schedule are usable
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidPollConfig(
                "timeout must be positive".to_string(),
            ));
        }
        if self.initial_delay.is_zero() {
            return Err(ScanError::InvalidPollConfig(
                "initial_delay must be positive".to_string(),
            ));
        }
        if self.max_delay < self.initial_delay {
            return Err(ScanError::InvalidPollConfig(format!(
                "max_delay ({:?}) must be >= initial_delay ({:?})",
                self.max_delay, self.initial_delay
            )));
        }
        Ok(())
    }
}

/// Polls a scan handle until it reaches a terminal outcome.
///
/// Timeout is evaluated only at loop-iteration boundaries: a status check
/// that began before the deadline runs to completion, and a `Completed`
/// result wins over `Timeout`. The backoff sleep is truncated to the
/// remaining budget so the timeout surfaces at approximately the configured
/// deadline, never before it.
pub struct ScanPoller {
    api: Arc<dyn ScanServiceApi>,
}

impl ScanPoller {
    pub fn new(api: Arc<dyn ScanServiceApi>) -> Self {
        Self { api }
    }

    /// Poll `handle` until `Completed` (returning the fetched report),
    /// `Failed` (`RemoteFailure`), timeout, or cancellation.
    ///
    /// Retryable transport errors on individual status checks are logged and
    /// retried through the same backoff schedule until the budget runs out;
    /// non-retryable transport errors surface immediately. The cancellation
    /// token, when supplied, is observed before each status check and during
    /// the backoff sleep — in-flight requests are not aborted.
    pub async fn await_completion(
        &self,
        handle: &ScanHandle,
        config: &PollConfig,
        cancel: Option<&CancellationToken>,
    ) -> Result<ScanReport, ScanError> {
        config.validate()?;

        let started = Instant::now();
        let mut delay = config.initial_delay;
        let mut last_status: Option<ScanStatus> = None;

        loop {
            let elapsed = started.elapsed();
            if elapsed >= config.timeout {
                warn!(
                    handle = %handle,
                    elapsed_ms = elapsed.as_millis() as u64,
                    last_status = ?last_status,
                    "Scan polling timed out"
                );
                return Err(ScanError::Timeout {
                    handle: handle.clone(),
                    elapsed,
                    last_status,
                });
            }

            if let Some(token) = cancel {
                if token.is_cancelled() {
                    return Err(ScanError::Cancelled {
                        handle: handle.clone(),
                        elapsed,
                        last_status,
                    });
                }
            }

            match self.api.scan_status(handle).await {
                Ok(status) => {
                    last_status = Some(status);
                    match status {
                        ScanStatus::Completed => {
                            info!(
                                handle = %handle,
                                elapsed_ms = started.elapsed().as_millis() as u64,
                                "Scan completed, fetching report"
                            );
                            let report = self.api.scan_report(handle).await?;
                            return Ok(report);
                        }
                        ScanStatus::Failed => {
                            let elapsed = started.elapsed();
                            warn!(
                                handle = %handle,
                                elapsed_ms = elapsed.as_millis() as u64,
                                "Remote service reported scan as failed"
                            );
                            return Err(ScanError::RemoteFailure {
                                handle: handle.clone(),
                                elapsed,
                            });
                        }
                        ScanStatus::Pending => {}
                    }
                }
                Err(error) if error.is_retryable() => {
                    debug!(
                        handle = %handle,
                        error = %error,
                        "Status check failed, will retry after backoff"
                    );
                }
                Err(error) => return Err(ScanError::Transport(error)),
            }

            // Backoff sleep, truncated to the remaining budget. No lock is
            // held across this await.
            let remaining = config.timeout.saturating_sub(started.elapsed());
            let sleep_for = delay.min(remaining);
            if !sleep_for.is_zero() {
                debug!(
                    handle = %handle,
                    delay_ms = sleep_for.as_millis() as u64,
                    "Backing off before next status check"
                );
                match cancel {
                    Some(token) => {
                        tokio::select! {
                            _ = token.cancelled() => {
                                return Err(ScanError::Cancelled {
                                    handle: handle.clone(),
                                    elapsed: started.elapsed(),
                                    last_status,
                                });
                            }
                            _ = tokio::time::sleep(sleep_for) => {}
                        }
                    }
                    None => tokio::time::sleep(sleep_for).await,
                }
            }

            // Fixed 2x growth, capped; the delay never decreases.
            delay = (delay * 2).min(config.max_delay);
        }
    }
}

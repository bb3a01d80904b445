//! Per-handle request coalescing
//!
//! Concurrent callers awaiting the same scan handle share a single polling
//! loop instead of each issuing their own status checks. The pending map is
//! an explicit, dependency-injected structure keyed by handle; there is no
//! module-level global state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::errors::ScanError;
use crate::application::poller::{PollConfig, ScanPoller};
use crate::domain::scan::{ScanHandle, ScanReport};
use crate::infrastructure::api_client::TransportError;

type PollOutcome = Result<ScanReport, ScanError>;

/// Coalesces concurrent polls of the same handle into one shared loop.
///
/// The shared loop runs detached and is not bound to any caller's
/// cancellation token: a cancelled caller stops waiting (and receives
/// `Cancelled`), while the loop keeps serving the remaining waiters until it
/// reaches a terminal outcome. The map entry is removed once terminal, so a
/// later request for the same handle starts a fresh (typically immediate)
/// poll.
pub struct PollCoalescer {
    poller: Arc<ScanPoller>,
    config: PollConfig,
    inflight: Arc<Mutex<HashMap<ScanHandle, broadcast::Sender<PollOutcome>>>>,
}

impl PollCoalescer {
    pub fn new(poller: Arc<ScanPoller>, config: PollConfig) -> Self {
        Self {
            poller,
            config,
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Await the terminal outcome for `handle`, joining an in-flight poll if
    /// one exists.
    pub async fn await_completion(
        &self,
        handle: &ScanHandle,
        cancel: Option<&CancellationToken>,
    ) -> PollOutcome {
        let started = Instant::now();

        let mut rx = {
            let mut inflight = self.inflight.lock().await;
            match inflight.get(handle) {
                Some(tx) => {
                    debug!(handle = %handle, "Joining in-flight poll");
                    tx.subscribe()
                }
                None => {
                    let (tx, rx) = broadcast::channel(1);
                    inflight.insert(handle.clone(), tx.clone());

                    let poller = self.poller.clone();
                    let config = self.config.clone();
                    let map = self.inflight.clone();
                    let handle = handle.clone();
                    tokio::spawn(async move {
                        let outcome = poller.await_completion(&handle, &config, None).await;
                        // Remove before sending so late subscribers start a
                        // fresh poll rather than racing a stale sender.
                        map.lock().await.remove(&handle);
                        let _ = tx.send(outcome);
                    });

                    rx
                }
            }
        };

        let outcome = match cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        return Err(ScanError::Cancelled {
                            handle: handle.clone(),
                            elapsed: started.elapsed(),
                            last_status: None,
                        });
                    }
                    outcome = rx.recv() => outcome,
                }
            }
            None => rx.recv().await,
        };

        outcome.unwrap_or_else(|e| {
            Err(ScanError::Transport(TransportError::Network(format!(
                "shared poll loop terminated unexpectedly: {}",
                e
            ))))
        })
    }
}

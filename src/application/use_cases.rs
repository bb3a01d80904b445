//! Scan submission and completion use cases
//!
//! Wires the workflow end to end: validate and upload the dependency graph,
//! poll the returned handle through the coalescer, cache the terminal report.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::application::errors::ScanError;
use crate::domain::scan::{ScanHandle, ScanReport, ScanRequest};
use crate::infrastructure::api_client::ScanServiceApi;
use crate::infrastructure::cache::ReportCache;
use crate::infrastructure::coalesce::PollCoalescer;

/// Submit a dependency graph and await its terminal report
pub struct SubmitScanUseCase {
    api: Arc<dyn ScanServiceApi>,
    coalescer: Arc<PollCoalescer>,
    report_cache: Arc<ReportCache>,
}

impl SubmitScanUseCase {
    pub fn new(
        api: Arc<dyn ScanServiceApi>,
        coalescer: Arc<PollCoalescer>,
        report_cache: Arc<ReportCache>,
    ) -> Self {
        Self {
            api,
            coalescer,
            report_cache,
        }
    }

    /// Upload the graph and block (asynchronously) until the scan reaches a
    /// terminal outcome.
    pub async fn execute(
        &self,
        request: &ScanRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<ScanReport, ScanError> {
        let handle = self.api.submit_scan(request).await?;
        info!(
            handle = %handle,
            project = %request.project(),
            edges = request.edges().len(),
            "Scan submitted"
        );
        self.await_report(&handle, cancel).await
    }

    /// Await the report for an already-submitted handle.
    ///
    /// Completed reports are immutable, so a cache hit short-circuits the
    /// poll entirely; concurrent callers for the same handle share one loop.
    pub async fn await_report(
        &self,
        handle: &ScanHandle,
        cancel: Option<&CancellationToken>,
    ) -> Result<ScanReport, ScanError> {
        if let Some(report) = self.report_cache.get(handle).await {
            return Ok((*report).clone());
        }

        let report = self.coalescer.await_completion(handle, cancel).await?;
        self.report_cache
            .insert(handle.clone(), report.clone())
            .await;
        Ok(report)
    }
}

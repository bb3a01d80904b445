//! Shared mock implementations for testing
//!
//! This module provides consistent mock implementations that can be used
//! across different test modules to avoid duplication.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use graphscan_client::{
    ScanHandle, ScanReport, ScanRequest, ScanServiceApi, ScanStatus, TransportError,
};

use super::factories::{sample_handle, sample_report};

/// Mock scan service with a scripted sequence of status results.
///
/// Once the script runs out, the fallback result repeats. Submission can be
/// made to fail for error-path coverage.
pub struct MockScanService {
    statuses: Mutex<VecDeque<Result<ScanStatus, TransportError>>>,
    fallback_status: Result<ScanStatus, TransportError>,
    submit_result: Mutex<Option<Result<ScanHandle, TransportError>>>,
    submit_calls: AtomicU32,
    status_calls: AtomicU32,
    report_calls: AtomicU32,
}

impl MockScanService {
    /// Status results (including transport errors) played in order, then
    /// `Pending` forever
    pub fn with_results(results: Vec<Result<ScanStatus, TransportError>>) -> Self {
        Self {
            statuses: Mutex::new(results.into()),
            fallback_status: Ok(ScanStatus::Pending),
            submit_result: Mutex::new(None),
            submit_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
            report_calls: AtomicU32::new(0),
        }
    }

    /// Statuses played in order, then `Pending` forever
    pub fn with_statuses(statuses: Vec<ScanStatus>) -> Self {
        Self::with_results(statuses.into_iter().map(Ok).collect())
    }

    /// Every status check yields the same result
    pub fn always(status: Result<ScanStatus, TransportError>) -> Self {
        Self {
            statuses: Mutex::new(VecDeque::new()),
            fallback_status: status,
            submit_result: Mutex::new(None),
            submit_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
            report_calls: AtomicU32::new(0),
        }
    }

    /// Make submission fail with the given transport error
    pub fn failing_submit(error: TransportError) -> Self {
        let mock = Self::with_statuses(vec![]);
        *mock.submit_result.lock().unwrap() = Some(Err(error));
        mock
    }

    pub fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn report_calls(&self) -> u32 {
        self.report_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScanServiceApi for MockScanService {
    async fn submit_scan(&self, _request: &ScanRequest) -> Result<ScanHandle, TransportError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        match &*self.submit_result.lock().unwrap() {
            Some(result) => result.clone(),
            None => Ok(sample_handle()),
        }
    }

    async fn scan_status(&self, _handle: &ScanHandle) -> Result<ScanStatus, TransportError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback_status.clone())
    }

    async fn scan_report(&self, _handle: &ScanHandle) -> Result<ScanReport, TransportError> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        Ok(sample_report())
    }
}

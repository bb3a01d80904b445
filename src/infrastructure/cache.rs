//! In-memory cache for completed scan reports
//!
//! Terminal reports are immutable, so re-requests for a handle that already
//! completed can short-circuit without any network traffic.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::domain::scan::{ScanHandle, ScanReport};

/// Bounded TTL cache of terminal scan reports, keyed by handle
pub struct ReportCache {
    cache: Cache<ScanHandle, Arc<ScanReport>>,
}

impl ReportCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub async fn get(&self, handle: &ScanHandle) -> Option<Arc<ScanReport>> {
        let hit = self.cache.get(handle).await;
        if hit.is_some() {
            debug!(handle = %handle, "Report cache hit");
        }
        hit
    }

    pub async fn insert(&self, handle: ScanHandle, report: ScanReport) {
        self.cache.insert(handle, Arc::new(report)).await;
    }
}

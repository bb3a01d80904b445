//! Infrastructure Layer - External integrations
//!
//! HTTP transport for the scan service, the per-handle poll coalescer, and
//! the completed-report cache.

pub mod api_client;
pub mod cache;
pub mod coalesce;

pub use api_client::{HttpScanApi, ScanServiceApi, TransportError};
pub use cache::ReportCache;
pub use coalesce::PollCoalescer;

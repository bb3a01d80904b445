//! graphscan-client - Async client for the GraphScan dependency-scanning service
//!
//! A caller submits an immutable dependency graph for a revisioned project
//! locator, receives an opaque scan handle, and awaits the terminal report
//! (vulnerability and license findings) via a sequential polling loop with
//! capped exponential backoff.
//!
//! # Modules
//!
//! - [`config`] — Strongly-typed configuration with file and environment variable support
//! - [`domain`] — Locators, handles, statuses, scan requests, and reports
//! - [`application`] — The polling state machine, use cases, and error taxonomy
//! - [`infrastructure`] — HTTP transport, poll coalescing, and report caching
//! - [`logging`] — Structured logging with tracing
//!
//! # Architecture
//!
//! ```text
//! graphscan-client/
//! ├── domain/           # Pure business values
//! │   └── scan/         # Locator, ScanHandle, ScanStatus, ScanReport
//! ├── application/      # ScanPoller, SubmitScanUseCase, ScanError
//! ├── infrastructure/   # HttpScanApi, PollCoalescer, ReportCache
//! ├── config/           # Configuration management
//! └── logging/          # Subscriber initialization
//! ```
//!
//! # Configuration
//!
//! Environment variables use the `GRAPHSCAN__` prefix with double underscore
//! separators:
//!
//! ```bash
//! GRAPHSCAN__API__TOKEN=...
//! GRAPHSCAN__POLL__TIMEOUT_SECONDS=600
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graphscan_client::{
//!     Config, HttpScanApi, PollCoalescer, ReportCache, ScanPoller, SubmitScanUseCase,
//! };
//!
//! let config = Config::load()?;
//! let api = Arc::new(HttpScanApi::new(&config.api)?);
//! let poller = Arc::new(ScanPoller::new(api.clone()));
//! let coalescer = Arc::new(PollCoalescer::new(poller, config.poll.to_poll_config()));
//! let cache = Arc::new(ReportCache::new(
//!     config.report_cache.max_entries,
//!     std::time::Duration::from_secs(config.report_cache.ttl_seconds),
//! ));
//! let scans = SubmitScanUseCase::new(api, coalescer, cache);
//!
//! let report = scans.execute(&request, None).await?;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use application::{PollConfig, ScanError, ScanPoller, SubmitScanUseCase};
pub use config::Config;
pub use domain::scan::{
    DependencyEdge, LicenseFinding, LicenseSource, Locator, ScanHandle, ScanReport, ScanRequest,
    ScanStatus, Severity, VulnerabilityFinding,
};
pub use infrastructure::{HttpScanApi, PollCoalescer, ReportCache, ScanServiceApi, TransportError};
pub use logging::init_tracing;

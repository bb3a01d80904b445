//! Scan domain: locators, handles, statuses, requests, and reports

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{
    DependencyEdge, LicenseFinding, LicenseSource, ScanReport, ScanRequest, SeverityCounts,
    VulnerabilityFinding,
};
pub use errors::{LocatorError, ScanHandleError, ScanRequestError};
pub use value_objects::{Locator, ScanHandle, ScanStatus, Severity};

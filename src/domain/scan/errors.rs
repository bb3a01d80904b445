//! Scan domain errors

use thiserror::Error;

/// Errors produced while parsing or constructing a [`super::Locator`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocatorError {
    #[error("Locator is missing a fetcher prefix: {input}")]
    MissingFetcher { input: String },

    #[error("Locator has an empty fetcher component: {input}")]
    EmptyFetcher { input: String },

    #[error("Locator has an empty project component: {input}")]
    EmptyProject { input: String },

    #[error("Locator has an empty revision component: {input}")]
    EmptyRevision { input: String },
}

/// Errors produced while constructing a [`super::ScanHandle`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanHandleError {
    #[error("Scan handle must be a non-empty string")]
    Empty,
}

/// Errors produced while constructing a [`super::ScanRequest`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanRequestError {
    #[error("Project locator must carry a revision to be scanned: {locator}")]
    UnrevisionedProject { locator: String },

    #[error("Scan request must contain at least one dependency edge")]
    EmptyGraph,
}

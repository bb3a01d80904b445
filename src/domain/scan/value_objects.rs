//! Scan domain value objects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{LocatorError, ScanHandleError};

/// Structured identifier naming a package or project snapshot.
///
/// The canonical text form is `{fetcher}+{project}${revision}`, e.g.
/// `npm+express$4.17.1` or `git+github.com/acme/api$3f9a2c1`. The revision is
/// optional for package references inside a dependency graph, but a project
/// locator must be revisioned before it can be submitted for scanning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    fetcher: String,
    project: String,
    revision: Option<String>,
}

impl Locator {
    /// Create an unrevisioned locator from fetcher and project components
    pub fn new(
        fetcher: impl Into<String>,
        project: impl Into<String>,
    ) -> Result<Self, LocatorError> {
        let fetcher = fetcher.into();
        let project = project.into();

        if fetcher.is_empty() {
            return Err(LocatorError::EmptyFetcher {
                input: format!("{}+{}", fetcher, project),
            });
        }
        if project.is_empty() {
            return Err(LocatorError::EmptyProject {
                input: format!("{}+{}", fetcher, project),
            });
        }

        Ok(Self {
            fetcher,
            project,
            revision: None,
        })
    }

    /// Attach a revision, consuming the locator
    pub fn with_revision(mut self, revision: impl Into<String>) -> Result<Self, LocatorError> {
        let revision = revision.into();
        if revision.is_empty() {
            return Err(LocatorError::EmptyRevision {
                input: self.to_string(),
            });
        }
        self.revision = Some(revision);
        Ok(self)
    }

    pub fn fetcher(&self) -> &str {
        &self.fetcher
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Whether this locator names a specific snapshot
    pub fn is_revisioned(&self) -> bool {
        self.revision.is_some()
    }
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (fetcher, rest) = input.split_once('+').ok_or_else(|| {
            LocatorError::MissingFetcher {
                input: input.to_string(),
            }
        })?;

        if fetcher.is_empty() {
            return Err(LocatorError::EmptyFetcher {
                input: input.to_string(),
            });
        }

        // The revision separator is the last '$' so that project paths
        // containing '$' still parse.
        let (project, revision) = match rest.rsplit_once('$') {
            Some((project, revision)) => {
                if revision.is_empty() {
                    return Err(LocatorError::EmptyRevision {
                        input: input.to_string(),
                    });
                }
                (project, Some(revision.to_string()))
            }
            None => (rest, None),
        };

        if project.is_empty() {
            return Err(LocatorError::EmptyProject {
                input: input.to_string(),
            });
        }

        Ok(Self {
            fetcher: fetcher.to_string(),
            project: project.to_string(),
            revision,
        })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(revision) => write!(f, "{}+{}${}", self.fetcher, self.project, revision),
            None => write!(f, "{}+{}", self.fetcher, self.project),
        }
    }
}

/// Opaque identifier returned by the scan service upon submission.
///
/// The caller owns the handle for the duration of polling and discards it
/// once a terminal outcome is reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanHandle(String);

impl ScanHandle {
    pub fn new(handle: impl Into<String>) -> Result<Self, ScanHandleError> {
        let handle = handle.into();
        if handle.is_empty() {
            return Err(ScanHandleError::Empty);
        }
        Ok(Self(handle))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScanHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remote scan status as observed by a single status check.
///
/// Transient: produced by each poll call and never persisted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Pending,
    Completed,
    Failed,
}

impl ScanStatus {
    /// Whether this status represents a terminal (final) state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Severity of a vulnerability finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        };
        f.write_str(s)
    }
}

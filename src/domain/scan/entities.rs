//! Scan domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ScanRequestError;
use super::value_objects::{Locator, Severity};

/// One edge of a submitted dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Package this edge points at
    pub package: Locator,
    /// Distance from the project root (direct dependencies are depth 1)
    pub depth: u32,
    /// Locator of the dependent package, `None` for direct dependencies
    pub parent: Option<Locator>,
}

/// Immutable value representing a dependency-graph submission.
///
/// Created once per submission and never mutated. The project locator must
/// name a specific revision and the graph must contain at least one edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    project: Locator,
    edges: Vec<DependencyEdge>,
}

impl ScanRequest {
    pub fn new(project: Locator, edges: Vec<DependencyEdge>) -> Result<Self, ScanRequestError> {
        if !project.is_revisioned() {
            return Err(ScanRequestError::UnrevisionedProject {
                locator: project.to_string(),
            });
        }
        if edges.is_empty() {
            return Err(ScanRequestError::EmptyGraph);
        }
        Ok(Self { project, edges })
    }

    pub fn project(&self) -> &Locator {
        &self.project
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }
}

/// A known vulnerability affecting a package in the scanned graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityFinding {
    /// Advisory identifier (e.g. CVE or GHSA id)
    pub id: String,
    pub package: Locator,
    pub severity: Severity,
    pub title: String,
    pub references: Vec<String>,
}

/// How a license observation was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseSource {
    /// Stated in package metadata
    Declared,
    /// Detected in source or distribution files
    Discovered,
}

/// A license observed on a package in the scanned graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseFinding {
    pub package: Locator,
    /// SPDX identifier where available
    pub license_id: String,
    pub source: LicenseSource,
}

/// Finding counts broken down by severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

/// Terminal result of a completed scan.
///
/// Immutable once received; the report always corresponds to a status check
/// that observed [`super::ScanStatus::Completed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub project: Locator,
    pub vulnerabilities: Vec<VulnerabilityFinding>,
    pub licenses: Vec<LicenseFinding>,
    pub generated_at: DateTime<Utc>,
}

impl ScanReport {
    /// Count vulnerability findings by severity
    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for finding in &self.vulnerabilities {
            match finding.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    pub fn total_findings(&self) -> usize {
        self.vulnerabilities.len() + self.licenses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Locator {
        "git+github.com/acme/api$3f9a2c1".parse().unwrap()
    }

    fn edge(locator: &str, depth: u32) -> DependencyEdge {
        DependencyEdge {
            package: locator.parse().unwrap(),
            depth,
            parent: None,
        }
    }

    #[test]
    fn test_scan_request_requires_revisioned_project() {
        let unrevisioned: Locator = "git+github.com/acme/api".parse().unwrap();
        let err = ScanRequest::new(unrevisioned, vec![edge("npm+express$4.17.1", 1)]).unwrap_err();
        assert!(matches!(err, ScanRequestError::UnrevisionedProject { .. }));
    }

    #[test]
    fn test_scan_request_requires_edges() {
        let err = ScanRequest::new(project(), vec![]).unwrap_err();
        assert_eq!(err, ScanRequestError::EmptyGraph);
    }

    #[test]
    fn test_scan_request_accessors() {
        let request = ScanRequest::new(
            project(),
            vec![edge("npm+express$4.17.1", 1), edge("npm+lodash$4.17.21", 2)],
        )
        .unwrap();
        assert_eq!(request.project().project(), "github.com/acme/api");
        assert_eq!(request.edges().len(), 2);
    }

    #[test]
    fn test_report_severity_counts() {
        let finding = |severity| VulnerabilityFinding {
            id: "GHSA-xxxx-xxxx-xxxx".to_string(),
            package: "npm+express$4.17.1".parse().unwrap(),
            severity,
            title: "test".to_string(),
            references: vec![],
        };
        let report = ScanReport {
            project: project(),
            vulnerabilities: vec![
                finding(Severity::Critical),
                finding(Severity::High),
                finding(Severity::High),
                finding(Severity::Low),
            ],
            licenses: vec![LicenseFinding {
                package: "npm+express$4.17.1".parse().unwrap(),
                license_id: "MIT".to_string(),
                source: LicenseSource::Declared,
            }],
            generated_at: Utc::now(),
        };

        let counts = report.severity_counts();
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.high, 2);
        assert_eq!(counts.medium, 0);
        assert_eq!(counts.low, 1);
        assert_eq!(report.total_findings(), 5);
    }

    #[test]
    fn test_report_serialization_round_trip() {
        let report = ScanReport {
            project: project(),
            vulnerabilities: vec![],
            licenses: vec![],
            generated_at: Utc::now(),
        };
        let serialized = serde_json::to_string(&report).unwrap();
        let deserialized: ScanReport = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, report);
    }
}

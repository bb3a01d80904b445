//! Test data factories for scan domain objects

use chrono::Utc;
use graphscan_client::{
    DependencyEdge, LicenseFinding, LicenseSource, Locator, ScanHandle, ScanReport, ScanRequest,
    Severity, VulnerabilityFinding,
};

pub fn project_locator() -> Locator {
    "git+github.com/acme/api$3f9a2c1".parse().unwrap()
}

pub fn package_locator(name: &str, version: &str) -> Locator {
    format!("npm+{}${}", name, version).parse().unwrap()
}

pub fn sample_handle() -> ScanHandle {
    ScanHandle::new("scan-abc123").unwrap()
}

pub fn sample_request() -> ScanRequest {
    let edges = vec![
        DependencyEdge {
            package: package_locator("express", "4.17.1"),
            depth: 1,
            parent: None,
        },
        DependencyEdge {
            package: package_locator("qs", "6.5.2"),
            depth: 2,
            parent: Some(package_locator("express", "4.17.1")),
        },
    ];
    ScanRequest::new(project_locator(), edges).unwrap()
}

pub fn sample_report() -> ScanReport {
    ScanReport {
        project: project_locator(),
        vulnerabilities: vec![VulnerabilityFinding {
            id: "GHSA-hrpp-h998-j3pp".to_string(),
            package: package_locator("qs", "6.5.2"),
            severity: Severity::High,
            title: "qs vulnerable to prototype poisoning".to_string(),
            references: vec!["https://github.com/advisories/GHSA-hrpp-h998-j3pp".to_string()],
        }],
        licenses: vec![
            LicenseFinding {
                package: package_locator("express", "4.17.1"),
                license_id: "MIT".to_string(),
                source: LicenseSource::Declared,
            },
            LicenseFinding {
                package: package_locator("qs", "6.5.2"),
                license_id: "BSD-3-Clause".to_string(),
                source: LicenseSource::Discovered,
            },
        ],
        generated_at: Utc::now(),
    }
}

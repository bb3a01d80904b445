//! HTTP implementation of the scan service API
//!
//! Wire DTOs are kept separate from the domain model; locators travel as
//! canonical strings and are parsed at the boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ScanServiceApi, TransportError};
use crate::config::ApiConfig;
use crate::domain::scan::{
    DependencyEdge, LicenseFinding, LicenseSource, Locator, ScanHandle, ScanReport, ScanRequest,
    ScanStatus, Severity, VulnerabilityFinding,
};

#[derive(Debug, Serialize)]
struct SubmitScanBody {
    locator: String,
    dependencies: Vec<WireEdge>,
}

#[derive(Debug, Serialize)]
struct WireEdge {
    locator: String,
    depth: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitScanResponse {
    handle: String,
}

#[derive(Debug, Serialize)]
struct ScanStatusBody<'a> {
    handle: &'a str,
}

#[derive(Debug, Deserialize)]
struct ScanStatusResponse {
    status: ScanStatus,
}

#[derive(Debug, Deserialize)]
struct WireReport {
    project: String,
    #[serde(default)]
    vulnerabilities: Vec<WireVulnerability>,
    #[serde(default)]
    licenses: Vec<WireLicense>,
    generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct WireVulnerability {
    id: String,
    locator: String,
    severity: Severity,
    title: String,
    #[serde(default)]
    references: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireLicense {
    locator: String,
    license: String,
    source: LicenseSource,
}

/// reqwest-backed client for the scan service.
///
/// Holds the bearer token and owns the connection pool; safe to share across
/// concurrent polling loops.
pub struct HttpScanApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpScanApi {
    /// Create a new client from API configuration
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn bearer_token(&self) -> Result<&str, TransportError> {
        if self.token.is_empty() {
            return Err(TransportError::Http {
                status: 401,
                message: "Missing scan service token; set GRAPHSCAN__API__TOKEN".to_string(),
            });
        }
        Ok(&self.token)
    }

    async fn error_for_status(response: reqwest::Response) -> TransportError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        TransportError::Http { status, message }
    }

    fn parse_locator(input: &str) -> Result<Locator, TransportError> {
        input
            .parse()
            .map_err(|e| TransportError::Decode(format!("bad locator '{}': {}", input, e)))
    }

    fn convert_report(wire: WireReport) -> Result<ScanReport, TransportError> {
        let project = Self::parse_locator(&wire.project)?;

        let vulnerabilities = wire
            .vulnerabilities
            .into_iter()
            .map(|v| {
                Ok(VulnerabilityFinding {
                    id: v.id,
                    package: Self::parse_locator(&v.locator)?,
                    severity: v.severity,
                    title: v.title,
                    references: v.references,
                })
            })
            .collect::<Result<Vec<_>, TransportError>>()?;

        let licenses = wire
            .licenses
            .into_iter()
            .map(|l| {
                Ok(LicenseFinding {
                    package: Self::parse_locator(&l.locator)?,
                    license_id: l.license,
                    source: l.source,
                })
            })
            .collect::<Result<Vec<_>, TransportError>>()?;

        Ok(ScanReport {
            project,
            vulnerabilities,
            licenses,
            generated_at: wire.generated_at,
        })
    }

    fn convert_edges(edges: &[DependencyEdge]) -> Vec<WireEdge> {
        edges
            .iter()
            .map(|edge| WireEdge {
                locator: edge.package.to_string(),
                depth: edge.depth,
                parent: edge.parent.as_ref().map(|p| p.to_string()),
            })
            .collect()
    }
}

#[async_trait]
impl ScanServiceApi for HttpScanApi {
    async fn submit_scan(&self, request: &ScanRequest) -> Result<ScanHandle, TransportError> {
        let token = self.bearer_token()?;
        let body = SubmitScanBody {
            locator: request.project().to_string(),
            dependencies: Self::convert_edges(request.edges()),
        };

        let response = self
            .client
            .post(format!("{}/scans", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let parsed: SubmitScanResponse = response.json().await?;
        ScanHandle::new(parsed.handle)
            .map_err(|e| TransportError::Decode(format!("bad scan handle: {}", e)))
    }

    async fn scan_status(&self, handle: &ScanHandle) -> Result<ScanStatus, TransportError> {
        let token = self.bearer_token()?;
        let body = ScanStatusBody {
            handle: handle.as_str(),
        };

        let response = self
            .client
            .post(format!("{}/scan-status", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let parsed: ScanStatusResponse = response.json().await?;
        Ok(parsed.status)
    }

    async fn scan_report(&self, handle: &ScanHandle) -> Result<ScanReport, TransportError> {
        let token = self.bearer_token()?;

        let response = self
            .client
            .get(format!("{}/scan-report", self.base_url))
            .query(&[("handle", handle.as_str())])
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let wire: WireReport = response.json().await?;
        Self::convert_report(wire)
    }
}

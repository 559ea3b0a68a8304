// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::platform::ScanReport;

#[derive(Debug, Clone)]
/// Annotates scan findings with risk scores from the vulnerability
/// intelligence service.
///
/// The lookup itself is not wired up yet. The traversal locates the CVE ids
/// a report carries, but no score is attached and the report is returned
/// unchanged.
pub struct GtiEnricher {
    api_key: Option<String>,
    #[allow(dead_code)]
    client: reqwest::Client,
}

impl GtiEnricher {
    pub fn from_config(config: &crate::config::Enrichment) -> Self {
        if config.api_key.is_none() {
            tracing::warn!("VT_API_KEY not set. Enrichment will be skipped.");
        }
        Self {
            api_key: config.api_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// An enricher without an api key, it skips enrichment entirely.
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    pub async fn enrich_vulnerabilities(&self, report: ScanReport) -> ScanReport {
        if self.api_key.is_none() {
            return report;
        }
        if let Some(findings) = report.get("scanFindings").and_then(|f| f.as_array()) {
            for finding in findings {
                let cve_id = finding
                    .get("vulnerability")
                    .and_then(|v| v.get("cveId"))
                    .and_then(|c| c.as_str());
                if let Some(cve_id) = cve_id {
                    // TODO query the intelligence API for the CVE and attach
                    // the score as gtiRiskScore once the endpoint is settled
                    tracing::debug!("risk score lookup for {} not implemented yet", cve_id);
                }
            }
        }
        report
    }

    /// Placeholder until the intelligence API lookup is implemented.
    #[allow(dead_code)]
    async fn risk_score(&self, _cve_id: &str) -> f64 {
        9.5
    }
}

// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{results_blob_name, Error, JobStarter, ResultsFetcher, ScanReport};

#[derive(Debug, Default)]
/// In-process stand-in for the cloud backends.
///
/// Instead of triggering a job run it seeds a fixed results blob right away,
/// so the results page can be exercised without any cloud access.
pub struct LocalPlatform {
    blobs: RwLock<HashMap<String, String>>,
}

fn mock_report() -> ScanReport {
    serde_json::json!({
        "scanStatus": "COMPLETED",
        "scanFindings": [
            {
                "vulnerability": {
                    "cveId": "CVE-2023-1234",
                    "title": "Mock Vulnerability in Test",
                    "description": "This is a simulated vulnerability found in local mode.",
                    "rating": "HIGH"
                }
            },
            {
                "vulnerability": {
                    "cveId": "CVE-2024-5678",
                    "title": "Another Mock Issue",
                    "description": "Simulated low risk issue.",
                    "rating": "LOW"
                }
            }
        ]
    })
}

#[async_trait]
impl JobStarter for LocalPlatform {
    async fn start_job(&self, target: &str) -> Result<String, Error> {
        let execution_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(
            "[mock] triggering job for target {} with id {}",
            target,
            execution_id
        );
        let mut blobs = self.blobs.write().await;
        blobs.insert(
            results_blob_name(&execution_id),
            serde_json::to_string(&mock_report())?,
        );
        Ok(execution_id)
    }
}

#[async_trait]
impl ResultsFetcher for LocalPlatform {
    async fn fetch_results<I>(&self, execution_id: I) -> Result<ScanReport, Error>
    where
        I: AsRef<str> + Send + 'static,
    {
        let blob = results_blob_name(execution_id.as_ref());
        tracing::info!("[mock] reading {} from mock storage", blob);
        let blobs = self.blobs.read().await;
        match blobs.get(&blob) {
            Some(content) => Ok(serde_json::from_str(content)?),
            None => Err(Error::NotFound(blob)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_results_on_start() {
        let platform = LocalPlatform::default();
        let id = platform.start_job("127.0.0.1").await.unwrap();
        let report = platform.fetch_results(id).await.unwrap();
        assert_eq!(
            report.get("scanStatus").and_then(|s| s.as_str()),
            Some("COMPLETED")
        );
        let findings = report
            .get("scanFindings")
            .and_then(|f| f.as_array())
            .unwrap();
        assert_eq!(findings.len(), 2);
    }

    #[tokio::test]
    async fn unknown_execution_is_not_found() {
        let platform = LocalPlatform::default();
        match platform.fetch_results("no-such-execution").await {
            Err(Error::NotFound(blob)) => assert_eq!(blob, "no-such-execution.json"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn executions_do_not_share_blobs() {
        let platform = LocalPlatform::default();
        let a = platform.start_job("a.example").await.unwrap();
        let b = platform.start_job("b.example").await.unwrap();
        assert_ne!(a, b);
        assert!(platform.fetch_results(a).await.is_ok());
        assert!(platform.fetch_results(b).await.is_ok());
    }
}

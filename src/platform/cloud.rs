// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

use async_trait::async_trait;

use super::{results_blob_name, Error, JobStarter, ResultsFetcher, ScanReport};

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

#[derive(Debug, Clone)]
/// Wrapper around the managed job execution and object storage APIs.
///
/// Job runs are triggered through the Cloud Run Admin API, result blobs are
/// read through the Cloud Storage JSON API. Credentials come from the
/// instance metadata server, so this only works when running on the
/// platform itself.
pub struct CloudPlatform {
    client: reqwest::Client,
    project_id: Option<String>,
    region: String,
    job_name: Option<String>,
    bucket: Option<String>,
}

#[derive(serde::Deserialize)]
struct AccessToken {
    access_token: String,
}

impl CloudPlatform {
    pub fn from_config(config: &crate::config::Platform) -> Self {
        Self {
            client: reqwest::Client::new(),
            project_id: config.project_id.clone(),
            region: config.region.clone(),
            job_name: config.job_name.clone(),
            bucket: config.bucket.clone(),
        }
    }

    /// Full resource name of the scanner job.
    ///
    /// Checked at call time, a portal in local mode never needs it.
    fn job_resource(&self) -> Result<String, Error> {
        match (&self.project_id, &self.job_name) {
            (Some(project), Some(job)) => Ok(format!(
                "projects/{}/locations/{}/jobs/{}",
                project, self.region, job
            )),
            (None, _) => Err(Error::MissingConfig("PROJECT_ID")),
            (_, None) => Err(Error::MissingConfig("SCANNER_JOB_NAME")),
        }
    }

    fn bucket(&self) -> Result<&str, Error> {
        self.bucket
            .as_deref()
            .ok_or(Error::MissingConfig("GCS_BUCKET"))
    }

    async fn access_token(&self) -> Result<String, Error> {
        let token: AccessToken = self
            .client
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl JobStarter for CloudPlatform {
    async fn start_job(&self, target: &str) -> Result<String, Error> {
        let job = self.job_resource()?;
        let bucket = self.bucket()?.to_string();
        let execution_id = uuid::Uuid::new_v4().to_string();
        let token = self.access_token().await?;
        // the job learns its output blob name through EXECUTION_ID
        let overrides = serde_json::json!({
            "overrides": {
                "containerOverrides": [{
                    "env": [
                        { "name": "TARGET", "value": target },
                        { "name": "EXECUTION_ID", "value": execution_id },
                        { "name": "GCS_BUCKET", "value": bucket },
                    ]
                }]
            }
        });
        self.client
            .post(format!("https://run.googleapis.com/v2/{}:run", job))
            .bearer_auth(token)
            .json(&overrides)
            .send()
            .await?
            .error_for_status()?;
        tracing::info!(
            "job triggered for target {}, execution id {}",
            target,
            execution_id
        );
        Ok(execution_id)
    }
}

#[async_trait]
impl ResultsFetcher for CloudPlatform {
    async fn fetch_results<I>(&self, execution_id: I) -> Result<ScanReport, Error>
    where
        I: AsRef<str> + Send + 'static,
    {
        let blob = results_blob_name(execution_id.as_ref());
        let bucket = self.bucket()?;
        let token = self.access_token().await?;
        let resp = self
            .client
            .get(format!(
                "https://storage.googleapis.com/storage/v1/b/{}/o/{}",
                bucket,
                urlencoding::encode(&blob)
            ))
            .query(&[("alt", "media")])
            .bearer_auth(token)
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(blob));
        }
        let report = resp.error_for_status()?.json().await?;
        Ok(report)
    }
}

// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

pub mod cloud;
pub mod local;

use async_trait::async_trait;

/// A scan result document as stored by the scanner job.
///
/// The scanner does not promise a schema, so the document is kept as raw
/// JSON and fields are extracted best effort when rendering.
pub type ScanReport = serde_json::Value;

#[derive(Debug)]
pub enum Error {
    /// A required platform setting is not configured.
    MissingConfig(&'static str),
    /// The results blob does not exist (yet).
    NotFound(String),
    Unexpected(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingConfig(setting) => {
                write!(f, "Platform configuration missing ({})", setting)
            }
            Self::NotFound(blob) => write!(f, "Result file {} not found", blob),
            Self::Unexpected(e) => write!(f, "{}", e),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Unexpected(format!("{value}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unexpected(format!("{value}"))
    }
}

/// Triggers a scanner job run.
#[async_trait]
pub trait JobStarter {
    /// Starts a job for the given target and returns the execution id.
    async fn start_job(&self, target: &str) -> Result<String, Error>;
}

/// Reads back the results blob a job run stored.
#[async_trait]
pub trait ResultsFetcher {
    /// Fetches the results blob of an execution.
    async fn fetch_results<I>(&self, execution_id: I) -> Result<ScanReport, Error>
    where
        I: AsRef<str> + Send + 'static;
}

/// The blob name a job run stores its results under.
pub fn results_blob_name(execution_id: &str) -> String {
    format!("{}.json", execution_id)
}

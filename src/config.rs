// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

use std::{
    fmt::{self, Display, Formatter},
    net::SocketAddr,
};

use clap::ArgAction;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Listener {
    pub address: SocketAddr,
}

impl Default for Listener {
    fn default() -> Self {
        Self {
            address: ([127, 0, 0, 1], 3000).into(),
        }
    }
}

/// Settings for the job execution and object storage backends.
///
/// When `local_mode` is set the cloud settings are ignored and mock
/// in-process backends are used instead.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Platform {
    pub local_mode: bool,
    #[serde(default)]
    pub project_id: Option<String>,
    pub region: String,
    #[serde(default)]
    pub job_name: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            local_mode: false,
            project_id: None,
            region: "us-central1".to_string(),
            job_name: None,
            bucket: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Enrichment {
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub listener: Listener,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub enrichment: Enrichment,
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", toml::to_string_pretty(self).unwrap_or_default())
    }
}

impl Config {
    fn load_etc() -> Option<Self> {
        let config = std::fs::read_to_string("/etc/scan-portal/scan-portal.toml")
            .unwrap_or_default();
        toml::from_str(&config).ok()
    }

    fn load_user() -> Option<Self> {
        match std::env::var("HOME") {
            Ok(home) => {
                let path = format!("{}/.config/scan-portal/scan-portal.toml", home);
                let config = std::fs::read_to_string(path).unwrap_or_default();
                toml::from_str(&config).ok()
            }
            Err(_) => None,
        }
    }

    fn from_file<P>(path: P) -> Self
    where
        P: AsRef<std::path::Path> + std::fmt::Display,
    {
        tracing::debug!("loading config from {}", path);
        let config = std::fs::read_to_string(path).unwrap_or_default();
        toml::from_str(&config).unwrap_or_default()
    }

    pub fn load() -> Self {
        let cmds = clap::Command::new("scan-portal")
            .arg(
                clap::Arg::new("config")
                    .short('c')
                    .env("SCAN_PORTAL_CONFIG")
                    .long("config")
                    .action(ArgAction::Set)
                    .help("path to toml config file"),
            )
            .arg(
                clap::Arg::new("listening")
                    .env("LISTENING")
                    .long("listening")
                    .short('l')
                    .value_name("IP:PORT")
                    .value_parser(clap::value_parser!(SocketAddr))
                    .help("the address to listen to (e.g. 127.0.0.1:3000 or 0.0.0.0:3000)."),
            )
            .arg(
                clap::Arg::new("local-mode")
                    .env("LOCAL_MODE")
                    .long("local-mode")
                    .action(ArgAction::SetTrue)
                    .help("use mock in-process backends instead of the cloud platform"),
            )
            .arg(
                clap::Arg::new("project-id")
                    .env("PROJECT_ID")
                    .long("project-id")
                    .action(ArgAction::Set)
                    .help("cloud project that hosts the scanner job"),
            )
            .arg(
                clap::Arg::new("region")
                    .env("REGION")
                    .long("region")
                    .action(ArgAction::Set)
                    .help("region of the scanner job"),
            )
            .arg(
                clap::Arg::new("job-name")
                    .env("SCANNER_JOB_NAME")
                    .long("job-name")
                    .action(ArgAction::Set)
                    .help("name of the scanner job to trigger"),
            )
            .arg(
                clap::Arg::new("bucket")
                    .env("GCS_BUCKET")
                    .long("bucket")
                    .action(ArgAction::Set)
                    .help("bucket the scanner job writes result blobs to"),
            )
            .arg(
                clap::Arg::new("vt-api-key")
                    .env("VT_API_KEY")
                    .long("vt-api-key")
                    .action(ArgAction::Set)
                    .help("API key for the vulnerability intelligence service"),
            )
            .get_matches();
        let mut config = match cmds.get_one::<String>("config") {
            Some(path) => Self::from_file(path),
            None => {
                if let Some(config) = Self::load_user() {
                    config
                } else {
                    Self::load_etc().unwrap_or_default()
                }
            }
        };
        if let Some(ip) = cmds.get_one::<SocketAddr>("listening") {
            config.listener.address = *ip;
        }
        if let Some(enable) = cmds.get_one::<bool>("local-mode") {
            if *enable {
                config.platform.local_mode = true;
            }
        }
        if let Some(project_id) = cmds.get_one::<String>("project-id") {
            config.platform.project_id = Some(project_id.clone());
        }
        if let Some(region) = cmds.get_one::<String>("region") {
            config.platform.region = region.clone();
        }
        if let Some(job_name) = cmds.get_one::<String>("job-name") {
            config.platform.job_name = Some(job_name.clone());
        }
        if let Some(bucket) = cmds.get_one::<String>("bucket") {
            config.platform.bucket = Some(bucket.clone());
        }
        if let Some(api_key) = cmds.get_one::<String>("vt-api-key") {
            config.enrichment.api_key = Some(api_key.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {

    #[test]
    fn defaults() {
        let config = super::Config::default();
        assert_eq!(
            config.listener.address,
            std::net::SocketAddr::from(([127, 0, 0, 1], 3000))
        );
        assert!(!config.platform.local_mode);
        assert_eq!(config.platform.region, "us-central1");
        assert!(config.platform.project_id.is_none());
        assert!(config.enrichment.api_key.is_none());
    }

    #[test]
    fn parses_partial_toml() {
        let raw = r#"
[platform]
local_mode = true
region = "europe-west1"
bucket = "scan-results"
"#;
        let config: super::Config = toml::from_str(raw).unwrap();
        assert!(config.platform.local_mode);
        assert_eq!(config.platform.region, "europe-west1");
        assert_eq!(config.platform.bucket.as_deref(), Some("scan-results"));
        // untouched sections keep their defaults
        assert_eq!(
            config.listener.address,
            std::net::SocketAddr::from(([127, 0, 0, 1], 3000))
        );
    }
}

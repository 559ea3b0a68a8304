// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Defines the entry point for the controller.
//!
//! All known paths must be handled in the entrypoint function.

use std::{convert::Infallible, fmt::Display, sync::Arc};

use hyper::{Body, Method, Request, Response};

use super::context::Context;
use crate::{platform, templates};

/// The supported paths of the portal
enum KnownPaths {
    /// /
    Home,
    /// /scan
    Scan,
    /// /results/{execution_id}
    Results(String),
    /// /health
    Health,
    /// Not supported
    Unknown,
}

impl KnownPaths {
    /// Parses a path and returns the corresponding `KnownPaths` variant.
    fn from_path(path: &str) -> Self {
        let mut parts = path.split('/').filter(|s| !s.is_empty());
        match parts.next() {
            None => KnownPaths::Home,
            Some("scan") => match parts.next() {
                None => KnownPaths::Scan,
                Some(_) => KnownPaths::Unknown,
            },
            Some("results") => match (parts.next(), parts.next()) {
                (Some(id), None) => KnownPaths::Results(id.to_string()),
                _ => KnownPaths::Unknown,
            },
            Some("health") => match parts.next() {
                None => KnownPaths::Health,
                Some(_) => KnownPaths::Unknown,
            },
            _ => {
                tracing::trace!("Unknown path: {path}");
                KnownPaths::Unknown
            }
        }
    }
}

impl Display for KnownPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KnownPaths::Home => write!(f, "/"),
            KnownPaths::Scan => write!(f, "/scan"),
            KnownPaths::Results(id) => write!(f, "/results/{}", id),
            KnownPaths::Health => write!(f, "/health"),
            KnownPaths::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Is used to handle all incoming requests.
pub async fn entrypoint<P>(
    req: Request<Body>,
    ctx: Arc<Context<P>>,
) -> Result<Response<Body>, Infallible>
where
    P: super::Platform + Send + Sync + 'static,
{
    use KnownPaths::*;
    if req.method() == Method::HEAD {
        return Ok(ctx.response.empty(hyper::StatusCode::OK));
    }
    let kp = KnownPaths::from_path(req.uri().path());
    tracing::debug!("{} {}", req.method(), kp);
    match (req.method(), kp) {
        (&Method::GET, Home) => Ok(ctx.response.ok_html(templates::home())),
        (&Method::POST, Scan) => {
            let fields = match crate::request::form_request(&ctx.response, req).await {
                Ok(fields) => fields,
                Err(resp) => return Ok(resp),
            };
            let target = fields
                .get("target")
                .map(|t| t.trim())
                .filter(|t| !t.is_empty());
            let target = match target {
                Some(target) => target,
                None => {
                    return Ok(ctx
                        .response
                        .bad_request("A target is required to start a scan."));
                }
            };
            match ctx.platform.start_job(target).await {
                Ok(execution_id) => Ok(ctx
                    .response
                    .ok_html(templates::scan_started(target, &execution_id))),
                Err(e) => {
                    tracing::warn!("Failed to start scan for {}: {}", target, e);
                    Ok(ctx.response.html(
                        hyper::StatusCode::BAD_GATEWAY,
                        templates::error(&format!("Failed to start scan: {}", e)),
                    ))
                }
            }
        }
        (&Method::GET, Results(execution_id)) => {
            match ctx.platform.fetch_results(execution_id.clone()).await {
                Ok(report) => {
                    let report = ctx.enricher.enrich_vulnerabilities(report).await;
                    Ok(ctx
                        .response
                        .ok_html(templates::results(&execution_id, &report, true)))
                }
                Err(e @ platform::Error::NotFound(_)) => Ok(ctx.response.html(
                    hyper::StatusCode::NOT_FOUND,
                    templates::error(&format!("Results not ready or not found: {}", e)),
                )),
                Err(e) => Ok(ctx.response.internal_server_error(&e)),
            }
        }
        (&Method::GET, Health) => {
            #[derive(serde::Serialize, Debug)]
            struct Status {
                status: &'static str,
            }
            Ok(ctx.response.ok(&Status { status: "ok" }))
        }
        _ => Ok(ctx.response.html(
            hyper::StatusCode::NOT_FOUND,
            templates::error("This page does not exist."),
        )),
    }
}

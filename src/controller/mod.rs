// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

mod context;
mod entry;

use crate::platform::{JobStarter, ResultsFetcher};
pub use context::{Context, ContextBuilder};
pub use entry::entrypoint;

/// Combines all traits needed for a platform.
pub trait Platform: JobStarter + ResultsFetcher {}

impl<T> Platform for T where T: JobStarter + ResultsFetcher {}

/// Creates a hyper service that dispatches every request to [`entrypoint`].
macro_rules! make_svc {
    ($controller:expr) => {{
        let controller = std::sync::Arc::clone($controller);
        hyper::service::make_service_fn(move |_conn| {
            let controller = std::sync::Arc::clone(&controller);
            async move {
                Ok::<_, std::convert::Infallible>(hyper::service::service_fn(move |req| {
                    crate::controller::entrypoint(req, std::sync::Arc::clone(&controller))
                }))
            }
        })
    }};
}
pub(crate) use make_svc;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use hyper::{Body, Method, Request, Response};

    use super::context::Context;
    use super::entry::entrypoint;
    use crate::platform::{self, local::LocalPlatform, ScanReport};

    #[derive(Debug, Clone, Default)]
    struct BrokenPlatform;

    #[async_trait]
    impl platform::JobStarter for BrokenPlatform {
        async fn start_job(&self, _target: &str) -> Result<String, platform::Error> {
            Err(platform::Error::MissingConfig("PROJECT_ID"))
        }
    }

    #[async_trait]
    impl platform::ResultsFetcher for BrokenPlatform {
        async fn fetch_results<I>(&self, _execution_id: I) -> Result<ScanReport, platform::Error>
        where
            I: AsRef<str> + Send + 'static,
        {
            Err(platform::Error::Unexpected("backend gone".to_string()))
        }
    }

    async fn get<P>(path: &str, ctx: Arc<Context<P>>) -> Response<Body>
    where
        P: super::Platform + Send + Sync + 'static,
    {
        let req = Request::builder()
            .uri(path)
            .method(Method::GET)
            .body(Body::empty())
            .unwrap();
        entrypoint(req, ctx).await.unwrap()
    }

    async fn post_form<P>(path: &str, body: &str, ctx: Arc<Context<P>>) -> Response<Body>
    where
        P: super::Platform + Send + Sync + 'static,
    {
        let req = Request::builder()
            .uri(path)
            .method(Method::POST)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        entrypoint(req, ctx).await.unwrap()
    }

    async fn body_string(resp: Response<Body>) -> String {
        let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Pulls the execution id out of the confirmation page link.
    fn execution_id(confirmation: &str) -> String {
        let start = confirmation.find("/results/").unwrap() + "/results/".len();
        confirmation[start..]
            .chars()
            .take_while(|c| *c != '"')
            .collect()
    }

    #[tokio::test]
    async fn contains_version() {
        let controller = Arc::new(Context::<LocalPlatform>::default());
        let req = Request::builder()
            .method(Method::HEAD)
            .body(Body::empty())
            .unwrap();
        let resp = entrypoint(req, Arc::clone(&controller)).await.unwrap();
        assert_eq!(resp.headers().get("app-version").unwrap(), "1");
    }

    #[tokio::test]
    async fn home_renders_the_scan_form() {
        let controller = Arc::new(Context::<LocalPlatform>::default());
        let resp = get("/", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        let body = body_string(resp).await;
        assert!(body.contains("action=\"/scan\""));
    }

    #[tokio::test]
    async fn health() {
        let controller = Arc::new(Context::<LocalPlatform>::default());
        let resp = get("/health", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_string(resp).await, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn scan_requires_a_target() {
        let controller = Arc::new(Context::<LocalPlatform>::default());
        let resp = post_form("/scan", "", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 400);
        let resp = post_form("/scan", "target=++", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn scan_then_results() {
        let controller = Arc::new(Context::<LocalPlatform>::default());
        let resp = post_form("/scan", "target=127.0.0.1", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 200);
        let confirmation = body_string(resp).await;
        assert!(confirmation.contains("127.0.0.1"));
        let id = execution_id(&confirmation);
        let resp = get(&format!("/results/{id}"), Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 200);
        let body = body_string(resp).await;
        assert!(body.contains("CVE-2023-1234"));
        assert!(body.contains("CVE-2024-5678"));
        assert!(body.contains("COMPLETED"));
    }

    #[tokio::test]
    async fn results_of_unknown_execution_are_not_found() {
        let controller = Arc::new(Context::<LocalPlatform>::default());
        let resp = get("/results/definitely-unknown", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 404);
        let body = body_string(resp).await;
        assert!(body.contains("Results not ready or not found"));
    }

    #[tokio::test]
    async fn failed_job_start_renders_the_error_page() {
        let ctx = super::ContextBuilder::new()
            .platform(BrokenPlatform)
            .build();
        let controller = Arc::new(ctx);
        let resp = post_form("/scan", "target=127.0.0.1", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 502);
        let body = body_string(resp).await;
        assert!(body.contains("Failed to start scan"));
    }

    #[tokio::test]
    async fn broken_results_backend_is_an_internal_error() {
        let ctx = super::ContextBuilder::new()
            .platform(BrokenPlatform)
            .build();
        let controller = Arc::new(ctx);
        let resp = get("/results/abc", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 500);
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let controller = Arc::new(Context::<LocalPlatform>::default());
        let resp = get("/scans/are/not/a/thing", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 404);
        let resp = get("/results", Arc::clone(&controller)).await;
        assert_eq!(resp.status(), 404);
    }
}

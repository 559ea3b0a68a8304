// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

mod config;
mod controller;
mod enrichment;
mod platform;
mod request;
mod response;
mod templates;

use crate::platform::{cloud::CloudPlatform, local::LocalPlatform};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::metadata::LevelFilter::INFO.into())
        .with_env_var("SCAN_PORTAL_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let config = config::Config::load();
    if config.platform.local_mode {
        tracing::info!("local mode enabled, using mock platform backends");
        serve(LocalPlatform::default(), &config).await
    } else {
        serve(CloudPlatform::from_config(&config.platform), &config).await
    }
}

async fn serve<P>(
    platform: P,
    config: &config::Config,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    P: controller::Platform + std::fmt::Debug + Send + Sync + 'static,
{
    let enricher = enrichment::GtiEnricher::from_config(&config.enrichment);
    let ctx = controller::ContextBuilder::new()
        .enricher(enricher)
        .platform(platform)
        .build();
    let controller = std::sync::Arc::new(ctx);
    let incoming = hyper::server::conn::AddrIncoming::bind(&config.listener.address)?;
    let addr = incoming.local_addr();
    let make_svc = crate::controller::make_svc!(&controller);
    let server = hyper::Server::builder(incoming).serve(make_svc);
    tracing::info!("listening on http://{}", addr);
    server.await?;
    Ok(())
}

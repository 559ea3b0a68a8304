// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{enrichment::GtiEnricher, platform::local::LocalPlatform, response};

#[derive(Debug, Clone)]
pub struct NoPlatform;
#[derive(Debug, Clone)]
pub struct Platform<P>(P);

#[derive(Debug, Clone)]
/// Context builder is used to build the context of the application.
pub struct ContextBuilder<P, T> {
    platform: T,
    enricher: Option<GtiEnricher>,
    marker: std::marker::PhantomData<P>,
    response: response::Response,
}

impl<P> ContextBuilder<P, NoPlatform> {
    /// Creates a new context builder.
    pub fn new() -> Self {
        Self {
            platform: NoPlatform,
            enricher: None,
            marker: std::marker::PhantomData,
            response: response::Response::default(),
        }
    }
}

impl<P, T> ContextBuilder<P, T> {
    /// Sets the enricher used on the results page.
    pub fn enricher(mut self, enricher: GtiEnricher) -> Self {
        self.enricher = Some(enricher);
        self
    }
}

impl<P> ContextBuilder<P, NoPlatform> {
    /// Sets the platform. This is required.
    pub fn platform(self, platform: P) -> ContextBuilder<P, Platform<P>>
    where
        P: super::Platform + std::fmt::Debug + Send + Sync + 'static,
    {
        let Self {
            platform: _,
            enricher,
            marker: _,
            response,
        } = self;
        ContextBuilder {
            platform: Platform(platform),
            enricher,
            marker: std::marker::PhantomData,
            response,
        }
    }
}

impl<P> ContextBuilder<P, Platform<P>> {
    pub fn build(self) -> Context<P> {
        Context {
            platform: self.platform.0,
            response: self.response,
            enricher: self.enricher.unwrap_or_else(GtiEnricher::disabled),
        }
    }
}

#[derive(Debug)]
/// The context of the application
pub struct Context<P> {
    /// The platform that triggers jobs and fetches their results.
    pub platform: P,
    /// Creates responses
    pub response: response::Response,
    /// Annotates results before they are rendered.
    pub enricher: GtiEnricher,
}

impl Default for Context<LocalPlatform> {
    fn default() -> Self {
        ContextBuilder::new().platform(Default::default()).build()
    }
}

pub mod client;

use crate::config::{TargetConfig, UpstreamConfig};
use crate::error::Result;
use async_trait::async_trait;
use axum::body::Bytes;
use std::time::Duration;

pub use client::HttpFetcher;

/// A single upstream the relay reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub url: String,
    /// Value sent as the `Accept` header
    pub accept: String,
    pub timeout: Duration,
}

impl UpstreamTarget {
    pub fn from_config(config: &TargetConfig) -> Self {
        Self {
            url: config.url.clone(),
            accept: config.accept.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// The two upstreams behind the relay endpoints
#[derive(Debug, Clone)]
pub struct UpstreamTargets {
    /// JSON API, forwarded verbatim
    pub primary: UpstreamTarget,
    /// HTML page with the same data embedded as a script literal
    pub fallback: UpstreamTarget,
}

impl UpstreamTargets {
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            primary: UpstreamTarget::from_config(&config.primary),
            fallback: UpstreamTarget::from_config(&config.fallback),
        }
    }
}

/// Performs one outbound GET per call and hands back the raw body.
///
/// Implementations make exactly one attempt and map connection failures,
/// timeouts and non-success statuses to `RelayError::Network`.
#[async_trait]
pub trait UpstreamFetcher: Send + Sync {
    async fn fetch(&self, target: &UpstreamTarget) -> Result<Bytes>;
}

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{Method, Request, Response},
    Router,
};
use flash_relay::{
    api::{handlers::ApiState, routes},
    config::{TargetConfig, UpstreamConfig},
    upstream::{HttpFetcher, UpstreamFetcher, UpstreamTarget, UpstreamTargets},
    RelayError,
};
use std::path::Path;
use std::sync::Arc;

pub const PRIMARY_URL: &str = "http://primary.test/flashinvaders/flashes/";
pub const FALLBACK_URL: &str = "http://fallback.test/flashinvaders/";

// ──────────────────────────────────────────────
// Stub upstreams (no network)
// ──────────────────────────────────────────────

/// Fetcher that answers from fixed bodies; `None` simulates an unreachable upstream.
pub struct StubFetcher {
    pub primary: Option<String>,
    pub fallback: Option<String>,
}

#[async_trait]
impl UpstreamFetcher for StubFetcher {
    async fn fetch(&self, target: &UpstreamTarget) -> flash_relay::Result<Bytes> {
        let body = match target.url.as_str() {
            PRIMARY_URL => self.primary.clone(),
            FALLBACK_URL => self.fallback.clone(),
            _ => None,
        };
        body.map(Bytes::from).ok_or_else(|| RelayError::Network {
            url: target.url.clone(),
            message: "error sending request: connection refused".to_string(),
        })
    }
}

pub fn stub_upstream_config() -> UpstreamConfig {
    upstream_config(PRIMARY_URL, FALLBACK_URL)
}

pub fn upstream_config(primary_url: &str, fallback_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        primary: TargetConfig {
            url: primary_url.to_string(),
            ..TargetConfig::primary()
        },
        fallback: TargetConfig {
            url: fallback_url.to_string(),
            ..TargetConfig::fallback()
        },
        ..UpstreamConfig::default()
    }
}

/// Build the relay router around a stub fetcher (no HTTP server, uses tower::oneshot).
pub fn build_stub_app(
    primary: Option<&str>,
    fallback: Option<&str>,
    static_dir: impl AsRef<Path>,
) -> Router {
    let fetcher = StubFetcher {
        primary: primary.map(str::to_string),
        fallback: fallback.map(str::to_string),
    };
    let state = ApiState::new(
        Arc::new(fetcher),
        UpstreamTargets::from_config(&stub_upstream_config()),
        static_dir,
    );
    routes::relay_routes(state)
}

/// Build the relay router around the real reqwest-backed fetcher.
pub fn build_http_app(config: &UpstreamConfig, static_dir: impl AsRef<Path>) -> Router {
    let fetcher = HttpFetcher::new(config).unwrap();
    let state = ApiState::new(
        Arc::new(fetcher),
        UpstreamTargets::from_config(config),
        static_dir,
    );
    routes::relay_routes(state)
}

// ──────────────────────────────────────────────
// Shared helpers
// ──────────────────────────────────────────────

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn response_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn assert_cors_headers(response: &Response<Body>) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, OPTIONS"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
}

/// HTML page shaped like the upstream one, with `payload` in the script literal
pub fn flash_page(payload: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Flash Invaders</title></head>
<body>
<script type="text/javascript">
    var flashData = JSON.parse('{}');
</script>
</body>
</html>"#,
        payload
    )
}

/// Upstream-style `\uXXXX` escape for a four digit hex code
pub fn esc(code: &str) -> String {
    format!("\\u{code}")
}

use crate::config::UpstreamConfig;
use crate::error::{RelayError, Result};
use crate::upstream::{UpstreamFetcher, UpstreamTarget};
use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::{debug, info};

/// Upstream fetcher backed by a shared reqwest client.
///
/// `User-Agent` and `Accept-Language` are sent on every request so the
/// upstream treats the relay like an ordinary browser; `Accept` and the
/// timeout come from the target being fetched.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language).map_err(|e| {
                RelayError::Config(format!("Invalid Accept-Language header: {}", e))
            })?,
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamFetcher for HttpFetcher {
    async fn fetch(&self, target: &UpstreamTarget) -> Result<Bytes> {
        info!("Proxying request to: {}", target.url);

        let response = self
            .client
            .get(&target.url)
            .header(header::ACCEPT, target.accept.as_str())
            .timeout(target.timeout)
            .send()
            .await
            .map_err(|e| RelayError::network(&target.url, e))?
            .error_for_status()
            .map_err(|e| RelayError::network(&target.url, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::network(&target.url, e))?;

        debug!("Received {} bytes from {}", body.len(), target.url);
        Ok(body)
    }
}

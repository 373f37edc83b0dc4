use crate::error::Result;
use crate::extract::extract_flash_data;
use crate::upstream::{UpstreamFetcher, UpstreamTargets};
use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::{info, warn};

pub const PRIMARY_PREFIX: &str = "/api/primary";
pub const FALLBACK_PREFIX: &str = "/api/fallback";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Collaborators every request is dispatched against. Nothing in here is
/// mutated after startup.
#[derive(Clone)]
pub struct ApiState {
    pub fetcher: Arc<dyn UpstreamFetcher>,
    pub targets: Arc<UpstreamTargets>,
    pub static_files: ServeDir,
}

impl ApiState {
    pub fn new(
        fetcher: Arc<dyn UpstreamFetcher>,
        targets: UpstreamTargets,
        static_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            fetcher,
            targets: Arc::new(targets),
            static_files: ServeDir::new(static_dir),
        }
    }
}

/// Route one inbound request to the primary relay, the fallback relay or
/// the static file tree.
pub async fn dispatch(State(state): State<ApiState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    if method == Method::OPTIONS {
        return preflight();
    }

    if method == Method::GET && path.starts_with(PRIMARY_PREFIX) {
        return match proxy_primary(&state).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Primary API failed: {}", e);
                e.into_response()
            }
        };
    }

    if method == Method::GET && path.starts_with(FALLBACK_PREFIX) {
        return match proxy_fallback(&state).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fallback HTML failed: {}", e);
                e.into_response()
            }
        };
    }

    if method == Method::GET || method == Method::HEAD {
        return serve_static(&state, request).await;
    }

    StatusCode::NOT_IMPLEMENTED.into_response()
}

fn preflight() -> Response {
    StatusCode::OK.into_response()
}

/// Forward the JSON API body untouched
async fn proxy_primary(state: &ApiState) -> Result<Response> {
    let body = state.fetcher.fetch(&state.targets.primary).await?;

    info!("Primary API request successful");
    Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response())
}

/// Fetch the HTML page, pull the embedded flash data out and re-encode it
async fn proxy_fallback(state: &ApiState) -> Result<Response> {
    let body = state.fetcher.fetch(&state.targets.fallback).await?;
    let html = String::from_utf8_lossy(&body);

    let payload = extract_flash_data(&html)?;
    let json = payload.to_json_bytes()?;

    info!("Successfully extracted and parsed JSON from HTML");
    Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], json).into_response())
}

async fn serve_static(state: &ApiState, request: Request) -> Response {
    match state.static_files.clone().oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

pub mod handlers;
pub mod routes;

use crate::config::AppConfig;
use crate::upstream::{HttpFetcher, UpstreamTargets};
use anyhow::{Context, Result};
use axum::Router;
use handlers::{ApiState, FALLBACK_PREFIX, PRIMARY_PREFIX};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn start_server(config: AppConfig) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);

    // Upstream collaborators
    let fetcher = Arc::new(HttpFetcher::new(&config.upstream)?);
    let targets = UpstreamTargets::from_config(&config.upstream);

    let state = ApiState::new(fetcher, targets, &config.http.static_dir);
    let app = build_router(state);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    info!(
        "Serving static files from {}",
        config.http.static_dir.display()
    );
    info!("");
    info!("Relay endpoints:");
    info!(
        "  → Primary API:  http://{}{} → {}",
        addr, PRIMARY_PREFIX, config.upstream.primary.url
    );
    info!(
        "  → Fallback API: http://{}{} → {}",
        addr, FALLBACK_PREFIX, config.upstream.fallback.url
    );

    // Start the server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn build_router(state: ApiState) -> Router {
    routes::relay_routes(state).layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down...");
        },
    }
}

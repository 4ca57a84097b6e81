//! HTTP server exposing the Prometheus scrape surface.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::sync::broadcast;

use govwatch_metrics::ExporterMetrics;

use crate::error::DaemonError;

/// Content type of the Prometheus text exposition format.
const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Build the metrics router: `GET /metrics` and `GET /health`.
pub fn router(metrics: Arc<ExporterMetrics>) -> Router {
    Router::new()
        .route("/metrics", get(serve_metrics))
        .route("/health", get(health))
        .with_state(metrics)
}

async fn serve_metrics(State(metrics): State<Arc<ExporterMetrics>>) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Bind and serve until the shutdown signal fires.
pub async fn serve(
    addr: SocketAddr,
    metrics: Arc<ExporterMetrics>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), DaemonError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| DaemonError::Server(format!("bind {addr}: {e}")))?;
    tracing::info!(%addr, "metrics server listening");

    axum::serve(listener, router(metrics))
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await
        .map_err(|e| DaemonError::Server(e.to_string()))
}

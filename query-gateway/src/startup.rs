//! Router construction and server lifecycle.

use crate::config::GatewayConfig;
use crate::handlers::{forward_query, health_check, metrics::metrics, preflight};
use crate::models::query::QUERY_PATH;
use crate::services::InferenceClient;
use axum::{middleware::from_fn, routing::get, routing::post, Router};
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub inference: InferenceClient,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let inference = InferenceClient::new(config.upstream.clone())?;
        Ok(Self { inference })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(QUERY_PATH, post(forward_query).options(preflight))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Port 0 binds an ephemeral port, which tests read back via [`Self::http_port`].
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let state = AppState::new(&config)?;

        tracing::info!(
            upstream = %state.inference.endpoint(),
            "Initialized inference client"
        );

        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!("Query gateway: HTTP on port {}", http_port);

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.http_listener, router).await.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}

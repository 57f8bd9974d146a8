//! Failure normalisation at the gateway boundary.
//!
//! Whatever goes wrong, the caller receives HTTP 500 with
//! `{"error":"Failed to process request"}`. Upstream status codes, headers and
//! bodies stay in the logs.

use crate::models::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request body is not a valid query: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("Inference service responded with status {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Inference service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Inference service returned an undecodable body: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

impl GatewayError {
    /// Stable label used in logs and the `gateway_failures_total` metric.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::InvalidPayload(_) => "invalid_payload",
            GatewayError::UpstreamStatus { .. } => "upstream_status",
            GatewayError::Transport(_) => "transport",
            GatewayError::MalformedBody(_) => "malformed_body",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        match &self {
            GatewayError::UpstreamStatus { status, body } => {
                tracing::error!(kind, upstream_status = status, "Error proxying request");
                tracing::debug!(upstream_body = %body, "Upstream error body");
            }
            other => tracing::error!(kind, error = %other, "Error proxying request"),
        }

        counter!("gateway_failures_total", "kind" => kind).increment(1);

        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::failure())).into_response()
    }
}

//! Client for the upstream inference service.
//!
//! The service is opaque: it takes a document reference and a list of
//! questions and either answers or fails. Any non-success status is total
//! failure.

use crate::config::UpstreamConfig;
use crate::error::GatewayError;
use crate::models::QueryRequest;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use service_core::error::AppError;
use service_core::observability::outbound_headers;
use std::time::Duration;

#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    config: UpstreamConfig,
}

impl InferenceClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.url
    }

    /// Send the query upstream and return its decoded body untouched.
    pub async fn run(
        &self,
        request: &QueryRequest,
        request_id: Option<&str>,
    ) -> Result<Value, GatewayError> {
        tracing::debug!(
            endpoint = %self.config.url,
            documents = %request.documents,
            question_count = request.questions.len(),
            "Sending query to inference service"
        );

        let response = self
            .client
            .post(&self.config.url)
            .headers(outbound_headers(request_id))
            .bearer_auth(self.config.bearer_token.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(GatewayError::Transport)?;
        let answer: Value = serde_json::from_slice(&bytes).map_err(GatewayError::MalformedBody)?;

        tracing::info!(status = %status, "Inference service answered");

        Ok(answer)
    }
}

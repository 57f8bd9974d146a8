//! The session's only suspension point: one round trip to the gateway.

use crate::error::GatewayError;
use async_trait::async_trait;
use query_gateway::{ErrorBody, QueryRequest};
use reqwest::Client;
use serde_json::Value;

#[async_trait]
pub trait QueryGateway: Send + Sync {
    /// Forward one query and return the decoded success body.
    async fn forward(&self, request: &QueryRequest) -> Result<Value, GatewayError>;
}

/// [`QueryGateway`] over HTTP, POSTing JSON to the gateway endpoint.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: String,
}

impl HttpGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QueryGateway for HttpGateway {
    async fn forward(&self, request: &QueryRequest) -> Result<Value, GatewayError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .map(|body| body.error);
            tracing::warn!(status = %status, "Gateway rejected query");
            return Err(GatewayError::Rejected { status, message });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

//! End-to-end test infrastructure.
//!
//! Each [`WorkflowTestContext`] runs a real query gateway on an ephemeral
//! port in front of a `wiremock` stand-in for the inference service, and
//! gives tests an [`HttpGateway`] pointed at it. Nothing external is needed.

use anyhow::{anyhow, Result};
use chat_session::HttpGateway;
use query_gateway::config::{GatewayConfig, ObservabilityConfig, UpstreamConfig};
use query_gateway::startup::Application;
use query_gateway::QUERY_PATH;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Once;
use std::time::Duration;
use wiremock::MockServer;

/// Path the stub inference service listens on.
pub const INFERENCE_PATH: &str = "/api/v1/hackrx/run";

/// Credential the gateway is configured with.
pub const INFERENCE_TOKEN: &str = "workflow-test-token";

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,workflow_tests=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub struct WorkflowTestContext {
    /// Stub inference service. Mount expectations on it per test.
    pub inference: MockServer,
    /// Base URL of the running gateway.
    pub gateway_address: String,
    /// Session-side client for the gateway endpoint.
    pub gateway: HttpGateway,
}

impl WorkflowTestContext {
    pub async fn new() -> Result<Self> {
        let inference = MockServer::start().await;

        let config = GatewayConfig {
            common: CoreConfig { port: 0 },
            upstream: UpstreamConfig {
                url: format!("{}{}", inference.uri(), INFERENCE_PATH),
                bearer_token: Secret::new(INFERENCE_TOKEN.to_string()),
                timeout_secs: Some(10),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                otlp_endpoint: None,
            },
        };

        let app = Application::build(config)
            .await
            .map_err(|e| anyhow!("failed to build gateway: {}", e))?;
        let gateway_address = format!("http://127.0.0.1:{}", app.http_port());

        tokio::spawn(async move {
            if let Err(e) = app.run_until_stopped().await {
                tracing::error!(error = %e, "Gateway stopped");
            }
        });

        wait_for_gateway(&gateway_address, Duration::from_secs(5)).await?;

        let gateway = HttpGateway::new(format!("{}{}", gateway_address, QUERY_PATH));

        Ok(Self {
            inference,
            gateway_address,
            gateway,
        })
    }
}

/// Poll the gateway health endpoint until it answers or `timeout` elapses.
pub async fn wait_for_gateway(address: &str, timeout: Duration) -> Result<()> {
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", address);
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        if let Ok(response) = client.get(&health_url).send().await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(anyhow!("gateway at {} not healthy after {:?}", address, timeout));
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

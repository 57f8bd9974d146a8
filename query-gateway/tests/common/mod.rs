#![allow(dead_code)]

use query_gateway::config::{GatewayConfig, ObservabilityConfig, UpstreamConfig};
use query_gateway::startup::{AppState, Application};
use query_gateway::QUERY_PATH;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-bearer-token";
pub const UPSTREAM_PATH: &str = "/api/v1/hackrx/run";

pub fn test_config(upstream_url: String) -> GatewayConfig {
    GatewayConfig {
        common: CoreConfig { port: 0 },
        upstream: UpstreamConfig {
            url: upstream_url,
            bearer_token: Secret::new(TEST_TOKEN.to_string()),
            timeout_secs: Some(5),
        },
        observability: ObservabilityConfig {
            log_level: "error".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub fn test_state(upstream: &MockServer) -> AppState {
    AppState::new(&test_config(format!("{}{}", upstream.uri(), UPSTREAM_PATH)))
        .expect("Failed to build app state")
}

pub struct TestApp {
    pub address: String,
    pub upstream: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let upstream = MockServer::start().await;
        let config = test_config(format!("{}{}", upstream.uri(), UPSTREAM_PATH));

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.http_port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            upstream,
            client,
        }
    }

    pub fn query_url(&self) -> String {
        format!("{}{}", self.address, QUERY_PATH)
    }

    pub async fn post_query(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.query_url())
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }
}

use secrecy::Secret;
use service_core::config::{self as core_config, get_env, get_optional_env};
use service_core::error::AppError;
use validator::Validate;

/// Default upstream endpoint of the inference service.
const DEFAULT_INFERENCE_URL: &str = "http://localhost:8000/api/v1/hackrx/run";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub upstream: UpstreamConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Validate)]
pub struct UpstreamConfig {
    /// Full URL the query body is POSTed to.
    #[validate(url(message = "INFERENCE_URL must be an absolute URL"))]
    pub url: String,
    /// Bearer credential attached to every upstream call. Never sent to clients.
    pub bearer_token: Secret<String>,
    /// Optional whole-request timeout. Unset means the gateway waits for the
    /// inference service to answer or fail on its own.
    #[validate(range(min = 1, message = "INFERENCE_TIMEOUT_SECS must be at least 1"))]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = core_config::is_prod();

        let timeout_secs = get_optional_env("INFERENCE_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "INFERENCE_TIMEOUT_SECS must be a whole number of seconds: {}",
                        e
                    ))
                })
            })
            .transpose()?;

        let upstream = UpstreamConfig {
            url: get_env("INFERENCE_URL", Some(DEFAULT_INFERENCE_URL), is_prod)?,
            bearer_token: Secret::new(get_env("INFERENCE_BEARER_TOKEN", None, is_prod)?),
            timeout_secs,
        };
        upstream.validate().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Invalid upstream configuration: {}", e))
        })?;

        Ok(GatewayConfig {
            common: common_config,
            upstream,
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
                otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            },
        })
    }
}

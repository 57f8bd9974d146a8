use serde::Deserialize;
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Full URL of the gateway query endpoint.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Document to ask about when the view opens.
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_gateway_url() -> String {
    format!("http://localhost:3000{}", query_gateway::QUERY_PATH)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl ChatConfig {
    /// Read `CHAT__*` variables, after loading `.env` if present.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("CHAT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

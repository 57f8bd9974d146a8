use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. The gateway holds no connections of its own, so it is
/// healthy whenever it can answer.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "query-gateway",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

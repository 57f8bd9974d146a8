use crate::error::GatewayError;
use crate::models::QueryRequest;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics::counter;
use serde_json::Value;
use service_core::observability::REQUEST_ID_HEADER;

/// POST handler: decode, forward, and pass the answer through verbatim.
///
/// Any decodable query goes upstream as is. Judging empty documents or
/// questions is left to the inference service.
///
/// The body is taken as raw bytes so a malformed payload takes the same
/// failure path as an upstream error instead of axum's extractor rejection.
pub async fn forward_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, GatewayError> {
    let request: QueryRequest =
        serde_json::from_slice(&body).map_err(GatewayError::InvalidPayload)?;

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok());

    tracing::info!(
        question_count = request.questions.len(),
        upstream = %state.inference.endpoint(),
        "Forwarding query to inference service"
    );

    let answer = state.inference.run(&request, request_id).await?;

    counter!("gateway_forwarded_total").increment(1);

    Ok(Json(answer))
}

/// OPTIONS handler for cross-origin preflight. Fixed response, no state.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

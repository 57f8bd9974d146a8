use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use std::time::Instant;

/// Route label for requests that matched no route, so probes for arbitrary
/// paths share one series.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Route template the request was dispatched to, e.g. `/api/query`.
pub fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Count and time every request by method, route template and status.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let route = route_label(&req);
    let method = req.method().as_str().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let labels = [
        ("method", method),
        ("route", route),
        ("status", response.status().as_u16().to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(started.elapsed().as_secs_f64());

    response
}

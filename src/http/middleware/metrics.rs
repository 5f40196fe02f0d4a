//! Request latency middleware.

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

use crate::http::request::request_id;
use crate::observability::metrics;

/// Record latency per matched route and log the outcome.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let request_id = request_id(&request).to_string();
    let method = request.method().clone();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    metrics::record_request(&route, status, start);
    tracing::debug!(
        request_id = %request_id,
        method = %method,
        route = %route,
        status = status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}

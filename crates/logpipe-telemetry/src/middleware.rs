//! HTTP request timing middleware (spec §4.9).

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use logpipe_core::normalize_route;

use crate::counters::record_http_request;
use crate::histograms::{record_http_request_duration, record_http_request_size, record_http_response_size};

fn content_length(headers: &HeaderMap) -> u64 {
    headers
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// `axum::middleware::from_fn` handler: times the request, normalizes
/// the route for low-cardinality labels, and records the counter,
/// duration histogram, and request/response size histograms.
pub async fn track_http_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let route = normalize_route(req.uri().path());
    let request_bytes = content_length(req.headers());
    let start = Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();
    let response_bytes = content_length(response.headers());

    record_http_request(&method, &route, status);
    record_http_request_duration(&method, &route, elapsed);
    record_http_request_size(&method, &route, request_bytes);
    record_http_response_size(&method, &route, response_bytes);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_device_route_before_recording() {
        assert_eq!(normalize_route("/api/logs/device_001"), "/api/logs/{param}");
    }
}

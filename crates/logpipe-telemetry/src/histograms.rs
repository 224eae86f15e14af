//! Histogram instruments (spec §4.6/§4.9).

use metrics::histogram;

/// A single Redis operation's wall time (`redis_operation_duration_seconds{operation}`).
pub fn record_redis_operation_duration(operation: &str, seconds: f64) {
    histogram!("redis_operation_duration_seconds", "operation" => operation.to_string()).record(seconds);
}

/// A batch append/insert's wall time, labeled with its size bucket
/// (`batch_processing_duration_seconds{batch_size}`).
pub fn record_batch_processing_duration(batch_size: usize, seconds: f64) {
    histogram!("batch_processing_duration_seconds", "batch_size" => batch_size.to_string()).record(seconds);
}

/// One HTTP request's wall time (`http_request_duration_seconds{method,route}`).
pub fn record_http_request_duration(method: &str, route: &str, seconds: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string(),
    )
    .record(seconds);
}

/// Request body size in bytes, from `Content-Length`
/// (`http_request_size_bytes{method,route}`).
pub fn record_http_request_size(method: &str, route: &str, bytes: u64) {
    histogram!(
        "http_request_size_bytes",
        "method" => method.to_string(),
        "route" => route.to_string(),
    )
    .record(bytes as f64);
}

/// Response body size in bytes, from `Content-Length`
/// (`http_response_size_bytes{method,route}`).
pub fn record_http_response_size(method: &str, route: &str, bytes: u64) {
    histogram!(
        "http_response_size_bytes",
        "method" => method.to_string(),
        "route" => route.to_string(),
    )
    .record(bytes as f64);
}

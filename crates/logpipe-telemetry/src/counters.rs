//! Counter instruments (spec §4.6/§4.7/§7).

use metrics::counter;

/// One accepted record (`logs_received_total{device_id,log_level}`).
pub fn record_log_received(device_id: &str, log_level: &str) {
    counter!("logs_received_total", "device_id" => device_id.to_string(), "log_level" => log_level.to_string())
        .increment(1);
}

/// A stream append outcome (`redis_stream_messages_total{status}`),
/// `status` one of `"ok"` / `"failed"`.
pub fn record_stream_message(status: &str) {
    counter!("redis_stream_messages_total", "status" => status.to_string()).increment(1);
}

/// A worker decode/insert/ack failure
/// (`logs_processing_errors_total{error_type}`).
pub fn record_processing_error(error_type: &str) {
    counter!("logs_processing_errors_total", "error_type" => error_type.to_string()).increment(1);
}

/// One completed HTTP request (`http_requests_total{method,route,status}`).
pub fn record_http_request(method: &str, route: &str, status: u16) {
    counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
}

/// A read-through cache lookup (C7) that found the payload
/// (`redis_cache_hits_total`).
pub fn record_cache_hit() {
    counter!("redis_cache_hits_total").increment(1);
}

/// A read-through cache lookup (C7) that fell through to the database
/// (`redis_cache_misses_total`).
pub fn record_cache_miss() {
    counter!("redis_cache_misses_total").increment(1);
}

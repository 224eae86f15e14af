//! Process-wide telemetry registry (C9, spec §4.9).
//!
//! Grounded on the teacher's `src/metrics/{counters,histograms,gauges,
//! labels}.rs` macro-wrapping pattern and `fraiseql-server/src/metrics.rs`
//! / `routes/metrics.rs` for the exposition handler. Built on the
//! `metrics` facade + `metrics-exporter-prometheus` rather than
//! hand-rolled atomics, same as the teacher.

mod counters;
mod exporter;
mod gauges;
mod histograms;
mod middleware;
mod sampler;

pub use counters::{
    record_cache_hit, record_cache_miss, record_http_request, record_log_received, record_processing_error,
    record_stream_message,
};
pub use exporter::{install_recorder, render};
pub use gauges::{set_host_cpu_percent, set_host_disk_bytes, set_host_memory_bytes, set_stream_size};
pub use histograms::{
    record_batch_processing_duration, record_http_request_duration, record_http_request_size,
    record_http_response_size, record_redis_operation_duration,
};
pub use middleware::track_http_metrics;
pub use sampler::{spawn_sampler, StreamLenSource};

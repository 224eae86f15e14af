//! Gauge instruments sampled periodically (spec §4.9).

use metrics::gauge;

/// Current approximate stream length (`redis_stream_size`).
pub fn set_stream_size(len: u64) {
    gauge!("redis_stream_size").set(len as f64);
}

/// Host CPU utilisation percentage (`host_cpu_percent`).
pub fn set_host_cpu_percent(percent: f32) {
    gauge!("host_cpu_percent").set(f64::from(percent));
}

/// Host memory usage in bytes (`host_memory_{used,available,total}_bytes`).
pub fn set_host_memory_bytes(used: u64, available: u64, total: u64) {
    gauge!("host_memory_used_bytes").set(used as f64);
    gauge!("host_memory_available_bytes").set(available as f64);
    gauge!("host_memory_total_bytes").set(total as f64);
}

/// Host disk usage in bytes (`host_disk_{used,free,total}_bytes`).
pub fn set_host_disk_bytes(used: u64, free: u64, total: u64) {
    gauge!("host_disk_used_bytes").set(used as f64);
    gauge!("host_disk_free_bytes").set(free as f64);
    gauge!("host_disk_total_bytes").set(total as f64);
}

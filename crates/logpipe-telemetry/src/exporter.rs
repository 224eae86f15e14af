//! Prometheus exposition for `GET /metrics`.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the process-wide Prometheus recorder. Call once at startup,
/// before any `counter!`/`histogram!`/`gauge!` call.
///
/// # Panics
///
/// Panics if a recorder is already installed (startup-only call).
#[must_use]
pub fn install_recorder() -> PrometheusHandle {
    PrometheusBuilder::new().install_recorder().expect("telemetry recorder already installed")
}

/// Render the current registry snapshot in Prometheus line format.
#[must_use]
pub fn render(handle: &PrometheusHandle) -> String {
    handle.render()
}

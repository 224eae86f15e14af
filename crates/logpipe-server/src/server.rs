//! Router assembly (C6/C7, spec §4.6/§4.7).
//!
//! Grounded on the teacher's `fraiseql-server/src/server.rs` middleware
//! stack: CORS, gzip compression, tracing, a request timeout, panic
//! catching, and a request-id layer, composed via `tower::ServiceBuilder`.

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{health, ingest, metrics, query, root};
use crate::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the full HTTP router: routes plus the teacher's standard
/// middleware stack, wrapped in the telemetry timing layer.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let request_id_header = http::HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/", get(root::root))
        .route("/api/log", post(ingest::submit_log))
        .route("/api/logs/batch", post(ingest::submit_batch))
        .route("/api/logs/{device_id}", get(query::recent_logs))
        .route("/api/stats", get(query::stats))
        .route("/health", get(health::health))
        .route("/metrics", get(metrics::metrics))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(request_id_header))
                .layer(CatchPanicLayer::new())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(logpipe_telemetry::track_http_metrics)),
        )
        .with_state(state)
}

//! `GET /health` (spec §4.7/§6).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use logpipe_stream::StreamClient;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub stream: bool,
    pub store: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub instance: String,
    pub checks: HealthChecks,
    pub timestamp: chrono::DateTime<chrono::FixedOffset>,
}

/// Reports `status: "healthy"` iff both the stream and the store answer.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let stream_ok = state.stream.len().await.is_ok();
    let store_ok = state.reader.count_total().await.is_ok();

    let status = if stream_ok && store_ok { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status,
        instance: state.instance_name.clone(),
        checks: HealthChecks { stream: stream_ok, store: store_ok },
        timestamp: Utc::now().with_timezone(&state.timezone_offset),
    })
}

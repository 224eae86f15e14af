//! `GET /metrics`: Prometheus exposition (spec §4.7/§4.9).

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::state::AppState;

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = logpipe_telemetry::render(&state.telemetry_handle);
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

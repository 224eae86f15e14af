//! `POST /api/log` and `POST /api/logs/batch` (C6, spec §4.6).

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use logpipe_core::record::{BatchLogRequest, LogRecord};
use logpipe_core::Validator;
use logpipe_error::PipelineError;
use logpipe_stream::{StreamClient, StreamEntryFields};
use logpipe_telemetry::{record_batch_processing_duration, record_log_received, record_redis_operation_duration};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub status: &'static str,
    pub message_id: String,
    pub received_at: chrono::DateTime<chrono::FixedOffset>,
}

#[derive(Debug, Serialize)]
pub struct QueuedBatchResponse {
    pub status: &'static str,
    pub count: usize,
    pub message_ids: Vec<String>,
    pub received_at: chrono::DateTime<chrono::FixedOffset>,
}

fn record_to_fields(record: &LogRecord, stamped_at: chrono::DateTime<chrono::FixedOffset>) -> StreamEntryFields {
    let timestamp = record.timestamp.unwrap_or(stamped_at);
    let mut fields = StreamEntryFields::new();
    fields.insert("device_id".to_string(), record.device_id.clone());
    fields.insert("log_level".to_string(), record.log_level.clone());
    fields.insert("message".to_string(), record.message.clone());
    fields.insert("log_data".to_string(), record.log_data.to_string());
    fields.insert("timestamp".to_string(), timestamp.to_rfc3339());
    fields
}

/// `POST /api/log`: enqueue one record. Acknowledges on enqueue, not on
/// persistence (spec §4.6 design rationale).
///
/// # Errors
///
/// Returns [`PipelineError::Validation`] (422) or
/// [`PipelineError::Stream`] (500).
pub async fn submit_log(
    State(state): State<AppState>,
    Json(record): Json<LogRecord>,
) -> Result<Json<QueuedResponse>, PipelineError> {
    Validator::validate_record(&record)?;

    let stamped_at = Utc::now().with_timezone(&state.timezone_offset);
    let fields = record_to_fields(&record, stamped_at);

    let start = Instant::now();
    let id = match state.stream.append(fields).await {
        Ok(id) => {
            logpipe_telemetry::record_stream_message("ok");
            id
        }
        Err(e) => {
            logpipe_telemetry::record_stream_message("failed");
            return Err(PipelineError::from(e));
        }
    };
    record_redis_operation_duration("append", start.elapsed().as_secs_f64());
    record_log_received(&record.device_id, &record.log_level);

    Ok(Json(QueuedResponse { status: "queued", message_id: id.to_string(), received_at: stamped_at }))
}

/// `POST /api/logs/batch`: pipelined enqueue of 1..1000 records, one
/// `current_time` stamped for the whole batch.
///
/// # Errors
///
/// Returns [`PipelineError::Validation`] (422) or
/// [`PipelineError::Stream`] (500) — a single failure fails the whole
/// batch.
pub async fn submit_batch(
    State(state): State<AppState>,
    Json(batch): Json<BatchLogRequest>,
) -> Result<Json<QueuedBatchResponse>, PipelineError> {
    Validator::validate_batch(&batch)?;

    let stamped_at = Utc::now().with_timezone(&state.timezone_offset);
    let entries: Vec<StreamEntryFields> =
        batch.logs.iter().map(|record| record_to_fields(record, stamped_at)).collect();
    let batch_size = entries.len();

    let start = Instant::now();
    let ids = match state.stream.append_many(entries).await {
        Ok(ids) => {
            logpipe_telemetry::record_stream_message("ok");
            ids
        }
        Err(e) => {
            logpipe_telemetry::record_stream_message("failed");
            return Err(PipelineError::from(e));
        }
    };
    record_batch_processing_duration(batch_size, start.elapsed().as_secs_f64());

    for record in &batch.logs {
        record_log_received(&record.device_id, &record.log_level);
    }

    Ok(Json(QueuedBatchResponse {
        status: "queued",
        count: ids.len(),
        message_ids: ids.into_iter().map(|id| id.to_string()).collect(),
        received_at: stamped_at,
    }))
}

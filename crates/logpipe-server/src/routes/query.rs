//! `GET /api/logs/{device_id}` and `GET /api/stats` (C7, spec §4.7).

use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::Json;
use logpipe_cache::CacheClient;
use logpipe_core::StoredLog;
use logpipe_db::RecentDevice;
use logpipe_error::PipelineError;
use logpipe_telemetry::{record_cache_hit, record_cache_miss};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;
const RECENT_LOGS_TTL: Duration = Duration::from_secs(300);
const STATS_TTL: Duration = Duration::from_secs(60);
const STATS_DEVICE_COUNT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct RecentLogsQuery {
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecentLogsResponse {
    pub total: usize,
    pub source: &'static str,
    pub data: Vec<StoredLog>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_logs: i64,
    pub logs_by_level: std::collections::HashMap<String, i64>,
    pub recent_devices: Vec<RecentDevice>,
}

/// `GET /api/logs/{device_id}?limit=N`: cache-first, database fallback,
/// cache repopulated on miss (spec §4.7).
///
/// # Errors
///
/// Returns [`PipelineError::Store`] if both the cache and the database
/// are unreachable; a cache failure alone is tolerated.
pub async fn recent_logs(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(query): Query<RecentLogsQuery>,
) -> Result<Json<RecentLogsResponse>, PipelineError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let cache_key = format!("logs:{device_id}:{limit}");

    match state.cache.get(&cache_key).await {
        Ok(Some(bytes)) => {
            if let Ok(data) = serde_json::from_slice::<Vec<StoredLog>>(&bytes) {
                record_cache_hit();
                return Ok(Json(RecentLogsResponse { total: data.len(), source: "cache", data }));
            }
            record_cache_miss();
        }
        Ok(None) => record_cache_miss(),
        Err(e) => {
            record_cache_miss();
            warn!(error = %e, "cache read failed, falling back to database");
        }
    }

    let data = state.reader.recent_by_device(&device_id, limit).await?;

    if let Ok(bytes) = serde_json::to_vec(&data) {
        if let Err(e) = state.cache.set(&cache_key, bytes, RECENT_LOGS_TTL).await {
            warn!(error = %e, "cache write failed, serving uncached");
        }
    }

    Ok(Json(RecentLogsResponse { total: data.len(), source: "database", data }))
}

/// `GET /api/stats`: cache-first aggregate counts (spec §4.7).
///
/// # Errors
///
/// Returns [`PipelineError::Store`] if the database is unreachable.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, PipelineError> {
    let cache_key = "stats".to_string();

    match state.cache.get(&cache_key).await {
        Ok(Some(bytes)) => {
            if let Ok(stats) = serde_json::from_slice::<StatsResponse>(&bytes) {
                record_cache_hit();
                return Ok(Json(stats));
            }
            record_cache_miss();
        }
        Ok(None) => record_cache_miss(),
        Err(e) => {
            record_cache_miss();
            warn!(error = %e, "cache read failed, falling back to database");
        }
    }

    let total_logs = state.reader.count_total().await?;
    let logs_by_level = state.reader.count_by_level().await?;
    let recent_devices = state.reader.recent_devices(STATS_DEVICE_COUNT).await?;

    let response = StatsResponse { total_logs, logs_by_level, recent_devices };

    if let Ok(bytes) = serde_json::to_vec(&response) {
        if let Err(e) = state.cache.set(&cache_key, bytes, STATS_TTL).await {
            warn!(error = %e, "cache write failed, serving uncached");
        }
    }

    Ok(Json(response))
}

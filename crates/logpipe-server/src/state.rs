//! Shared application state (spec §9: process-wide singletons passed
//! through handlers, no hidden globals beyond the telemetry registry).

use std::sync::Arc;

use chrono::FixedOffset;
use logpipe_cache::RedisCacheClient;
use logpipe_db::PgReader;
use logpipe_stream::RedisStreamClient;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::ServerConfig;

/// Everything a handler needs, cloned cheaply (every field is an `Arc`
/// or an internally-pooled/cloneable client).
#[derive(Clone)]
pub struct AppState {
    pub stream: Arc<RedisStreamClient>,
    pub cache: Arc<RedisCacheClient>,
    pub reader: Arc<PgReader>,
    pub instance_name: String,
    pub timezone_offset: FixedOffset,
    pub telemetry_handle: Arc<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: &ServerConfig,
        stream: RedisStreamClient,
        cache: RedisCacheClient,
        reader: PgReader,
        telemetry_handle: PrometheusHandle,
    ) -> Self {
        Self {
            stream: Arc::new(stream),
            cache: Arc::new(cache),
            reader: Arc::new(reader),
            instance_name: config.instance_name.clone(),
            timezone_offset: config.timezone_offset(),
            telemetry_handle: Arc::new(telemetry_handle),
        }
    }
}

//! `logpipe-server`: ingest and query HTTP front-end entry point.

use std::sync::Arc;

use clap::Parser;
use logpipe_cache::RedisCacheClient;
use logpipe_db::{build_pool, PgReader, PoolSettings};
use logpipe_server::{build_router, shutdown::shutdown_signal, AppState, ServerConfig};
use logpipe_stream::{RedisStreamClient, StreamClient};
use logpipe_telemetry::{install_recorder, spawn_sampler, StreamLenSource};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "logpipe-server", about = "Device log ingestion HTTP front-end")]
struct Cli {
    /// Path to an optional TOML configuration file.
    #[arg(long, env = "LOGPIPE_CONFIG")]
    config: Option<String>,
}

struct StreamLenAdapter(Arc<RedisStreamClient>);

#[async_trait::async_trait]
impl StreamLenSource for StreamLenAdapter {
    async fn stream_len(&self) -> Option<u64> {
        self.0.len().await.ok()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).json().init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;
    info!(instance = %config.instance_name, "starting logpipe-server");

    let telemetry_handle = install_recorder();

    let redis_url = format!("redis://{}:{}", config.redis.host, config.redis.port);
    let redis_client = redis::Client::open(redis_url)?;
    let conn = redis::aio::ConnectionManager::new(redis_client).await?;

    let stream = RedisStreamClient::new(conn.clone(), config.stream_key.clone(), config.stream_max_len);
    let cache = RedisCacheClient::new(conn, config.cache_key_prefix.clone());

    let pool_settings = PoolSettings::front_end(
        config.postgres.host.clone(),
        config.postgres.port,
        config.postgres.user.clone(),
        config.postgres.password.clone(),
        config.postgres.dbname.clone(),
    );
    let pool = build_pool(&pool_settings)?;
    let reader = PgReader::new(pool, config.timezone_offset());

    let stream_arc = Arc::new(stream.clone());
    spawn_sampler(Arc::new(StreamLenAdapter(stream_arc)));

    let state = AppState::new(&config, stream, cache, reader, telemetry_handle);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(addr = %config.http_addr, "listening");

    if let Err(e) = axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await {
        error!(error = %e, "server exited with error");
        return Err(e.into());
    }

    info!("shutdown complete");
    Ok(())
}

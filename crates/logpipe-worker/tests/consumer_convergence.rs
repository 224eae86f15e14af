//! At-least-once convergence against a live Redis/Postgres (spec §8
//! S5). Ignored by default — needs both dependencies running.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use logpipe_db::{build_pool, PgWriter, PoolSettings};
use logpipe_stream::{RedisStreamClient, StreamClient};
use logpipe_worker::{run::run, WorkerConfig};

#[tokio::test]
#[ignore = "requires a live Redis and Postgres instance"]
async fn worker_drains_cleanly_on_shutdown_signal() {
    let config = WorkerConfig::load(None).unwrap();

    let redis_client = redis::Client::open(format!("redis://{}:{}", config.redis.host, config.redis.port)).unwrap();
    let conn = redis::aio::ConnectionManager::new(redis_client).await.unwrap();
    let stream = RedisStreamClient::new(conn, format!("{}:test", config.stream_key), 1000);

    for i in 0..5 {
        let mut fields = logpipe_stream::StreamEntryFields::new();
        fields.insert("device_id".to_string(), format!("device_{i:03}"));
        fields.insert("log_level".to_string(), "INFO".to_string());
        fields.insert("message".to_string(), "convergence test".to_string());
        fields.insert("log_data".to_string(), "{}".to_string());
        stream.append(fields).await.unwrap();
    }

    let pool_settings = PoolSettings::worker(
        config.postgres.host.clone(),
        config.postgres.port,
        config.postgres.user.clone(),
        config.postgres.password.clone(),
        config.postgres.dbname.clone(),
    );
    let pool = build_pool(&pool_settings).unwrap();
    let writer = PgWriter::new(pool);

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        shutdown_clone.store(true, Ordering::SeqCst);
    });

    let result = run(stream, writer, config, shutdown).await;
    assert!(result.is_ok());
}

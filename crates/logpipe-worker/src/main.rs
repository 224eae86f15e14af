//! `logpipe-worker`: consumer-group batch worker entry point.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use logpipe_db::{build_pool, PgWriter, PoolSettings};
use logpipe_stream::{RedisStreamClient, StreamClient};
use logpipe_worker::{run::run, WorkerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "logpipe-worker", about = "Consumer-group log persistence worker")]
struct Cli {
    /// Path to an optional TOML configuration file.
    #[arg(long, env = "LOGPIPE_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).json().init();

    let cli = Cli::parse();
    let config = match WorkerConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(worker = %config.worker_name, "starting logpipe-worker");

    let redis_url = format!("redis://{}:{}", config.redis.host, config.redis.port);
    let stream = match redis::Client::open(redis_url) {
        Ok(client) => match redis::aio::ConnectionManager::new(client).await {
            Ok(conn) => RedisStreamClient::new(conn, config.stream_key.clone(), 100_000),
            Err(e) => {
                error!(error = %e, "cannot reach stream at startup");
                return ExitCode::FAILURE;
            }
        },
        Err(e) => {
            error!(error = %e, "invalid redis url");
            return ExitCode::FAILURE;
        }
    };

    if stream.len().await.is_err() {
        error!("stream unreachable at startup");
        return ExitCode::FAILURE;
    }

    let pool_settings = PoolSettings::worker(
        config.postgres.host.clone(),
        config.postgres.port,
        config.postgres.user.clone(),
        config.postgres.password.clone(),
        config.postgres.dbname.clone(),
    );
    let pool = match build_pool(&pool_settings) {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "cannot build database pool at startup");
            return ExitCode::FAILURE;
        }
    };
    if pool.get().await.is_err() {
        error!("database unreachable at startup");
        return ExitCode::FAILURE;
    }
    let writer = PgWriter::new(pool);

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        shutdown_for_signal.store(true, Ordering::SeqCst);
    });

    #[cfg(unix)]
    {
        let shutdown_for_term = shutdown.clone();
        tokio::spawn(async move {
            if let Ok(mut term) = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                term.recv().await;
                shutdown_for_term.store(true, Ordering::SeqCst);
            }
        });
    }

    match run(stream, writer, config, shutdown).await {
        Ok(()) => {
            info!("clean shutdown");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "worker aborted after error threshold");
            ExitCode::FAILURE
        }
    }
}

//! Pool construction (spec §5: ≈10+5 overflow front-end pool, separate
//! worker pool of the same shape, 30 s acquire timeout, 3600 s recycle,
//! pre-ping before lease).

use std::time::Duration;

use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

/// Connection and pool-sizing parameters for one `deadpool_postgres::Pool`.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    /// Steady-state pool size (spec: ≈10 for the front-end, ≈10 for the worker).
    pub pool_size: usize,
    /// Additional overflow connections beyond `pool_size` (spec: 5 for the front-end).
    pub overflow: usize,
    pub acquire_timeout: Duration,
    pub recycle_timeout: Duration,
}

impl PoolSettings {
    #[must_use]
    pub fn front_end(host: String, port: u16, user: String, password: String, dbname: String) -> Self {
        Self {
            host,
            port,
            user,
            password,
            dbname,
            pool_size: 10,
            overflow: 5,
            acquire_timeout: Duration::from_secs(30),
            recycle_timeout: Duration::from_secs(3600),
        }
    }

    #[must_use]
    pub fn worker(host: String, port: u16, user: String, password: String, dbname: String) -> Self {
        Self {
            host,
            port,
            user,
            password,
            dbname,
            pool_size: 10,
            overflow: 0,
            acquire_timeout: Duration::from_secs(30),
            recycle_timeout: Duration::from_secs(3600),
        }
    }
}

/// Build a `deadpool_postgres::Pool` with `RecyclingMethod::Verified`
/// (pre-ping before lease, per spec §5) and the given sizing.
///
/// # Errors
///
/// Returns the pool builder's error if the config is malformed.
pub fn build_pool(settings: &PoolSettings) -> Result<Pool, deadpool_postgres::CreatePoolError> {
    let mut cfg = Config::new();
    cfg.host = Some(settings.host.clone());
    cfg.port = Some(settings.port);
    cfg.user = Some(settings.user.clone());
    cfg.password = Some(settings.password.clone());
    cfg.dbname = Some(settings.dbname.clone());
    cfg.manager = Some(ManagerConfig { recycling_method: RecyclingMethod::Verified });
    cfg.pool = Some(deadpool_postgres::PoolConfig {
        max_size: settings.pool_size + settings.overflow,
        timeouts: deadpool_postgres::Timeouts {
            wait: Some(settings.acquire_timeout),
            create: Some(settings.acquire_timeout),
            recycle: Some(settings.recycle_timeout),
        },
        ..Default::default()
    });

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
}

//! Worker configuration: same file-then-env precedence as the
//! front-end (spec §6), plus the tunables spec §4.8 calls out as
//! defaults implementers may expose as configuration.

use serde::Deserialize;

fn default_worker_name() -> String {
    "worker-1".to_string()
}

fn default_stream_key() -> String {
    "logs:stream".to_string()
}

fn default_consumer_group() -> String {
    "log_workers".to_string()
}

fn default_batch_size() -> u64 {
    100
}

fn default_block_ms() -> u64 {
    5000
}

fn default_backoff_secs() -> u64 {
    5
}

fn default_error_threshold() -> u32 {
    10
}

fn default_timezone_offset_hours() -> i32 {
    8
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    #[serde(default = "default_worker_name")]
    pub worker_name: String,
    #[serde(default = "default_stream_key")]
    pub stream_key: String,
    #[serde(default = "default_consumer_group")]
    pub consumer_group: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
    #[serde(default = "default_block_ms")]
    pub block_ms: u64,
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
    #[serde(default = "default_error_threshold")]
    pub error_threshold: u32,
    #[serde(default = "default_timezone_offset_hours")]
    pub timezone_offset_hours: i32,

    pub postgres: PostgresConfig,
    pub redis: RedisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            dbname: "logpipe".to_string(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self { host: "localhost".to_string(), port: 6379 }
    }
}

impl WorkerConfig {
    /// # Errors
    ///
    /// Returns an error if the file exists but fails to parse.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) if std::path::Path::new(p).exists() => {
                let text = std::fs::read_to_string(p)?;
                toml::from_str(&text)?
            }
            _ => Self {
                worker_name: default_worker_name(),
                stream_key: default_stream_key(),
                consumer_group: default_consumer_group(),
                batch_size: default_batch_size(),
                block_ms: default_block_ms(),
                backoff_secs: default_backoff_secs(),
                error_threshold: default_error_threshold(),
                timezone_offset_hours: default_timezone_offset_hours(),
                postgres: PostgresConfig::default(),
                redis: RedisConfig::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("POSTGRES_HOST") {
            self.postgres.host = v;
        }
        if let Ok(v) = std::env::var("POSTGRES_PORT") {
            if let Ok(port) = v.parse() {
                self.postgres.port = port;
            }
        }
        if let Ok(v) = std::env::var("POSTGRES_USER") {
            self.postgres.user = v;
        }
        if let Ok(v) = std::env::var("POSTGRES_PASSWORD") {
            self.postgres.password = v;
        }
        if let Ok(v) = std::env::var("POSTGRES_DB") {
            self.postgres.dbname = v;
        }
        if let Ok(v) = std::env::var("REDIS_HOST") {
            self.redis.host = v;
        }
        if let Ok(v) = std::env::var("REDIS_PORT") {
            if let Ok(port) = v.parse() {
                self.redis.port = port;
            }
        }
        if let Ok(v) = std::env::var("WORKER_NAME") {
            self.worker_name = v;
        }
    }

    #[must_use]
    pub fn timezone_offset(&self) -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(self.timezone_offset_hours * 3600)
            .expect("configured timezone offset must be within +/-24h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_tunables() {
        let config = WorkerConfig::load(None).unwrap();
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.block_ms, 5000);
        assert_eq!(config.backoff_secs, 5);
        assert_eq!(config.error_threshold, 10);
    }

    #[test]
    fn worker_name_env_override_wins() {
        std::env::set_var("WORKER_NAME", "worker-7");
        let config = WorkerConfig::load(None).unwrap();
        assert_eq!(config.worker_name, "worker-7");
        std::env::remove_var("WORKER_NAME");
    }
}

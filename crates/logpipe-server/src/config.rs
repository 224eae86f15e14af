//! Configuration loading: an optional TOML file, overridden by
//! environment variables (spec §6, §9 "process-wide singletons").
//!
//! Grounded on the teacher's file-then-env precedence pattern: defaults
//! live in code, an optional file overrides them, and environment
//! variables win over both — so the same binary runs unmodified across
//! dev/staging/prod.

use std::net::SocketAddr;

use serde::Deserialize;

fn default_http_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default bind address")
}

fn default_instance_name() -> String {
    "logpipe-server".to_string()
}

fn default_stream_key() -> String {
    "logs:stream".to_string()
}

fn default_consumer_group() -> String {
    "log_workers".to_string()
}

fn default_stream_max_len() -> u64 {
    100_000
}

fn default_cache_prefix() -> String {
    // Keeps real keys matching spec's `cache:logs:{device_id}:{limit}`
    // and `cache:stats` exactly, since `RedisCacheClient` namespaces as
    // `{prefix}:{key}` and the route handlers pass bare `logs:...`/`stats`.
    "cache".to_string()
}

fn default_timezone_offset_hours() -> i32 {
    8
}

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_http_addr")]
    pub http_addr: SocketAddr,
    #[serde(default = "default_instance_name")]
    pub instance_name: String,

    pub postgres: PostgresConfig,
    pub redis: RedisConfig,

    #[serde(default = "default_stream_key")]
    pub stream_key: String,
    #[serde(default = "default_consumer_group")]
    pub consumer_group: String,
    #[serde(default = "default_stream_max_len")]
    pub stream_max_len: u64,
    #[serde(default = "default_cache_prefix")]
    pub cache_key_prefix: String,
    /// Hours east of UTC used to stamp and render timestamps (spec §9:
    /// Asia/Taipei by default, but explicitly configurable).
    #[serde(default = "default_timezone_offset_hours")]
    pub timezone_offset_hours: i32,
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

impl ServerConfig {
    /// Load configuration from an optional TOML file at `path`, then
    /// apply environment variable overrides (spec §6's `POSTGRES_*`,
    /// `REDIS_*`, `INSTANCE_NAME`).
    ///
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
                http_addr: default_http_addr(),
                instance_name: default_instance_name(),
                postgres: PostgresConfig::default(),
                redis: RedisConfig::default(),
                stream_key: default_stream_key(),
                consumer_group: default_consumer_group(),
                stream_max_len: default_stream_max_len(),
                cache_key_prefix: default_cache_prefix(),
                timezone_offset_hours: default_timezone_offset_hours(),
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
        if let Ok(v) = std::env::var("INSTANCE_NAME") {
            self.instance_name = v;
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
    fn env_overrides_win_over_defaults() {
        std::env::set_var("POSTGRES_HOST", "db.internal");
        let config = ServerConfig::load(None).unwrap();
        assert_eq!(config.postgres.host, "db.internal");
        std::env::remove_var("POSTGRES_HOST");
    }

    #[test]
    fn default_timezone_offset_is_asia_taipei() {
        let config = ServerConfig::load(None).unwrap();
        assert_eq!(config.timezone_offset_hours, 8);
    }
}

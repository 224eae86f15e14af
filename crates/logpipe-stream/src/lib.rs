//! Typed wrapper over the durable append-only stream (C1, spec §4.1).
//!
//! Grounded on the teacher's Redis Streams usage in
//! `fraiseql_rs/src/subscriptions/event_bus/redis.rs` (XADD / XGROUP
//! CREATE / XREADGROUP / XACK over a cloneable
//! `redis::aio::ConnectionManager`) and the queue abstraction shape of
//! `fraiseql-observers/src/job_queue/{traits,redis}.rs`.

mod id;

pub use id::StreamId;

use std::collections::HashMap;

use async_trait::async_trait;
use logpipe_error::StreamError;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// The string-keyed fields carried by one stream entry (spec §3).
pub type StreamEntryFields = HashMap<String, String>;

/// Operations C1 exposes to the ingest front-end and the worker.
#[async_trait]
pub trait StreamClient: Send + Sync {
    /// Append one entry, applying the stream's approximate trim policy.
    async fn append(&self, entry: StreamEntryFields) -> Result<StreamId, StreamError>;

    /// Pipelined batch append: one network round trip for the whole
    /// slice, same trim policy applied per entry.
    async fn append_many(&self, entries: Vec<StreamEntryFields>) -> Result<Vec<StreamId>, StreamError>;

    /// Idempotently ensure the consumer group exists on the stream.
    async fn ensure_group(&self, group: &str) -> Result<(), StreamError>;

    /// Read up to `count` new entries for `group`/`consumer`, blocking
    /// up to `block_ms` for arrivals.
    async fn read_group(
        &self,
        group: &str,
        consumer: &str,
        count: u64,
        block_ms: u64,
    ) -> Result<Vec<(StreamId, StreamEntryFields)>, StreamError>;

    /// Mark the given IDs as completed for `group`.
    async fn ack(&self, group: &str, ids: &[StreamId]) -> Result<(), StreamError>;

    /// Current approximate stream length.
    async fn len(&self) -> Result<u64, StreamError>;
}

/// Redis-backed [`StreamClient`].
#[derive(Clone)]
pub struct RedisStreamClient {
    conn: ConnectionManager,
    stream_key: String,
    max_len: u64,
}

impl RedisStreamClient {
    /// Create a client bound to a fixed stream key.
    ///
    /// `max_len` is the approximate cap (spec §3: ≈100,000) applied via
    /// `MAXLEN ~` on every append.
    #[must_use]
    pub fn new(conn: ConnectionManager, stream_key: impl Into<String>, max_len: u64) -> Self {
        Self { conn, stream_key: stream_key.into(), max_len }
    }

    fn fields_to_pairs(entry: &StreamEntryFields) -> Vec<(&str, &str)> {
        entry.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

#[async_trait]
impl StreamClient for RedisStreamClient {
    async fn append(&self, entry: StreamEntryFields) -> Result<StreamId, StreamError> {
        let pairs = Self::fields_to_pairs(&entry);
        let raw_id: String = self
            .conn
            .clone()
            .xadd_maxlen(&self.stream_key, redis::streams::StreamMaxlen::Approx(self.max_len as usize), "*", &pairs)
            .await
            .map_err(|e| StreamError::Unavailable(e.to_string()))?;

        raw_id.parse().map_err(|_| StreamError::MalformedId(raw_id))
    }

    async fn append_many(&self, entries: Vec<StreamEntryFields>) -> Result<Vec<StreamId>, StreamError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for entry in &entries {
            let pairs = Self::fields_to_pairs(entry);
            pipe.cmd("XADD")
                .arg(&self.stream_key)
                .arg("MAXLEN")
                .arg("~")
                .arg(self.max_len)
                .arg("*")
                .arg(pairs);
        }

        let raw_ids: Vec<String> =
            pipe.query_async(&mut self.conn.clone()).await.map_err(|e| StreamError::Unavailable(e.to_string()))?;

        raw_ids
            .into_iter()
            .map(|raw| raw.parse().map_err(|_| StreamError::MalformedId(raw)))
            .collect()
    }

    async fn ensure_group(&self, group: &str) -> Result<(), StreamError> {
        let result: redis::RedisResult<String> = self
            .conn
            .clone()
            .xgroup_create_mkstream(&self.stream_key, group, "0")
            .await;

        match result {
            Ok(_) => Ok(()),
            // BUSYGROUP: the group already exists — idempotent success.
            Err(e) if e.to_string().contains("BUSYGROUP") => {
                tracing::debug!(%group, "consumer group already exists");
                Ok(())
            }
            Err(e) => Err(StreamError::Unavailable(e.to_string())),
        }
    }

    async fn read_group(
        &self,
        group: &str,
        consumer: &str,
        count: u64,
        block_ms: u64,
    ) -> Result<Vec<(StreamId, StreamEntryFields)>, StreamError> {
        let opts = redis::streams::StreamReadOptions::default()
            .group(group, consumer)
            .count(count as usize)
            .block(block_ms as usize);

        let reply: redis::streams::StreamReadReply = self
            .conn
            .clone()
            .xread_options(&[&self.stream_key], &[">"], &opts)
            .await
            .map_err(|e| StreamError::Unavailable(e.to_string()))?;

        let mut out = Vec::new();
        for key in reply.keys {
            for entry in key.ids {
                let id: StreamId =
                    entry.id.parse().map_err(|_| StreamError::MalformedId(entry.id.clone()))?;
                let mut fields = StreamEntryFields::new();
                for (field, value) in entry.map {
                    if let redis::Value::BulkString(bytes) = value {
                        fields.insert(field, String::from_utf8_lossy(&bytes).into_owned());
                    }
                }
                out.push((id, fields));
            }
        }

        Ok(out)
    }

    async fn ack(&self, group: &str, ids: &[StreamId]) -> Result<(), StreamError> {
        if ids.is_empty() {
            return Ok(());
        }
        let raw_ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let _: i64 = self
            .conn
            .clone()
            .xack(&self.stream_key, group, &raw_ids)
            .await
            .map_err(|e| StreamError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn len(&self) -> Result<u64, StreamError> {
        let len: u64 =
            self.conn.clone().xlen(&self.stream_key).await.map_err(|e| StreamError::Unavailable(e.to_string()))?;
        Ok(len)
    }
}

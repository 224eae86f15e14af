//! The canonical `LogRecord` and its relational counterpart, `StoredLog`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A single log record as submitted by a device.
///
/// Crosses every component: the validator checks it, the ingest
/// front-end stamps a timestamp on it, the stream carries its fields as
/// strings, and the worker turns it into a [`StoredLog`] row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Short device identifier, 1..50 bytes.
    pub device_id: String,
    /// One of DEBUG/INFO/WARNING/ERROR/CRITICAL, but not enforced as a
    /// closed set — see [`crate::KNOWN_LEVELS`].
    pub log_level: String,
    /// Free text, 1..5000 bytes.
    pub message: String,
    /// Free-form JSON object, defaults to `{}`.
    #[serde(default = "default_log_data")]
    pub log_data: serde_json::Value,
    /// Stamped by the ingest front-end at enqueue time; absent on the
    /// wire from the client, present on everything downstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

fn default_log_data() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// A request body carrying 1..1000 records for `/api/logs/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchLogRequest {
    /// The records to enqueue, in submission order.
    pub logs: Vec<LogRecord>,
}

/// A row as persisted in the `logs` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLog {
    /// Surrogate primary key.
    pub id: i64,
    /// See [`LogRecord::device_id`].
    pub device_id: String,
    /// See [`LogRecord::log_level`].
    pub log_level: String,
    /// See [`LogRecord::message`].
    pub message: String,
    /// See [`LogRecord::log_data`].
    pub log_data: serde_json::Value,
    /// When the ingest front-end stamped the record.
    pub created_at: DateTime<FixedOffset>,
    /// When the worker's insert committed.
    pub indexed_at: DateTime<FixedOffset>,
}

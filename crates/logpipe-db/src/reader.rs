//! Parameterised read queries (C4, spec §4.4).

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use deadpool_postgres::Pool;
use logpipe_core::StoredLog;
use logpipe_error::StoreError;

/// The device with the most recent activity, and when.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecentDevice {
    pub device_id: String,
    pub last_seen: DateTime<FixedOffset>,
}

/// Reads rows out of the `logs` table.
///
/// `display_offset` is the timezone instants are rendered in on the way
/// out — Postgres itself always returns `TIMESTAMPTZ` as UTC, so the
/// driver round-trip goes through `DateTime<Utc>` and is converted here
/// (spec §9: timezone offset is a configurable display concern, not a
/// storage one).
#[derive(Clone)]
pub struct PgReader {
    pool: Pool,
    display_offset: FixedOffset,
}

impl PgReader {
    #[must_use]
    pub fn new(pool: Pool, display_offset: FixedOffset) -> Self {
        Self { pool, display_offset }
    }

    /// Most recent `limit` rows for `device_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connection or query failure.
    pub async fn recent_by_device(&self, device_id: &str, limit: i64) -> Result<Vec<StoredLog>, StoreError> {
        let client = self.pool.get().await.map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let rows = client
            .query(
                "SELECT id, device_id, log_level, message, log_data, created_at, indexed_at \
                 FROM logs WHERE device_id = $1 ORDER BY created_at DESC LIMIT $2",
                &[&device_id, &limit],
            )
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.into_iter().map(|r| self.row_to_stored_log(&r)).collect()
    }

    /// Total row count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connection or query failure.
    pub async fn count_total(&self) -> Result<i64, StoreError> {
        let client = self.pool.get().await.map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let row = client
            .query_one("SELECT COUNT(*) AS total FROM logs", &[])
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(row.get::<_, i64>("total"))
    }

    /// Row count grouped by `log_level`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connection or query failure.
    pub async fn count_by_level(&self) -> Result<HashMap<String, i64>, StoreError> {
        let client = self.pool.get().await.map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let rows = client
            .query("SELECT log_level, COUNT(*) AS n FROM logs GROUP BY log_level", &[])
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(rows.into_iter().map(|r| (r.get::<_, String>("log_level"), r.get::<_, i64>("n"))).collect())
    }

    /// The `k` devices with the greatest `max(created_at)`, ordered by
    /// that maximum, descending.
    ///
    /// Deliberately `GROUP BY device_id` + `MAX(created_at)`, not
    /// `SELECT DISTINCT device_id ... ORDER BY created_at` — the latter
    /// is the bug the source exhibited (§9 open question).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connection or query failure.
    pub async fn recent_devices(&self, k: i64) -> Result<Vec<RecentDevice>, StoreError> {
        let client = self.pool.get().await.map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let rows = client
            .query(
                "SELECT device_id, MAX(created_at) AS last_seen FROM logs \
                 GROUP BY device_id ORDER BY last_seen DESC LIMIT $1",
                &[&k],
            )
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let last_seen_utc: DateTime<Utc> = r.get("last_seen");
                RecentDevice {
                    device_id: r.get("device_id"),
                    last_seen: last_seen_utc.with_timezone(&self.display_offset),
                }
            })
            .collect())
    }

    fn row_to_stored_log(&self, row: &tokio_postgres::Row) -> Result<StoredLog, StoreError> {
        let created_at_utc: DateTime<Utc> = row.get("created_at");
        let indexed_at_utc: DateTime<Utc> = row.get("indexed_at");
        Ok(StoredLog {
            id: row.get("id"),
            device_id: row.get("device_id"),
            log_level: row.get("log_level"),
            message: row.get("message"),
            log_data: row.get("log_data"),
            created_at: created_at_utc.with_timezone(&self.display_offset),
            indexed_at: indexed_at_utc.with_timezone(&self.display_offset),
        })
    }
}

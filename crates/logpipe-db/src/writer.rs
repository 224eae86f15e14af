//! Batch insert into `logs` (C3, spec §4.3).

use chrono::Utc;
use deadpool_postgres::Pool;
use logpipe_error::StoreError;

/// One row ready to be inserted, already decoded from a stream entry.
#[derive(Debug, Clone)]
pub struct InsertRow {
    pub device_id: String,
    pub log_level: String,
    pub message: String,
    pub log_data: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Writes batches of [`InsertRow`] into the `logs` table.
#[derive(Clone)]
pub struct PgWriter {
    pool: Pool,
}

impl PgWriter {
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Insert `rows` in a single transaction, one parameterised multi-row
    /// `INSERT`. All-or-nothing: any failure rolls back the whole batch,
    /// with no per-row error reporting (spec §4.3).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if a connection can't be
    /// leased, [`StoreError::WriteFailed`] if the statement or commit
    /// fails.
    pub async fn insert_batch(&self, rows: &[InsertRow]) -> Result<(), StoreError> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut client =
            self.pool.get().await.map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let txn = client.transaction().await.map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let mut sql = String::from(
            "INSERT INTO logs (device_id, log_level, message, log_data, created_at, indexed_at) VALUES ",
        );
        let mut params: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> = Vec::with_capacity(rows.len() * 5);
        let mut log_data_json: Vec<String> = Vec::with_capacity(rows.len());
        let mut created_at_utc: Vec<chrono::DateTime<Utc>> = Vec::with_capacity(rows.len());

        for row in rows {
            log_data_json.push(row.log_data.to_string());
            created_at_utc.push(row.created_at.with_timezone(&Utc));
        }

        for (i, row) in rows.iter().enumerate() {
            let base = i * 5;
            if i > 0 {
                sql.push(',');
            }
            sql.push_str(&format!(
                " (${}, ${}, ${}, CAST(${} AS JSONB), ${}, now())",
                base + 1,
                base + 2,
                base + 3,
                base + 4,
                base + 5,
            ));
            params.push(&row.device_id);
            params.push(&row.log_level);
            params.push(&row.message);
            params.push(&log_data_json[i]);
            params.push(&created_at_utc[i]);
        }

        if let Err(e) = txn.execute(sql.as_str(), &params).await {
            tracing::error!(error = %e, batch_size = rows.len(), "batch insert failed, rolling back");
            return Err(StoreError::WriteFailed(e.to_string()));
        }
        txn.commit().await.map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_row_carries_json_log_data() {
        let row = InsertRow {
            device_id: "device_001".to_string(),
            log_level: "ERROR".to_string(),
            message: "boom".to_string(),
            log_data: serde_json::json!({"error_code": "DB_CONN_001"}),
            created_at: chrono::DateTime::parse_from_rfc3339("2026-07-28T12:00:00+08:00").unwrap(),
        };
        assert_eq!(row.log_data["error_code"], "DB_CONN_001");
    }
}

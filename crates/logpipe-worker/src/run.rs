//! The consumer loop (C8, spec §4.8).
//!
//! Grounded on the teacher's `fraiseql-observers/src/queued_executor.rs`
//! batch-consume shape and `operational/shutdown.rs`'s
//! flag-checked-at-loop-boundary cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::FixedOffset;
use logpipe_db::{InsertRow, PgWriter};
use logpipe_stream::{RedisStreamClient, StreamClient, StreamId};
use logpipe_telemetry::{record_batch_processing_duration, record_processing_error, record_redis_operation_duration};
use tracing::{error, info, warn};

use crate::config::WorkerConfig;
use crate::decode::decode_entry;
use crate::state::WorkerState;

/// Runs the batch-read / decode / insert / ack loop until `shutdown` is
/// set or the consecutive-error threshold trips.
///
/// # Errors
///
/// Returns an error once `config.error_threshold` consecutive failures
/// (stream or store) have occurred; the caller should exit non-zero.
pub async fn run(
    stream: RedisStreamClient,
    writer: PgWriter,
    config: WorkerConfig,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let mut state = WorkerState::Starting;
    let offset = config.timezone_offset();

    stream.ensure_group(&config.consumer_group).await?;
    state = WorkerState::Running;
    info!(state = %state, worker = %config.worker_name, "worker started");

    let mut consecutive_errors: u32 = 0;

    loop {
        if shutdown.load(Ordering::SeqCst) {
            state = WorkerState::Draining;
            info!(state = %state, "shutdown signalled, draining");
            break;
        }

        let read_start = Instant::now();
        let entries = match stream
            .read_group(&config.consumer_group, &config.worker_name, config.batch_size, config.block_ms)
            .await
        {
            Ok(entries) => {
                record_redis_operation_duration("read_group", read_start.elapsed().as_secs_f64());
                entries
            }
            Err(e) => {
                consecutive_errors += 1;
                state = WorkerState::Backoff;
                error!(state = %state, error = %e, consecutive_errors, "stream read failed");
                if consecutive_errors >= config.error_threshold {
                    anyhow::bail!("aborting after {consecutive_errors} consecutive stream errors: {e}");
                }
                tokio::time::sleep(Duration::from_secs(config.backoff_secs)).await;
                state = WorkerState::Running;
                continue;
            }
        };

        if entries.is_empty() {
            continue;
        }

        let (rows, all_ids) = decode_batch(&entries, offset);

        if rows.is_empty() {
            // Every entry in the batch failed to decode: nothing to
            // insert, but the IDs must still be acked to avoid an
            // infinite re-delivery loop (spec §7 DecodeError).
            if let Err(e) = stream.ack(&config.consumer_group, &all_ids).await {
                warn!(error = %e, "ack failed for all-undecodable batch, entries will be re-delivered");
            }
            continue;
        }

        let insert_start = Instant::now();
        match writer.insert_batch(&rows).await {
            Ok(()) => {
                record_batch_processing_duration(rows.len(), insert_start.elapsed().as_secs_f64());
                if let Err(e) = stream.ack(&config.consumer_group, &all_ids).await {
                    warn!(error = %e, "ack failed after successful insert, entries may be re-delivered");
                }
                consecutive_errors = 0;
                state = WorkerState::Running;
            }
            Err(e) => {
                consecutive_errors += 1;
                state = WorkerState::Backoff;
                record_processing_error("store_write_failed");
                error!(state = %state, error = %e, consecutive_errors, "batch insert failed, not acking");
                if consecutive_errors >= config.error_threshold {
                    anyhow::bail!("aborting after {consecutive_errors} consecutive store errors: {e}");
                }
                tokio::time::sleep(Duration::from_secs(config.backoff_secs)).await;
                state = WorkerState::Running;
            }
        }
    }

    state = WorkerState::Stopped;
    info!(state = %state, "worker stopped");
    Ok(())
}

/// Decode every entry in the batch. Entries that fail to decode are
/// dropped from `rows` but their IDs still appear in the returned ID
/// list (spec §4.8 step 2).
fn decode_batch(
    entries: &[(StreamId, logpipe_stream::StreamEntryFields)],
    fallback_offset: FixedOffset,
) -> (Vec<InsertRow>, Vec<StreamId>) {
    let mut rows = Vec::with_capacity(entries.len());
    let mut ids = Vec::with_capacity(entries.len());

    for (id, fields) in entries {
        ids.push(id.clone());
        match decode_entry(fields, fallback_offset) {
            Ok(row) => rows.push(row),
            Err(e) => {
                record_processing_error("decode_error");
                warn!(id = %id, error = %e, "dropping undecodable entry, will still ack");
            }
        }
    }

    (rows, ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_batch_acks_failed_entries_without_inserting_them() {
        let mut good = logpipe_stream::StreamEntryFields::new();
        good.insert("device_id".to_string(), "device_001".to_string());
        good.insert("log_level".to_string(), "INFO".to_string());
        good.insert("message".to_string(), "hi".to_string());
        good.insert("log_data".to_string(), "{}".to_string());

        let bad = logpipe_stream::StreamEntryFields::new();

        let id_a: StreamId = "1-0".parse().unwrap();
        let id_b: StreamId = "2-0".parse().unwrap();
        let entries = vec![(id_a.clone(), good), (id_b.clone(), bad)];

        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let (rows, ids) = decode_batch(&entries, offset);

        assert_eq!(rows.len(), 1);
        assert_eq!(ids, vec![id_a, id_b]);
    }
}

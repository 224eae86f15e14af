//! Periodic host/stream sampler, every 15 s (spec §4.9).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sysinfo::{Disks, System};
use tokio::task::JoinHandle;

use crate::gauges::{set_host_cpu_percent, set_host_disk_bytes, set_host_memory_bytes, set_stream_size};

const SAMPLE_INTERVAL: Duration = Duration::from_secs(15);

/// Supplies the current approximate stream length for the sampler, kept
/// decoupled from any particular stream implementation.
#[async_trait]
pub trait StreamLenSource: Send + Sync {
    async fn stream_len(&self) -> Option<u64>;
}

/// Spawn the background sampler task. Returns its [`JoinHandle`]; abort
/// it (or drop on process exit) to stop sampling.
pub fn spawn_sampler(source: Arc<dyn StreamLenSource>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut system = System::new_all();
        let mut interval = tokio::time::interval(SAMPLE_INTERVAL);

        loop {
            interval.tick().await;
            system.refresh_cpu_usage();
            system.refresh_memory();

            let cpu_percent = system.global_cpu_usage();
            set_host_cpu_percent(cpu_percent);

            let used = system.used_memory();
            let total = system.total_memory();
            let available = system.available_memory();
            set_host_memory_bytes(used, available, total);

            let disks = Disks::new_with_refreshed_list();
            let (disk_used, disk_free, disk_total) = disks.iter().fold((0u64, 0u64, 0u64), |acc, disk| {
                let total = disk.total_space();
                let free = disk.available_space();
                (acc.0 + total.saturating_sub(free), acc.1 + free, acc.2 + total)
            });
            set_host_disk_bytes(disk_used, disk_free, disk_total);

            if let Some(len) = source.stream_len().await {
                set_stream_size(len);
            }
        }
    })
}

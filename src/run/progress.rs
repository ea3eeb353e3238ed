//! Periodic progress logging while probes run.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::app::log_progress;
use crate::config::LOGGING_INTERVAL;

/// Spawns a task logging probe progress every `LOGGING_INTERVAL` seconds
/// until `cancel` fires.
pub(crate) fn spawn_progress_logger(
    cancel: CancellationToken,
    start_time: Instant,
    probed: &Arc<AtomicUsize>,
) -> JoinHandle<()> {
    let probed = Arc::clone(probed);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL as u64));
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    log_progress(start_time, &probed);
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
    })
}

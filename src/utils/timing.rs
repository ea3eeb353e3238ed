//! Timing metrics for probe analysis.
//!
//! This module aggregates probe latencies so a run can report how slow the
//! merged sources are overall.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Aggregated latency statistics across all successful probes.
///
/// All values are milliseconds. Failed probes are not recorded here; they are
/// counted by category in `ProcessingStats`.
#[derive(Debug)]
pub struct TimingStats {
    /// Number of successful probes
    pub count: AtomicU64,
    /// Sum of measured latencies (for average calculation)
    pub sum_ms: AtomicU64,
    /// Fastest measured latency
    pub min_ms: AtomicU64,
    /// Slowest measured latency
    pub max_ms: AtomicU64,
}

impl Default for TimingStats {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_ms: AtomicU64::new(0),
            min_ms: AtomicU64::new(u64::MAX),
            max_ms: AtomicU64::new(0),
        }
    }
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one measured latency.
    pub fn record(&self, latency_ms: u64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_ms.fetch_add(latency_ms, Ordering::Relaxed);
        self.min_ms.fetch_min(latency_ms, Ordering::Relaxed);
        self.max_ms.fetch_max(latency_ms, Ordering::Relaxed);
    }

    /// Average latency, or `None` if nothing was measured.
    pub fn average_ms(&self) -> Option<u64> {
        let count = self.count.load(Ordering::Relaxed);
        if count == 0 {
            return None;
        }
        Some(self.sum_ms.load(Ordering::Relaxed) / count)
    }

    /// Logs a summary of timing statistics.
    pub fn log_summary(&self) {
        let count = self.count.load(Ordering::Relaxed);
        let Some(avg) = self.average_ms() else {
            log::info!("No timing data collected");
            return;
        };

        log::info!("=== Probe Timing Summary ({} measured sites) ===", count);
        log::info!("  {:20} {:>6} ms", "Average:", avg);
        log::info!(
            "  {:20} {:>6} ms",
            "Fastest:",
            self.min_ms.load(Ordering::Relaxed)
        );
        log::info!(
            "  {:20} {:>6} ms",
            "Slowest:",
            self.max_ms.load(Ordering::Relaxed)
        );
    }
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

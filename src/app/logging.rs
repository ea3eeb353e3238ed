//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Logs how many latency probes have completed so far.
///
/// # Arguments
///
/// * `start_time` - When probing started
/// * `probed` - Atomic counter of completed probes
pub fn log_progress(start_time: Instant, probed: &Arc<AtomicUsize>) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = probed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Probed {} sites in {:.2} seconds (~{:.2} sites/sec)",
        completed, elapsed_secs, rate
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_with_zero_probes() {
        log_progress(Instant::now(), &Arc::new(AtomicUsize::new(0)));
    }

    #[test]
    fn test_log_progress_does_not_modify_counter() {
        let probed = Arc::new(AtomicUsize::new(7));
        log_progress(Instant::now(), &probed);
        assert_eq!(probed.load(Ordering::SeqCst), 7);
    }
}

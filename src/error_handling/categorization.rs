//! Error categorization.
//!
//! This module maps network errors onto probe failure kinds and statistics
//! categories.

use super::stats::ProcessingStats;
use super::types::ErrorType;
use crate::probe::ProbeFailure;

/// Categorizes a `reqwest::Error` raised by a probe into a `ProbeFailure`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The matching `ProbeFailure` kind. Anything that is not a timeout,
/// connection or request-building problem is reported as `Other`.
pub fn categorize_probe_error(error: &reqwest::Error) -> ProbeFailure {
    if error.is_timeout() {
        ProbeFailure::Timeout
    } else if error.is_connect() {
        ProbeFailure::Connect
    } else if error.is_request() || error.is_builder() {
        ProbeFailure::Request
    } else {
        ProbeFailure::Other
    }
}

/// Maps a probe failure kind to its statistics category.
pub fn probe_error_type(failure: ProbeFailure) -> ErrorType {
    match failure {
        ProbeFailure::Timeout => ErrorType::ProbeTimeoutError,
        ProbeFailure::Connect => ErrorType::ProbeConnectError,
        ProbeFailure::Request => ErrorType::ProbeRequestError,
        ProbeFailure::Other => ErrorType::ProbeOtherError,
    }
}

/// Updates processing statistics for a failed probe.
///
/// # Arguments
///
/// * `stats` - The processing statistics tracker to update
/// * `failure` - The failure kind reported by the prober
pub fn update_error_stats(stats: &ProcessingStats, failure: ProbeFailure) {
    stats.increment_error(probe_error_type(failure));
}

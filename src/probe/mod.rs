//! Latency probing.
//!
//! This module provides:
//! - The `LatencyProber` seam the selection engine measures sites through
//! - `HttpProber`, the production implementation (HTTP `HEAD`, fixed timeout)
//! - `ProbeBudget`, the run-wide cap on the number of probes

mod budget;
mod http;
mod types;

use std::future::Future;

pub use budget::ProbeBudget;
pub use http::HttpProber;
pub use types::{ProbeFailure, ProbeOutcome};

/// Measures the latency of one site endpoint.
///
/// Implementations never fail: every problem is reported as
/// `ProbeOutcome::Failed`. Probes do not retry.
pub trait LatencyProber: Send + Sync {
    fn probe(&self, api: &str) -> impl Future<Output = ProbeOutcome> + Send;
}

//! HTTP latency prober.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::types::{ProbeFailure, ProbeOutcome};
use super::LatencyProber;
use crate::error_handling::categorize_probe_error;
use crate::utils::duration_to_ms;

/// Measures round-trip time with a `HEAD` request to the site's endpoint.
///
/// Any HTTP response counts as a measurement, whatever its status: the
/// endpoint answered, and the round trip is what gets ranked. Network
/// errors and timeouts are failures.
pub struct HttpProber {
    client: Arc<reqwest::Client>,
    timeout: Duration,
}

impl HttpProber {
    /// Creates a prober.
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client (see `init_probe_client`)
    /// * `timeout` - Upper bound for a single probe, independent of the TTL ceiling
    pub fn new(client: Arc<reqwest::Client>, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

impl LatencyProber for HttpProber {
    async fn probe(&self, api: &str) -> ProbeOutcome {
        let start = Instant::now();
        let result = tokio::time::timeout(
            self.timeout,
            self.client.head(api).timeout(self.timeout).send(),
        )
        .await;

        match result {
            Ok(Ok(response)) => {
                let latency = duration_to_ms(start.elapsed());
                log::trace!("HEAD {} -> {} in {}ms", api, response.status(), latency);
                ProbeOutcome::Measured(latency)
            }
            Ok(Err(e)) => {
                log::debug!("HEAD {} failed: {}", api, e);
                ProbeOutcome::Failed(categorize_probe_error(&e))
            }
            Err(_) => ProbeOutcome::Failed(ProbeFailure::Timeout),
        }
    }
}

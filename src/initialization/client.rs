//! HTTP client initialization.
//!
//! Two clients are built per run: one for fetching subscription sources and
//! one for latency probes. They differ only in their timeouts.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the client used to download subscription sources.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Whole-request timeout of `fetch_timeout_seconds`
/// - Redirect following enabled (reqwest default policy)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_fetch_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.fetch_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the client used for latency probes.
///
/// The per-probe timeout is applied on each request by `HttpProber`; the
/// client only bounds TCP connection setup.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_probe_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

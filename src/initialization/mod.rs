//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger
//! - HTTP clients (source fetching and latency probes)
//! - The HTTP latency prober
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::time::Duration;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::probe::HttpProber;

// Re-export public API
pub use client::{init_fetch_client, init_probe_client};
pub use logger::init_logger_with;

/// Initializes the HTTP prober with the configured per-probe timeout.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the probe client cannot
/// be built.
pub fn init_prober(config: &Config) -> Result<HttpProber, InitializationError> {
    let client = init_probe_client(config)?;
    Ok(HttpProber::new(
        client,
        Duration::from_millis(config.probe_timeout_ms),
    ))
}

//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, sentinel latencies and classification defaults.

/// Progress logging interval in seconds while probes are running
pub const LOGGING_INTERVAL: usize = 5;

/// Default output file for the base58-encoded configuration
pub const DEFAULT_OUTPUT_FILE: &str = "merged_config.b58";

// Network operation timeouts
/// Timeout for fetching one subscription source, in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;
/// Timeout for a single latency probe, in milliseconds.
///
/// Fixed and independent of the TTL ceiling: the ceiling decides whether a
/// measurement is acceptable, this bounds how long a probe may run.
pub const PROBE_TIMEOUT_MS: u64 = 5000;
/// TCP connection timeout for probes, in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default number of probes that may be in flight at once
pub const DEFAULT_PROBE_CONCURRENCY: usize = 8;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Sentinel latencies
/// Latency assigned to a retained site whose probe failed (milliseconds)
pub const FAILED_PROBE_TTL_MS: u64 = 9999;
/// Latency a failed probe is ranked at when comparing protected candidates
pub const FAILED_PROBE_COMPARE_MS: u64 = 5000;
/// Latency assigned to sites that have no endpoint (always healthy)
pub const NO_ENDPOINT_TTL_MS: u64 = 0;

// Site naming
/// Separator between a source-group tag and the actual site name (`"Tag-Name"`)
pub const GROUP_TAG_SEPARATOR: char = '-';
/// Name used for grouping when a site has no `name` field
pub const UNKNOWN_SITE_NAME: &str = "Unknown";

// Protected class defaults
/// Name keywords that mark a site as protected (case-insensitive)
pub const DEFAULT_PROTECTED_NAME_KEYWORDS: &[&str] = &["豆瓣", "douban"];
/// Endpoint keywords that mark a site as protected (case-insensitive)
pub const DEFAULT_PROTECTED_API_KEYWORDS: &[&str] = &["douban"];

// Subscription field names
/// Field holding the site collection in a subscription document
pub const FIELD_API_SITE: &str = "api_site";
/// Passthrough field overwritten by the `cache_time` setting
pub const FIELD_CACHE_TIME: &str = "cache_time";
/// Key prefix for synthesized site keys (`api_1`, `api_2`, ...)
pub const SITE_KEY_PREFIX: &str = "api_";

//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::classify::ProtectedClass;
use crate::config::constants::{
    DEFAULT_OUTPUT_FILE, DEFAULT_PROBE_CONCURRENCY, DEFAULT_PROTECTED_API_KEYWORDS,
    DEFAULT_PROTECTED_NAME_KEYWORDS, DEFAULT_USER_AGENT, FETCH_TIMEOUT_SECS, PROBE_TIMEOUT_MS,
};
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Run configuration.
///
/// Parsed from command-line flags, with environment variables (and a `.env`
/// file loaded by the binary) as fallbacks for the settings the merge job is
/// usually driven by. Can also be constructed programmatically.
///
/// # Examples
///
/// ```no_run
/// use sub_merge::Config;
///
/// let config = Config {
///     sources: vec!["https://example.com/sub.txt".to_string()],
///     ttl: Some(800),
///     max_test_sites: Some(50),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sub_merge",
    about = "Merges subscription sources into one deduplicated, latency-ranked configuration."
)]
pub struct Config {
    /// Subscription sources (URLs or local files), comma separated
    #[arg(long, env = "SUBSCRIPTION_URLS", value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Value written verbatim to `cache_time` in the output
    #[arg(long, env = "CACHE_TIME")]
    pub cache_time: Option<String>,

    /// Latency ceiling in milliseconds (unset: no latency filtering)
    #[arg(long, env = "TTL")]
    pub ttl: Option<u64>,

    /// Maximum number of probes for the whole run (unset: unbounded)
    #[arg(long, env = "MAX_TEST_SITES")]
    pub max_test_sites: Option<usize>,

    /// Output file for the base58-encoded configuration
    #[arg(long, env = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Also write the canonical JSON (unencoded) to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-probe timeout in milliseconds
    #[arg(long, env = "PROBE_TIMEOUT_MS", default_value_t = PROBE_TIMEOUT_MS)]
    pub probe_timeout_ms: u64,

    /// Per-source fetch timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub fetch_timeout_seconds: u64,

    /// Maximum number of probes in flight at once
    #[arg(long, default_value_t = DEFAULT_PROBE_CONCURRENCY)]
    pub probe_concurrency: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Name keywords marking the protected site class (comma separated)
    #[arg(long = "protected-name", value_delimiter = ',', default_values_t = default_keywords(DEFAULT_PROTECTED_NAME_KEYWORDS))]
    pub protected_names: Vec<String>,

    /// Endpoint keywords marking the protected site class (comma separated)
    #[arg(long = "protected-api", value_delimiter = ',', default_values_t = default_keywords(DEFAULT_PROTECTED_API_KEYWORDS))]
    pub protected_apis: Vec<String>,

    /// Rewrite retained site names to their normalized name (group tag removed)
    #[arg(long)]
    pub strip_source_tags: bool,

    /// Show probe timing statistics at the end of the run
    #[arg(long)]
    pub show_timing: bool,
}

fn default_keywords(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            cache_time: None,
            ttl: None,
            max_test_sites: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            json_output: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            probe_timeout_ms: PROBE_TIMEOUT_MS,
            fetch_timeout_seconds: FETCH_TIMEOUT_SECS,
            probe_concurrency: DEFAULT_PROBE_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            protected_names: default_keywords(DEFAULT_PROTECTED_NAME_KEYWORDS),
            protected_apis: default_keywords(DEFAULT_PROTECTED_API_KEYWORDS),
            strip_source_tags: false,
            show_timing: false,
        }
    }
}

impl Config {
    /// Returns the configured sources, trimmed, with empty entries removed.
    pub fn source_list(&self) -> Vec<String> {
        self.sources
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Builds the protected-class matcher from the configured keywords.
    pub fn protected_class(&self) -> ProtectedClass {
        ProtectedClass::new(self.protected_names.as_slice(), self.protected_apis.as_slice())
    }

    /// Validates the configuration before any processing starts.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValidationError` naming the offending field. A missing
    /// source list is fatal: the run aborts before fetching anything.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.source_list().is_empty() {
            return Err(ConfigValidationError::new(
                "sources",
                "at least one subscription source is required (set SUBSCRIPTION_URLS or --sources)",
            ));
        }
        if self.probe_timeout_ms == 0 {
            return Err(ConfigValidationError::new(
                "probe_timeout_ms",
                "probe timeout must be greater than 0",
            ));
        }
        if self.fetch_timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "fetch_timeout_seconds",
                "fetch timeout must be greater than 0",
            ));
        }
        if self.probe_concurrency == 0 {
            return Err(ConfigValidationError::new(
                "probe_concurrency",
                "probe concurrency must be greater than 0",
            ));
        }
        Ok(())
    }
}

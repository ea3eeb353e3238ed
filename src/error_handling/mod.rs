//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, configuration, sources, output)
//! - Processing statistics tracking (errors, warnings, info metrics)
//! - Probe error categorization
//!
//! Statistics are categorized into:
//! - **Errors**: Skipped sources and failed probes
//! - **Warnings**: Site entries missing optional fields
//! - **Info**: Merge and selection decisions (duplicates, drops, forced retention)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_probe_error, probe_error_type, update_error_stats};
pub use stats::ProcessingStats;
pub use types::{
    ConfigValidationError, ErrorType, InfoType, InitializationError, OutputError, SourceError,
    WarningType,
};

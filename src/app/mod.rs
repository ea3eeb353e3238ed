//! Main application modules.
//!
//! This module provides progress logging, shutdown handling, and statistics
//! printing used by the merge run.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_error_statistics, print_run_summary, print_timing_statistics};

//! Utility functions.
//!
//! This module provides:
//! - Timing metrics for probe analysis
//! - Log-friendly string truncation

mod timing;

pub use timing::{duration_to_ms, TimingStats};

/// Truncates `s` to at most `max_chars` characters for log output.
///
/// Counts characters, not bytes, so multi-byte names are never split.
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

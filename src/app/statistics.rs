//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};
use crate::utils::TimingStats;

/// Prints a one-line summary of the run.
///
/// Works with both plain and JSON log formats (log::info! handles formatting).
pub fn print_run_summary(
    sources_loaded: usize,
    sources_total: usize,
    sites_output: usize,
    elapsed_seconds: f64,
) {
    info!(
        "✅ Merged {} of {} source{} into {} site{} in {:.1}s",
        sources_loaded,
        sources_total,
        if sources_total == 1 { "" } else { "s" },
        sites_output,
        if sites_output == 1 { "" } else { "s" },
        elapsed_seconds
    );
}

/// Prints probe timing statistics.
pub fn print_timing_statistics(timing_stats: &TimingStats) {
    timing_stats.log_summary();
}

/// Prints error, warning, and info statistics to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_warnings = error_stats.total_warnings();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = error_stats.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_statistics_empty() {
        print_error_statistics(&ProcessingStats::new());
    }

    #[test]
    fn test_print_error_statistics_all_types() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::SourceFetchError);
        stats.increment_error(ErrorType::ProbeTimeoutError);
        stats.increment_warning(WarningType::MissingApi);
        stats.increment_info(InfoType::DuplicateSiteDropped);
        stats.increment_info(InfoType::ProtectedSiteForced);
        print_error_statistics(&stats);
        assert_eq!(stats.total_errors(), 2);
    }

    #[test]
    fn test_print_timing_statistics() {
        let timing = TimingStats::new();
        print_timing_statistics(&timing);
        timing.record(120);
        print_timing_statistics(&timing);
    }

    #[test]
    fn test_print_run_summary() {
        print_run_summary(1, 1, 1, 0.2);
        print_run_summary(2, 3, 0, 12.0);
    }
}

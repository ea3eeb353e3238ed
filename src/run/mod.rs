//! Merge run orchestration.
//!
//! Loads every source, merges them, selects and ranks the sites, and writes
//! the encoded result.

mod progress;

use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::app::{
    log_progress, print_error_statistics, print_run_summary, print_timing_statistics,
    shutdown_gracefully,
};
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::initialization::{init_fetch_client, init_prober};
use crate::merge::merge_subscriptions;
use crate::output::encode_and_save;
use crate::probe::ProbeBudget;
use crate::rank::rank_sites;
use crate::select::SelectionContext;
use crate::source::load_all;
use crate::subscription::Subscription;
use crate::utils::TimingStats;

/// Results of a merge run.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Number of configured sources
    pub sources_total: usize,
    /// Number of sources that loaded and decoded
    pub sources_loaded: usize,
    /// Number of sites after merging and deduplication
    pub sites_merged: usize,
    /// Number of sites written to the output
    pub sites_output: usize,
    /// Number of latency probes issued
    pub probes_issued: usize,
    /// Path of the base58 output file
    pub output_path: PathBuf,
    /// Size of the canonical JSON in bytes
    pub json_bytes: usize,
    /// Size of the encoded output in bytes
    pub encoded_bytes: usize,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs a full merge with the provided configuration.
///
/// This is the main entry point for the library: sources are fetched and
/// decoded, merged with endpoint deduplication, reduced to one site per
/// name group (probing latencies within the budget), ranked, and written
/// base58-encoded to `config.output`.
///
/// # Errors
///
/// This function will return an error if:
/// - The configuration is invalid (e.g. no sources)
/// - The HTTP clients cannot be initialized
/// - None of the sources could be loaded
/// - The output cannot be written
///
/// A source that fails to load is skipped, not an error.
///
/// # Example
///
/// ```no_run
/// use sub_merge::{run_merge, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     sources: vec!["https://example.com/sub.txt".to_string()],
///     ttl: Some(800),
///     ..Default::default()
/// };
/// let report = run_merge(config).await?;
/// println!("Wrote {} sites", report.sites_output);
/// # Ok(())
/// # }
/// ```
pub async fn run_merge(config: Config) -> Result<MergeReport> {
    config
        .validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let sources = config.source_list();
    info!("Loaded {} subscription sources", sources.len());
    if let Some(cache_time) = &config.cache_time {
        info!("Cache time: {}", cache_time);
    }
    if let Some(ttl) = config.ttl {
        info!("TTL filter: {}ms", ttl);
    }
    if let Some(max) = config.max_test_sites {
        info!("Probe budget: {} sites", max);
    }

    let stats = Arc::new(ProcessingStats::new());
    let timing = Arc::new(TimingStats::new());

    let fetch_client = init_fetch_client(&config).context("Failed to initialize HTTP client")?;
    let subscriptions = load_all(&fetch_client, &sources, &stats).await;
    if subscriptions.is_empty() {
        anyhow::bail!(
            "No valid subscriptions found ({} source{} tried)",
            sources.len(),
            if sources.len() == 1 { "" } else { "s" }
        );
    }

    let merged = merge_subscriptions(&subscriptions, &stats);
    let sites_merged = merged.api_site.len();

    let prober = init_prober(&config).context("Failed to initialize probe client")?;
    let budget = Arc::new(ProbeBudget::new(config.max_test_sites));
    let probed = Arc::new(AtomicUsize::new(0));
    let selector = SelectionContext::new(prober, config.protected_class())
        .with_ceiling(config.ttl)
        .with_budget(Arc::clone(&budget))
        .with_concurrency(config.probe_concurrency)
        .with_rename(config.strip_source_tags)
        .with_stats(Arc::clone(&stats), Arc::clone(&timing))
        .with_progress(Arc::clone(&probed));

    let probe_start = Instant::now();
    let cancel = CancellationToken::new();
    let logging_task = progress::spawn_progress_logger(cancel.clone(), probe_start, &probed);
    let selection = selector.select(&merged.api_site).await;
    shutdown_gracefully(cancel, Some(logging_task)).await;
    log_progress(probe_start, &probed);

    let mut output = Subscription {
        api_site: rank_sites(selection.sites),
        extra: merged.extra,
    };
    if let Some(cache_time) = &config.cache_time {
        output.set_cache_time(cache_time);
        info!("Set cache time to: {}", cache_time);
    }

    let summary = encode_and_save(&output, &config.output, config.json_output.as_deref())
        .await
        .context("Failed to write merged configuration")?;

    print_error_statistics(&stats);
    if config.show_timing {
        print_timing_statistics(&timing);
    }

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    print_run_summary(
        subscriptions.len(),
        sources.len(),
        output.api_site.len(),
        elapsed_seconds,
    );

    Ok(MergeReport {
        sources_total: sources.len(),
        sources_loaded: subscriptions.len(),
        sites_merged,
        sites_output: output.api_site.len(),
        probes_issued: budget.used(),
        output_path: summary.path,
        json_bytes: summary.json_bytes,
        encoded_bytes: summary.encoded_bytes,
        elapsed_seconds,
    })
}

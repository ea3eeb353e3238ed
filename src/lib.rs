//! sub_merge library: subscription merging with latency-based site selection
//!
//! Several subscription documents (base58, base64 or plain JSON, fetched over
//! HTTP or read from disk) are merged into one, deduplicated by endpoint,
//! reduced to the fastest site per name group, ranked by latency, and written
//! out as base58-encoded canonical JSON.
//!
//! # Example
//!
//! ```no_run
//! use sub_merge::{Config, run_merge};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     sources: vec![
//!         "https://example.com/a.txt".to_string(),
//!         "./local/b.json".to_string(),
//!     ],
//!     ttl: Some(800),
//!     max_test_sites: Some(100),
//!     ..Default::default()
//! };
//!
//! let report = run_merge(config).await?;
//! println!("Merged {} sites into {}, wrote {}",
//!          report.sites_merged, report.sites_output, report.output_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
mod classify;
pub mod config;
mod error_handling;
pub mod initialization;
mod merge;
mod normalize;
mod output;
mod probe;
mod rank;
mod run;
mod select;
mod source;
mod subscription;
mod utils;

// Re-export public API
pub use classify::ProtectedClass;
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{
    ConfigValidationError, ErrorType, InfoType, InitializationError, OutputError,
    ProcessingStats, SourceError, WarningType,
};
pub use merge::merge_subscriptions;
pub use normalize::{normalize_name, normalized_site_name};
pub use output::{canonical_json, encode_and_save, OutputSummary};
pub use probe::{HttpProber, LatencyProber, ProbeBudget, ProbeFailure, ProbeOutcome};
pub use rank::rank_sites;
pub use run::{run_merge, MergeReport};
pub use select::{ProtectedPick, SelectedSite, Selection, SelectionContext, SelectionState};
pub use source::{decode_payload, load_all, load_subscription, PayloadEncoding, SourceLocation};
pub use subscription::{site_key, Site, SiteCollection, Subscription, Ttl};
pub use utils::TimingStats;

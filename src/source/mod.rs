//! Subscription source loading.
//!
//! A source is an HTTP(S) URL or a local file. Its payload may be base58,
//! base64 or plain JSON text; the decoded text must be a subscription
//! document.

mod decode;
mod fetch;

use futures::stream::{self, StreamExt};
use log::{info, warn};

use crate::error_handling::{ProcessingStats, SourceError};
use crate::subscription::Subscription;

pub use decode::{decode_payload, PayloadEncoding};
pub use fetch::{read_source, SourceLocation};

/// Number of sources fetched at once.
const SOURCE_FETCH_CONCURRENCY: usize = 4;

/// Loads and decodes one subscription source.
///
/// # Arguments
///
/// * `client` - HTTP client for remote sources
/// * `source_id` - URL or local file path
///
/// # Errors
///
/// Returns a `SourceError` if the source cannot be fetched or read, or if the
/// decoded payload is not a JSON subscription document.
pub async fn load_subscription(
    client: &reqwest::Client,
    source_id: &str,
) -> Result<Subscription, SourceError> {
    info!("Fetching: {}", source_id);
    let raw = read_source(client, source_id).await?;
    let (text, encoding) = decode_payload(&raw);
    log::debug!("Decoded {} as {:?}", source_id, encoding);

    serde_json::from_str(&text).map_err(|error| SourceError::Parse {
        source_id: source_id.to_string(),
        error,
    })
}

/// Loads every configured source, skipping the ones that fail.
///
/// Successful subscriptions are returned in configuration order, so the
/// first one that loads becomes the merge base. Failures are logged and
/// counted in `stats`.
pub async fn load_all(
    client: &reqwest::Client,
    sources: &[String],
    stats: &ProcessingStats,
) -> Vec<Subscription> {
    let results: Vec<Result<Subscription, SourceError>> = stream::iter(sources)
        .map(|source_id| load_subscription(client, source_id))
        .buffered(SOURCE_FETCH_CONCURRENCY)
        .collect()
        .await;

    let mut loaded = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(subscription) => {
                info!(
                    "Loaded subscription with {} sites",
                    subscription.api_site.len()
                );
                loaded.push(subscription);
            }
            Err(e) => {
                warn!("Skipping source: {}", e);
                stats.increment_error(e.error_type());
            }
        }
    }

    info!(
        "Successfully loaded {} of {} subscriptions",
        loaded.len(),
        sources.len()
    );
    loaded
}

#[cfg(test)]
mod tests;

//! Output encoding.
//!
//! The final subscription is rendered as canonical JSON, base58-encoded and
//! written to the output file.

mod canonical;

use std::path::{Path, PathBuf};

use log::info;

use crate::error_handling::OutputError;
use crate::subscription::Subscription;

pub use canonical::canonical_json;

/// Sizes of what was written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSummary {
    pub path: PathBuf,
    /// Size of the canonical JSON text in bytes
    pub json_bytes: usize,
    /// Size of the base58 text in bytes
    pub encoded_bytes: usize,
}

impl OutputSummary {
    /// Encoded size relative to the JSON size.
    pub fn expansion_ratio(&self) -> f64 {
        if self.json_bytes == 0 {
            return 0.0;
        }
        self.encoded_bytes as f64 / self.json_bytes as f64
    }
}

/// Encodes a subscription and saves it.
///
/// # Arguments
///
/// * `subscription` - The final, ranked subscription
/// * `path` - Destination of the base58 text
/// * `json_path` - Optional destination for the canonical JSON itself
///
/// # Errors
///
/// Returns `OutputError::Serialize` if rendering fails and
/// `OutputError::Write` if either file cannot be written.
pub async fn encode_and_save(
    subscription: &Subscription,
    path: &Path,
    json_path: Option<&Path>,
) -> Result<OutputSummary, OutputError> {
    let json = canonical_json(subscription)?;
    info!("JSON size before encoding: {} bytes", json.len());

    let encoded = bs58::encode(json.as_bytes()).into_string();
    write_file(path, &encoded).await?;
    if let Some(json_path) = json_path {
        write_file(json_path, &json).await?;
        info!("Canonical JSON saved to: {}", json_path.display());
    }

    let summary = OutputSummary {
        path: path.to_path_buf(),
        json_bytes: json.len(),
        encoded_bytes: encoded.len(),
    };
    info!("Merged configuration saved to: {}", path.display());
    info!("Encoded size: {} bytes", summary.encoded_bytes);
    info!("Expansion ratio: {:.2}x", summary.expansion_ratio());
    Ok(summary)
}

async fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|error| OutputError::Write {
            path: path.to_path_buf(),
            error,
        })
}

//! Raw source retrieval.

use std::path::PathBuf;

use url::Url;

use crate::error_handling::SourceError;

/// Where a subscription source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// An `http://` or `https://` URL
    Remote(Url),
    /// Anything else is read from the local filesystem
    Local(PathBuf),
}

impl SourceLocation {
    /// Classifies a source identifier.
    ///
    /// Only identifiers that parse as URLs with an `http` or `https` scheme
    /// are fetched over the network.
    pub fn parse(source_id: &str) -> Self {
        match Url::parse(source_id) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SourceLocation::Remote(url),
            _ => SourceLocation::Local(PathBuf::from(source_id)),
        }
    }
}

/// Reads the raw payload of a source.
///
/// # Errors
///
/// Returns `SourceError::Fetch` if the request fails or the server answers
/// with a non-success status, and `SourceError::Read` if a local file cannot
/// be read.
pub async fn read_source(client: &reqwest::Client, source_id: &str) -> Result<String, SourceError> {
    match SourceLocation::parse(source_id) {
        SourceLocation::Remote(url) => {
            let fetch_error = |error| SourceError::Fetch {
                source_id: source_id.to_string(),
                error,
            };
            let response = client
                .get(url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(fetch_error)?;
            response.text().await.map_err(fetch_error)
        }
        SourceLocation::Local(path) => {
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|error| SourceError::Read {
                    source_id: source_id.to_string(),
                    error,
                })
        }
    }
}

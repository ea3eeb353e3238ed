//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// A configuration value that failed validation.
///
/// Carries the offending field name so callers can point the user at the
/// exact flag or environment variable to fix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid configuration for `{field}`: {message}")]
pub struct ConfigValidationError {
    /// Name of the configuration field
    pub field: &'static str,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ConfigValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Error types for loading a subscription source.
///
/// Every variant carries the source identifier. A source error never aborts
/// the run on its own: the source is skipped and merging continues with the
/// remaining ones.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The HTTP request for the source failed or returned a non-success status.
    #[error("Failed to fetch {source_id}: {error}")]
    Fetch {
        source_id: String,
        #[source]
        error: ReqwestError,
    },

    /// The source is a local file that could not be read.
    #[error("Failed to read {source_id}: {error}")]
    Read {
        source_id: String,
        #[source]
        error: std::io::Error,
    },

    /// The decoded payload is not a valid subscription document.
    #[error("Failed to parse JSON from {source_id}: {error}")]
    Parse {
        source_id: String,
        #[source]
        error: serde_json::Error,
    },
}

impl SourceError {
    /// Returns the statistics category for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            SourceError::Fetch { .. } => ErrorType::SourceFetchError,
            SourceError::Read { .. } => ErrorType::SourceReadError,
            SourceError::Parse { .. } => ErrorType::SourceParseError,
        }
    }
}

/// Error types for writing the merged configuration.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The merged subscription could not be serialized.
    #[error("Failed to serialize merged subscription: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("Failed to write {path}: {error}")]
    Write {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

/// Types of errors that can occur during a merge run.
///
/// Source errors mean a subscription was skipped; probe errors are latency
/// verdicts for a single site and flow into the selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Source errors
    SourceFetchError,
    SourceReadError,
    SourceParseError,
    // Probe errors
    ProbeTimeoutError,
    ProbeConnectError,
    ProbeRequestError,
    ProbeOtherError,
}

/// Types of warnings that can occur while reading site entries.
///
/// Warnings indicate missing optional fields that don't prevent processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(clippy::enum_variant_names)] // All variants start with "Missing" by design
pub enum WarningType {
    MissingName, // Grouped under the "Unknown" name
    MissingApi,  // Kept without probing (treated as always healthy)
}

/// Types of informational metrics recorded while merging and selecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    // Merge
    DuplicateSiteDropped,
    SiteWithoutApiDropped,
    // Selection
    SiteOverCeilingDropped,
    FailedProbeDropped,
    GroupMemberDiscarded,
    UntestedSiteRetained,
    ProtectedRetainedOverCeiling,
    // Guarantee
    ProtectedSiteForced,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::SourceFetchError => "Source fetch error",
            ErrorType::SourceReadError => "Source read error",
            ErrorType::SourceParseError => "Source parse error",
            ErrorType::ProbeTimeoutError => "Probe timeout",
            ErrorType::ProbeConnectError => "Probe connect error",
            ErrorType::ProbeRequestError => "Probe request error",
            ErrorType::ProbeOtherError => "Probe other error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingName => "Site without name",
            WarningType::MissingApi => "Site without api",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::DuplicateSiteDropped => "Duplicate site dropped",
            InfoType::SiteWithoutApiDropped => "Merged site without api dropped",
            InfoType::SiteOverCeilingDropped => "Site over TTL ceiling dropped",
            InfoType::FailedProbeDropped => "Site with failed probe dropped",
            InfoType::GroupMemberDiscarded => "Slower group member discarded",
            InfoType::UntestedSiteRetained => "Untested site retained",
            InfoType::ProtectedRetainedOverCeiling => "Protected site kept over ceiling",
            InfoType::ProtectedSiteForced => "Protected site force-retained",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_type_as_str() {
        assert_eq!(ErrorType::ProbeTimeoutError.as_str(), "Probe timeout");
        assert_eq!(ErrorType::SourceParseError.as_str(), "Source parse error");
        assert_eq!(
            format!("{}", ErrorType::ProbeConnectError),
            "Probe connect error"
        );
    }

    #[test]
    fn test_all_types_have_string_representation() {
        for error_type in ErrorType::iter() {
            assert!(
                !error_type.as_str().is_empty(),
                "{:?} should have non-empty string",
                error_type
            );
        }
        for warning_type in WarningType::iter() {
            assert!(!warning_type.as_str().is_empty());
        }
        for info_type in InfoType::iter() {
            assert!(!info_type.as_str().is_empty());
        }
    }

    #[test]
    fn test_source_error_categories() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SourceError::Parse {
            source_id: "https://a.example/sub".to_string(),
            error: parse,
        };
        assert_eq!(err.error_type(), ErrorType::SourceParseError);
        assert!(err.to_string().contains("https://a.example/sub"));

        let err = SourceError::Read {
            source_id: "missing.txt".to_string(),
            error: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.error_type(), ErrorType::SourceReadError);
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = ConfigValidationError::new("sources", "at least one source is required");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for `sources`: at least one source is required"
        );
    }
}

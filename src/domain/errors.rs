//! Domain error types
//!
//! This module defines the error hierarchy for the exporter. Host failures are
//! kept separate from crate errors so that every external call can be classified
//! into an [`IssueKind`] at the point where it happens.

use thiserror::Error;

/// Main exporter error type
///
/// Only errors that end a whole command surface as `ExporterError`. Failures
/// inside the walk are converted into recorded issues instead.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors raised by the CAD host outside of the isolated walk
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// The destination root could not be established
    #[error("Destination unavailable: {0}")]
    DestinationUnavailable(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors reported by the CAD host
///
/// Host adapters return these from every call. They never expose the host's
/// own exception types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// A document could not be opened or activated
    #[error("Failed to open document: {0}")]
    OpenFailed(String),

    /// A document could not be closed
    #[error("Failed to close document: {0}")]
    CloseFailed(String),

    /// Listing hubs, projects, folders or files failed
    #[error("Enumeration failed: {0}")]
    Enumeration(String),

    /// A handle no longer refers to a live entity
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// An encoder failed to write an artifact
    #[error("Encoder failed: {0}")]
    EncodeFailed(String),

    /// The encoder had nothing to write (empty or degenerate geometry)
    #[error("Empty geometry: {0}")]
    EmptyGeometry(String),

    /// The viewport could not be captured
    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    /// The host does not support the requested output format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl HostError {
    /// Whether the failure should be skipped silently instead of counted
    pub fn is_benign(&self) -> bool {
        matches!(self, HostError::EmptyGeometry(_))
    }
}

/// Classification of a non-fatal failure recorded during the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Document could not be opened; the file is skipped
    OpenFailure,
    /// Document could not be closed after use
    CloseFailure,
    /// A format, sketch or body write failed; that artifact is skipped
    EncodeFailure,
    /// A destination directory could not be created; the branch is skipped
    DirectoryFailure,
    /// Listing part of the hierarchy failed; that subtree yields nothing
    EnumerationFailure,
    /// Empty or degenerate geometry; skipped and not counted
    BenignEncodeFailure,
}

impl IssueKind {
    /// Whether issues of this kind count towards the run outcome
    pub fn is_counted(&self) -> bool {
        !matches!(self, IssueKind::BenignEncodeFailure)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExporterError {
    fn from(err: serde_json::Error) -> Self {
        ExporterError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("TOML parse error: {err}"))
    }
}

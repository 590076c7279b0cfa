//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - JSON-formatted local log files with daily rotation
//! - A dated session log written into the export destination
//!
//! # Example
//!
//! ```no_run
//! use hub_exporter::logging::init_logging;
//! use hub_exporter::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{
    attach_session_log, init_logging, parse_log_level, session_log_file_name, LoggingGuard,
    SessionLogGuard, SESSION_LOG_PREFIX,
};

/// Log a recorded issue
///
/// Benign issues are logged at debug level, every other kind as an error.
///
/// # Example
///
/// ```no_run
/// use hub_exporter::log_issue;
/// use hub_exporter::domain::{HostError, IssueKind};
///
/// let error = HostError::EncodeFailed("STEP writer crashed".to_string());
/// log_issue!(IssueKind::EncodeFailure, "STEP export of Bracket", &error);
/// ```
#[macro_export]
macro_rules! log_issue {
    ($kind:expr, $context:expr, $error:expr) => {
        if $kind.is_counted() {
            tracing::error!(
                kind = ?$kind,
                context = %$context,
                error = %$error,
                "Export issue"
            );
        } else {
            tracing::debug!(
                kind = ?$kind,
                context = %$context,
                error = %$error,
                "Skipped empty geometry"
            );
        }
    };
}

/// Log an artifact that is about to be written
///
/// # Example
///
/// ```no_run
/// use hub_exporter::log_artifact_written;
/// use std::path::Path;
///
/// log_artifact_written!("STEP", Path::new("/out/Bracket.stp"));
/// ```
#[macro_export]
macro_rules! log_artifact_written {
    ($label:expr, $path:expr) => {
        tracing::info!(
            artifact = %$label,
            path = %$path.display(),
            "Writing artifact"
        );
    };
}

/// Log an artifact that was skipped because it already exists
///
/// # Example
///
/// ```no_run
/// use hub_exporter::log_artifact_skipped;
/// use std::path::Path;
///
/// log_artifact_skipped!("DXF sketch", Path::new("/out/Bracket/Profile.dxf"));
/// ```
#[macro_export]
macro_rules! log_artifact_skipped {
    ($label:expr, $path:expr) => {
        tracing::info!(
            artifact = %$label,
            path = %$path.display(),
            "Artifact already exists, skipped"
        );
    };
}

//! Structured logging setup using tracing
//!
//! This module provides the process-wide subscriber (console plus an optional
//! rolling file) and the per-session log file written into the export
//! destination.
//!
//! # Example
//!
//! ```no_run
//! use hub_exporter::logging::init_logging;
//! use hub_exporter::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{ExporterError, Result};
use std::path::{Path, PathBuf};
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Prefix of the dated session log file
pub const SESSION_LOG_PREFIX: &str = "HubExporter";

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Guard for a session log attached with [`attach_session_log`]
///
/// While alive, log events from the current thread also go to the session log
/// file. Dropping it restores the previous subscriber and flushes the file.
pub struct SessionLogGuard {
    path: PathBuf,
    _default: DefaultGuard,
    _file_guard: WorkerGuard,
}

impl SessionLogGuard {
    /// Location of the session log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Initialize the logging system based on configuration
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
/// * `config` - Logging configuration
///
/// # Returns
///
/// A `LoggingGuard` that must be kept alive for the duration of the program
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter(log_level));

    layers.push(console_layer.boxed());

    let file_guard = if config.local_enabled {
        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            ExporterError::Configuration(format!(
                "Failed to create log directory {}: {}",
                config.local_path, e
            ))
        })?;

        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.local_path, "hub-exporter.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(non_blocking)
            .with_filter(env_filter(log_level));

        layers.push(file_layer.boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).init();

    tracing::info!(
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        session_log = config.session_log,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

/// Name of the session log file for today's date
///
/// # Examples
///
/// ```
/// use hub_exporter::logging::session_log_file_name;
///
/// let name = session_log_file_name();
/// assert!(name.starts_with("HubExporter_"));
/// assert!(name.ends_with(".log"));
/// ```
pub fn session_log_file_name() -> String {
    format!(
        "{}_{}.log",
        SESSION_LOG_PREFIX,
        chrono::Local::now().format("%Y-%m-%d")
    )
}

/// Attach a dated log file in `destination` to the current thread
///
/// Events are written to `<destination>/HubExporter_<YYYY-MM-DD>.log` as plain
/// text or JSON lines, depending on `config.format`, and still reach the
/// console. Runs on the same day append to the same file.
///
/// # Errors
///
/// Returns an error if the level is invalid or the file cannot be created.
pub fn attach_session_log(
    destination: &Path,
    log_level_str: &str,
    config: &LoggingConfig,
) -> Result<SessionLogGuard> {
    let log_level = parse_log_level(log_level_str)?;
    let file_name = session_log_file_name();
    let path = destination.join(&file_name);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.trim_end_matches(".log"))
        .filename_suffix("log")
        .build(destination)
        .map_err(|e| {
            ExporterError::Io(format!(
                "Failed to create session log {}: {}",
                path.display(),
                e
            ))
        })?;
    let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(env_filter(log_level));

    layers.push(console_layer.boxed());

    let file_layer = if config.format == "json" {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_writer(non_blocking)
            .with_filter(env_filter(log_level))
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(non_blocking)
            .with_filter(env_filter(log_level))
            .boxed()
    };

    layers.push(file_layer);

    let default = tracing::subscriber::set_default(tracing_subscriber::registry().with(layers));

    tracing::info!(path = %path.display(), format = %config.format, "Session log attached");

    Ok(SessionLogGuard {
        path,
        _default: default,
        _file_guard: file_guard,
    })
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hub_exporter={}", level)))
}

/// Parse log level from string
pub fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ExporterError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_log_level_valid() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    }

    #[test]
    fn test_parse_log_level_case_insensitive() {
        assert_eq!(parse_log_level("TRACE").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("Debug").unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_parse_log_level_invalid() {
        assert!(parse_log_level("invalid").is_err());
        assert!(parse_log_level("").is_err());
    }

    #[test]
    fn test_session_log_file_name_is_dated() {
        let name = session_log_file_name();
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(name, format!("HubExporter_{date}.log"));
    }

    #[test]
    fn test_attach_session_log_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoggingConfig::default();

        let guard = attach_session_log(temp_dir.path(), "info", &config).unwrap();
        let path = guard.path().to_path_buf();
        tracing::info!("written to the session log");
        drop(guard);

        assert_eq!(path, temp_dir.path().join(session_log_file_name()));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Session log attached"));
    }

    #[test]
    fn test_attach_session_log_rejects_bad_level() {
        let temp_dir = TempDir::new().unwrap();
        let result = attach_session_log(temp_dir.path(), "loud", &LoggingConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_logging_guard_creation() {
        let guard = LoggingGuard::new(None);
        drop(guard);
    }
}

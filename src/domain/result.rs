//! Result type aliases for the exporter

use super::errors::{ExporterError, HostError};

/// Result type alias for exporter operations
///
/// # Examples
///
/// ```
/// use hub_exporter::domain::result::Result;
/// use hub_exporter::domain::errors::ExporterError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ExporterError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Result type returned by every host call
pub type HostResult<T> = std::result::Result<T, HostError>;

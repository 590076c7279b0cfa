//! Configuration schema types
//!
//! This module defines the configuration structure for the hub exporter. Every
//! field has a default, so an empty TOML file is a valid configuration.

use crate::domain::ExportFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Project include/exclude filter
    #[serde(default)]
    pub projects: ProjectFilterConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Host connection settings
    #[serde(default)]
    pub host: HostConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.projects.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Which projects of the active hub are exported
///
/// When both lists are non-empty the exclude list wins and the include list is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFilterConfig {
    /// Only these projects are exported
    #[serde(default)]
    pub include: Vec<String>,

    /// These projects are never exported
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ProjectFilterConfig {
    fn validate(&self) -> Result<(), String> {
        if self
            .include
            .iter()
            .chain(self.exclude.iter())
            .any(|name| name.trim().is_empty())
        {
            return Err(
                "projects.include and projects.exclude cannot contain empty names".to_string(),
            );
        }

        if !self.include.is_empty() && !self.exclude.is_empty() {
            tracing::warn!(
                include = self.include.len(),
                exclude = self.exclude.len(),
                "Both projects.include and projects.exclude are set; the include list is ignored"
            );
        }

        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Destination root; when absent the user is prompted
    #[serde(default)]
    pub destination: Option<PathBuf>,

    /// Component geometry formats
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,

    /// Save a viewport screenshot per design
    #[serde(default = "default_true")]
    pub screenshot: bool,

    /// Screenshot width in pixels
    #[serde(default = "default_screenshot_size")]
    pub screenshot_width: u32,

    /// Screenshot height in pixels
    #[serde(default = "default_screenshot_size")]
    pub screenshot_height: u32,

    /// Export the sketches of every component as DXF
    #[serde(default = "default_true")]
    pub sketches: bool,

    /// Export every solid and mesh body as STL
    #[serde(default)]
    pub bodies: bool,

    /// Recurse into sub-components
    #[serde(default = "default_true")]
    pub subcomponents: bool,

    /// Components with more occurrences than this are not recursed into
    #[serde(default = "default_max_subcomponent_count")]
    pub max_subcomponent_count: usize,

    /// Maximum nesting depth of the component recursion
    #[serde(default = "default_max_component_depth")]
    pub max_component_depth: usize,

    /// Overwrite artifacts that already exist
    #[serde(default = "default_true")]
    pub overwrite_existing: bool,

    /// File extensions that mark a design document
    #[serde(default = "default_design_extensions")]
    pub design_extensions: Vec<String>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.formats.is_empty() {
            return Err("export.formats must contain at least one format".to_string());
        }

        let unique: HashSet<_> = self.formats.iter().collect();
        if unique.len() != self.formats.len() {
            return Err("export.formats cannot contain duplicates".to_string());
        }

        if self.screenshot_width == 0 || self.screenshot_height == 0 {
            return Err("export.screenshot_width and screenshot_height must be > 0".to_string());
        }

        if self.max_component_depth == 0 {
            return Err("export.max_component_depth must be > 0".to_string());
        }

        if self.design_extensions.is_empty() {
            return Err("export.design_extensions cannot be empty".to_string());
        }

        if let Some(destination) = &self.destination {
            if destination.as_os_str().is_empty() {
                return Err("export.destination cannot be empty when set".to_string());
            }
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            destination: None,
            formats: default_formats(),
            screenshot: true,
            screenshot_width: default_screenshot_size(),
            screenshot_height: default_screenshot_size(),
            sketches: true,
            bodies: false,
            subcomponents: true,
            max_subcomponent_count: default_max_subcomponent_count(),
            max_component_depth: default_max_component_depth(),
            overwrite_existing: true,
            design_extensions: default_design_extensions(),
        }
    }
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Hub description consumed by the manifest host
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write a dated log file into the export destination
    #[serde(default = "default_true")]
    pub session_log: bool,

    /// Session log format (text or json)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Enable local rolling file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(format!(
                "Invalid logging.format '{}'. Must be one of: {}",
                self.format,
                valid_formats.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            session_log: true,
            format: default_log_format(),
            local_enabled: false,
            local_path: default_local_path(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_formats() -> Vec<ExportFormat> {
    ExportFormat::ALL.to_vec()
}

fn default_screenshot_size() -> u32 {
    1024
}

fn default_max_subcomponent_count() -> usize {
    300
}

fn default_max_component_depth() -> usize {
    64
}

fn default_design_extensions() -> Vec<String> {
    vec!["f3d".to_string(), "f3z".to_string()]
}

fn default_manifest() -> PathBuf {
    PathBuf::from("hub.json")
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

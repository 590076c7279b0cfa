//! Configuration management for the hub exporter.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! The exporter uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HUB_EXPORTER_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hub_exporter::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("hub-exporter.toml")?;
//!
//! println!("Formats: {:?}", config.export.formats);
//! println!("Manifest: {}", config.host.manifest.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ProjectFilterConfig`] - Project include and exclude lists
//! - [`ExportConfig`] - Formats, optional artifacts, ceilings, overwrite policy
//! - [`HostConfig`] - Where the host hierarchy comes from
//! - [`LoggingConfig`] - Session log and local log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [projects]
//! exclude = ["Archive"]
//!
//! [export]
//! destination = "${HUB_EXPORT_ROOT}"
//! formats = ["stp", "stl", "igs"]
//! sketches = true
//! bodies = false
//! max_subcomponent_count = 300
//! overwrite_existing = true
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{
    ApplicationConfig, ExportConfig, ExporterConfig, HostConfig, LoggingConfig,
    ProjectFilterConfig,
};

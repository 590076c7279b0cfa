//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ExporterConfig;
use crate::domain::errors::ExporterError;
use crate::domain::result::Result;
use crate::domain::ExportFormat;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ExporterConfig
/// 4. Applies environment variable overrides (HUB_EXPORTER_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use hub_exporter::config::loader::load_config;
///
/// let config = load_config("hub-exporter.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExporterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExporterError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] without the file read.
///
/// # Errors
///
/// Returns an error if substitution, parsing or validation fails.
pub fn load_config_str(contents: &str) -> Result<ExporterConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ExporterConfig = toml::from_str(&contents)
        .map_err(|e| ExporterError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ExporterError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExporterError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExporterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the HUB_EXPORTER_* prefix
///
/// Environment variables follow the pattern: HUB_EXPORTER_<SECTION>_<KEY>
/// For example: HUB_EXPORTER_EXPORT_DESTINATION, HUB_EXPORTER_LOGGING_FORMAT
fn apply_env_overrides(config: &mut ExporterConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("HUB_EXPORTER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Project filter overrides (comma-separated)
    if let Ok(val) = std::env::var("HUB_EXPORTER_PROJECTS_INCLUDE") {
        config.projects.include = split_list(&val);
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_PROJECTS_EXCLUDE") {
        config.projects.exclude = split_list(&val);
    }

    // Export overrides
    if let Ok(val) = std::env::var("HUB_EXPORTER_EXPORT_DESTINATION") {
        config.export.destination = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_EXPORT_FORMATS") {
        config.export.formats = split_list(&val)
            .iter()
            .map(|f| f.parse::<ExportFormat>())
            .collect::<std::result::Result<_, _>>()
            .map_err(ExporterError::Configuration)?;
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_EXPORT_SCREENSHOT") {
        config.export.screenshot = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_EXPORT_SKETCHES") {
        config.export.sketches = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_EXPORT_BODIES") {
        config.export.bodies = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_EXPORT_SUBCOMPONENTS") {
        config.export.subcomponents = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_EXPORT_MAX_SUBCOMPONENT_COUNT") {
        if let Ok(count) = val.parse() {
            config.export.max_subcomponent_count = count;
        }
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_EXPORT_MAX_COMPONENT_DEPTH") {
        if let Ok(depth) = val.parse() {
            config.export.max_component_depth = depth;
        }
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_EXPORT_OVERWRITE_EXISTING") {
        config.export.overwrite_existing = val.parse().unwrap_or(true);
    }

    // Host overrides
    if let Ok(val) = std::env::var("HUB_EXPORTER_HOST_MANIFEST") {
        config.host.manifest = PathBuf::from(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("HUB_EXPORTER_LOGGING_SESSION_LOG") {
        config.logging.session_log = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_LOGGING_FORMAT") {
        config.logging.format = val;
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HUB_EXPORTER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

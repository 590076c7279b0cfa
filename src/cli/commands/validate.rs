//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the hub exporter configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading runs substitution, overrides and validation
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        let formats: Vec<_> = config.export.formats.iter().map(|f| f.extension()).collect();
        let list = |names: &[String]| {
            if names.is_empty() {
                "-".to_string()
            } else {
                names.join(", ")
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Manifest: {}", config.host.manifest.display());
        println!(
            "  Destination: {}",
            config
                .export
                .destination
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "(prompt)".to_string())
        );
        println!("  Include Projects: {}", list(&config.projects.include));
        println!("  Exclude Projects: {}", list(&config.projects.exclude));
        println!("  Formats: {}", formats.join(", "));
        println!("  Screenshot: {}", config.export.screenshot);
        println!("  Sketches: {}", config.export.sketches);
        println!("  Bodies: {}", config.export.bodies);
        println!(
            "  Sub-components: {} (max {} occurrences, depth {})",
            config.export.subcomponents,
            config.export.max_subcomponent_count,
            config.export.max_component_depth
        );
        println!("  Overwrite Existing: {}", config.export.overwrite_existing);
        println!("  Session Log: {} ({})", config.logging.session_log, config.logging.format);
        println!();
        Ok(0)
    }
}

//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "hub-exporter.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing hub exporter configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point [host].manifest at your hub description");
                println!("  3. Validate configuration: hub-exporter validate-config");
                println!("  4. Preview the export: hub-exporter plan");
                println!("  5. Run export: hub-exporter export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Hub Exporter Configuration File

[application]
log_level = "info"

[projects]
include = []
exclude = []

[export]
# destination = "/path/to/backup"
formats = ["stp", "stl", "igs"]
screenshot = true
sketches = true
bodies = false
subcomponents = true
overwrite_existing = true

[host]
manifest = "hub.json"

[logging]
session_log = true
format = "text"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Hub Exporter Configuration File
#
# Every option is shown with its default value. Values of the form ${VAR} are
# replaced by the environment variable VAR, and any option can be overridden
# with HUB_EXPORTER_<SECTION>_<OPTION>, e.g. HUB_EXPORTER_EXPORT_DESTINATION.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[projects]
# Only export these projects of the active hub (empty = all)
include = []
# Never export these projects; when set, the include list is ignored
exclude = ["Archive"]

[export]
# Destination root. When absent the exporter asks for one.
# destination = "${HOME}/hub-backup"

# Component geometry formats: stp, stl, igs
formats = ["stp", "stl", "igs"]

# Viewport screenshot per design
screenshot = true
screenshot_width = 1024
screenshot_height = 1024

# Sketches as DXF, solid and mesh bodies as STL
sketches = true
bodies = false

# Recurse into sub-components
subcomponents = true
# Components with more occurrences than this are not recursed into
max_subcomponent_count = 300
# Nesting limit that stops cyclic component references
max_component_depth = 64

# false = keep artifacts that already exist (resume an interrupted export)
overwrite_existing = true

# File extensions treated as designs; every other file is skipped
design_extensions = ["f3d", "f3z"]

[host]
# JSON description of the hub served by the manifest host
manifest = "hub.json"

[logging]
# Write HubExporter_<date>.log into the destination
session_log = true
# Session log format: text or json
format = "text"

# Rolling JSON log outside the destination
local_enabled = false
local_path = "./logs"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "hub-exporter.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "hub-exporter.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config_is_loadable() {
        let content = InitArgs::generate_minimal_config();
        assert!(content.contains("[export]"));

        let config = load_config_str(&content).unwrap();
        assert_eq!(config.host.manifest, Path::new("hub.json"));
        assert!(config.export.destination.is_none());
    }

    #[test]
    fn test_generate_config_with_examples_is_loadable() {
        let content = InitArgs::generate_config_with_examples();
        assert!(content.contains("# Hub Exporter Configuration File"));
        assert!(content.contains("max_subcomponent_count"));

        let config = load_config_str(&content).unwrap();
        assert_eq!(config.projects.exclude, vec!["Archive"]);
        assert_eq!(config.export.max_component_depth, 64);
    }
}

//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the hub exporter
//! using clap, and the terminal implementations of the prompt, message and
//! progress surfaces.

pub mod commands;
pub mod interaction;

pub use interaction::{ConsoleInteraction, ConsoleProgress};

use clap::{Parser, Subcommand};

/// Hub Exporter - mirror a CAD design hub to disk
#[derive(Parser, Debug)]
#[command(name = "hub-exporter")]
#[command(version, about, long_about = None)]
#[command(author = "Hub Exporter Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "hub-exporter.toml",
        env = "HUB_EXPORTER_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HUB_EXPORTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every design of the active hub
    Export(commands::export::ExportArgs),

    /// Show what an export would visit without opening any document
    Plan(commands::plan::PlanArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

//! Export command implementation
//!
//! This module implements the `export` command, which mirrors the active hub
//! into a local directory tree.

use crate::adapters::manifest::ManifestHost;
use crate::cli::interaction::ConsoleInteraction;
use crate::config::{load_config, ExporterConfig};
use crate::core::cancel::CancellationToken;
use crate::core::export::{ExportSession, ExportSummary, RunOutcome};
use crate::domain::{ExportFormat, ExporterError};
use crate::logging::attach_session_log;
use clap::Args;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Destination root (overrides [export].destination)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only export these projects (comma-separated)
    #[arg(long)]
    pub include: Option<String>,

    /// Never export these projects (comma-separated)
    #[arg(long)]
    pub exclude: Option<String>,

    /// Component formats to write (comma-separated: stp, stl, igs)
    #[arg(long)]
    pub formats: Option<String>,

    /// Keep artifacts that already exist
    #[arg(long)]
    pub no_overwrite: bool,

    /// Hub manifest to read (overrides [host].manifest)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

impl ExportArgs {
    /// Apply command-line overrides on top of the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error message for an unknown format.
    pub fn apply_overrides(&self, config: &mut ExporterConfig) -> Result<(), String> {
        if let Some(output) = &self.output {
            tracing::info!(destination = %output.display(), "Overriding destination from CLI");
            config.export.destination = Some(output.clone());
        }

        if let Some(include) = &self.include {
            let names = split_names(include);
            tracing::info!(include = ?names, "Overriding project include list from CLI");
            config.projects.include = names;
        }

        if let Some(exclude) = &self.exclude {
            let names = split_names(exclude);
            tracing::info!(exclude = ?names, "Overriding project exclude list from CLI");
            config.projects.exclude = names;
        }

        if let Some(formats) = &self.formats {
            config.export.formats = split_names(formats)
                .iter()
                .map(|f| f.parse::<ExportFormat>())
                .collect::<Result<_, _>>()?;
            tracing::info!(formats = ?config.export.formats, "Overriding formats from CLI");
        }

        if self.no_overwrite {
            tracing::info!("Keeping existing artifacts");
            config.export.overwrite_existing = false;
        }

        if let Some(manifest) = &self.manifest {
            config.host.manifest = manifest.clone();
        }

        Ok(())
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        log_level: Option<&str>,
        token: CancellationToken,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Err(e) = self.apply_overrides(&mut config) {
            eprintln!("Invalid option: {e}");
            return Ok(2);
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let host = match ManifestHost::from_path(&config.host.manifest) {
            Ok(h) => h,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load hub manifest");
                eprintln!("Failed to load hub manifest: {e}");
                return Ok(2);
            }
        };

        let log_level = log_level
            .unwrap_or(config.application.log_level.as_str())
            .to_string();
        let assume_yes = self.yes;

        // The walk is synchronous; keep it off the async workers
        let result = tokio::task::spawn_blocking(move || {
            run_session(host, &config, &log_level, assume_yes, token)
        })
        .await?;

        let summary = match result {
            Ok(s) => s,
            Err(ExporterError::DestinationUnavailable(e)) => {
                tracing::error!(error = %e, "Destination unavailable");
                eprintln!("❌ Destination unavailable: {e}");
                return Ok(5); // Fatal error exit code
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        if summary.destination.is_none() {
            println!("Export cancelled.");
            return Ok(summary.outcome.exit_code());
        }

        print_summary(&summary);
        Ok(summary.outcome.exit_code())
    }
}

/// Run one export session on the current thread
///
/// The session log is attached once the destination is known and detached
/// when the session ends.
fn run_session(
    mut host: ManifestHost,
    config: &ExporterConfig,
    log_level: &str,
    assume_yes: bool,
    token: CancellationToken,
) -> crate::domain::Result<ExportSummary> {
    let stdin = io::stdin();
    let mut interaction = ConsoleInteraction::new(
        stdin.lock(),
        config.export.destination.clone(),
        assume_yes,
        token.clone(),
    );
    let mut session = ExportSession::new(&mut host, &mut interaction, config, token);

    let Some(destination) = session.select_destination() else {
        let mut summary = ExportSummary::new();
        summary.outcome = RunOutcome::Cancelled;
        return Ok(summary);
    };

    let _session_log = if config.logging.session_log && fs::create_dir_all(&destination).is_ok()
    {
        match attach_session_log(&destination, log_level, &config.logging) {
            Ok(guard) => Some(guard),
            Err(e) => {
                tracing::warn!(error = %e, "Session log unavailable, logging to console only");
                None
            }
        }
    } else {
        None
    };

    session.export_to(&destination)
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    if let Some(destination) = &summary.destination {
        println!("  Destination: {}", destination.display());
    }
    println!(
        "  Projects: {} exported, {} skipped",
        summary.projects_exported, summary.projects_skipped
    );
    println!(
        "  Files: {} listed, {} exported, {} not designs",
        summary.files_listed, summary.files_exported, summary.files_ignored
    );
    println!(
        "  Artifacts: {} written, {} kept",
        summary.artifacts_written, summary.artifacts_skipped
    );
    println!("  Empty geometry skipped: {}", summary.benign_failures);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    let counted: Vec<_> = summary
        .issues
        .iter()
        .filter(|issue| issue.kind.is_counted())
        .collect();
    if !counted.is_empty() {
        println!("⚠️  Issues encountered:");
        for issue in counted {
            println!("  - {:?}: {}", issue.kind, issue.message);
            if let Some(context) = &issue.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs::default();

        assert!(!args.yes);
        assert!(args.output.is_none());
        assert!(args.include.is_none());
        assert!(!args.no_overwrite);
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let args = ExportArgs {
            output: Some(PathBuf::from("/backup")),
            exclude: Some("Archive, Scratch".to_string()),
            formats: Some("step,stl".to_string()),
            no_overwrite: true,
            ..ExportArgs::default()
        };
        let mut config = ExporterConfig::default();

        args.apply_overrides(&mut config).unwrap();

        assert_eq!(config.export.destination, Some(PathBuf::from("/backup")));
        assert_eq!(config.projects.exclude, vec!["Archive", "Scratch"]);
        assert_eq!(config.export.formats, vec![ExportFormat::Step, ExportFormat::Stl]);
        assert!(!config.export.overwrite_existing);
        assert!(config.projects.include.is_empty());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let args = ExportArgs {
            formats: Some("obj".to_string()),
            ..ExportArgs::default()
        };
        let mut config = ExporterConfig::default();

        assert!(args.apply_overrides(&mut config).is_err());
    }
}

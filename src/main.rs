// Hub Exporter - Batch exporter for CAD design hubs
// Copyright (c) 2025 Hub Exporter Contributors
// Licensed under the MIT License

use clap::Parser;
use hub_exporter::cli::{Cli, Commands};
use hub_exporter::config::{load_config, ExporterConfig};
use hub_exporter::core::cancel::CancellationToken;
use hub_exporter::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Commands report configuration errors themselves; logging falls back to defaults
    let config = load_config(&cli.config).unwrap_or_else(|_| ExporterConfig::default());
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.application.log_level.clone());

    let logging_guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Hub Exporter - Batch exporter for CAD design hubs"
    );

    let token = CancellationToken::new();

    // Spawn signal handler task
    let signal_token = token.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), cancelling export...");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, cancelling export...");
                }
            }
            println!("\n⚠️  Cancel requested, finishing the current artifact...");
            signal_token.cancel();
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), cancelling export...");
                println!("\n⚠️  Cancel requested, finishing the current artifact...");
                signal_token.cancel();
            }
        }
    });

    let exit_code = match execute_command(&cli, token).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush the log writer first
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, token: CancellationToken) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => {
            args.execute(&cli.config, cli.log_level.as_deref(), token)
                .await
        }
        Commands::Plan(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}

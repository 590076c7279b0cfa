// Hub Exporter - Batch exporter for CAD design hubs
// Copyright (c) 2025 Hub Exporter Contributors
// Licensed under the MIT License

//! # Hub Exporter
//!
//! Hub Exporter walks every project of the active CAD design hub, opens each
//! design and writes it to a local directory tree that mirrors the hub.
//!
//! ## Overview
//!
//! For every design the exporter writes:
//! - a **screenshot** of the viewport (`.png`)
//! - the **document archive** (`.f3d`)
//! - every component as **STEP, STL and IGES**
//! - every sketch as **DXF** and, optionally, every body as **STL**
//!
//! A failing artifact never stops the run. Failures are counted and the run
//! ends with success, partial failure (with the issue count) or cancellation.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and terminal prompts
//! - [`core`] - Export session, component recursion, naming and cancellation
//! - [`adapters`] - Host seams and the manifest-backed host
//! - [`domain`] - Hierarchy descriptors, formats and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and the session log
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hub_exporter::adapters::host::{Interaction, ProgressSurface, SilentProgress};
//! use hub_exporter::adapters::manifest::ManifestHost;
//! use hub_exporter::config::load_config;
//! use hub_exporter::core::cancel::CancellationToken;
//! use hub_exporter::core::export::ExportSession;
//! use std::path::PathBuf;
//!
//! struct Unattended(PathBuf, SilentProgress);
//!
//! impl Interaction for Unattended {
//!     fn choose_destination(&mut self) -> Option<PathBuf> {
//!         Some(self.0.clone())
//!     }
//!     fn show_message(&mut self, message: &str) {
//!         println!("{message}");
//!     }
//!     fn progress(&mut self) -> &mut dyn ProgressSurface {
//!         &mut self.1
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("hub-exporter.toml")?;
//!     let mut host = ManifestHost::from_path(&config.host.manifest)?;
//!     let mut interaction = Unattended(PathBuf::from("./backup"), SilentProgress);
//!
//!     let token = CancellationToken::new();
//!     let mut session = ExportSession::new(&mut host, &mut interaction, &config, token);
//!     let summary = session.run()?;
//!
//!     println!("Exported {} designs: {}", summary.files_exported, summary.outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Errors that end a command are [`domain::ExporterError`]. Failures inside the
//! walk are host errors ([`domain::HostError`]) that become recorded issues.
//!
//! ## Logging
//!
//! The exporter uses structured logging with the `tracing` crate. Each export
//! also writes `HubExporter_<YYYY-MM-DD>.log` into the destination.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

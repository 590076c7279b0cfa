//! Core business logic of the hub exporter.
//!
//! # Modules
//!
//! - [`export`] - Export session, component recursion and issue accounting
//! - [`walker`] - Project filtering and folder flattening
//! - [`naming`] - Name sanitization and output path construction
//! - [`cancel`] - Cooperative cancellation
//!
//! # Export Workflow
//!
//! 1. **Prompt**: Show the intro notice and ask for a destination
//! 2. **Walk**: Visit the active hub and every selected project
//! 3. **Flatten**: List every file under a project's root folder
//! 4. **Export**: Open each design, write screenshot, archive and components
//! 5. **Report**: Summarize issues into a run outcome
//!
//! # Example
//!
//! ```rust,no_run
//! use hub_exporter::adapters::manifest::ManifestHost;
//! use hub_exporter::config::load_config;
//! use hub_exporter::core::cancel::CancellationToken;
//! use hub_exporter::core::export::ExportSession;
//! # use hub_exporter::adapters::host::{Interaction, ProgressSurface, SilentProgress};
//! # use std::path::PathBuf;
//! # struct Fixed(PathBuf, SilentProgress);
//! # impl Interaction for Fixed {
//! #     fn choose_destination(&mut self) -> Option<PathBuf> { Some(self.0.clone()) }
//! #     fn show_message(&mut self, message: &str) { println!("{message}"); }
//! #     fn progress(&mut self) -> &mut dyn ProgressSurface { &mut self.1 }
//! # }
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("hub-exporter.toml")?;
//! let mut host = ManifestHost::from_path(&config.host.manifest)?;
//! let mut interaction = Fixed(PathBuf::from("./export"), SilentProgress);
//!
//! let mut session =
//!     ExportSession::new(&mut host, &mut interaction, &config, CancellationToken::new());
//! let summary = session.run()?;
//!
//! println!("Files exported: {}", summary.files_exported);
//! println!("Outcome: {}", summary.outcome);
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod export;
pub mod naming;
pub mod walker;

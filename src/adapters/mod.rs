//! External system integrations for the hub exporter.
//!
//! This module provides the seams between the exporter and the outside world:
//!
//! - [`host`] - Traits the CAD host application implements (hierarchy, design
//!   documents, encoders, prompts and progress)
//! - [`manifest`] - A host backed by a JSON manifest, used for dry rehearsals
//!   and tests
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the host application and
//! enable testing with stand-in implementations. The exporter core only sees the
//! traits in [`host`].
//!
//! ```rust,no_run
//! use hub_exporter::adapters::host::HierarchyProvider;
//! use hub_exporter::adapters::manifest::ManifestHost;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let host = ManifestHost::from_path("hub.json")?;
//! let hub = host.active_hub()?;
//! for project in host.projects(&hub)? {
//!     println!("{}", project.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod host;
pub mod manifest;

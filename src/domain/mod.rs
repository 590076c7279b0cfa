//! Domain models and types for the exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Opaque host handles** ([`EntityId`], [`DocumentId`])
//! - **Hierarchy descriptors** ([`Hub`], [`Project`], [`Folder`], [`DataFile`],
//!   [`ComponentRef`], [`SketchRef`], [`BodyRef`])
//! - **Output formats** ([`ExportFormat`])
//! - **Error types** ([`ExporterError`], [`HostError`], [`IssueKind`])
//! - **Result type aliases** ([`Result`], [`HostResult`])
//!
//! Descriptors are read-only snapshots handed out by the host. The exporter
//! derives paths and decisions from them and never mutates the hierarchy.
//!
//! # Error Handling
//!
//! ```rust
//! use hub_exporter::domain::{HostError, Result};
//!
//! fn example() -> Result<()> {
//!     // Host errors convert into the crate error with `?`
//!     let open: std::result::Result<(), HostError> = Ok(());
//!     open?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod format;
pub mod hierarchy;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ExporterError, HostError, IssueKind};
pub use format::ExportFormat;
pub use hierarchy::{BodyKind, BodyRef, ComponentRef, DataFile, Folder, Hub, Project, SketchRef};
pub use ids::{DocumentId, EntityId};
pub use result::{HostResult, Result};

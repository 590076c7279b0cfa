//! Export orchestration
//!
//! This module provides the export logic of the hub exporter:
//! - [`session`]: the session state machine walking hubs, projects and files
//! - [`component`]: recursive export of a component tree
//! - [`document`]: scoped ownership of an opened document
//! - [`context`]: per-session mutable state (issues, statistics, progress)
//! - [`gate`]: the overwrite decision for a single artifact
//! - [`summary`]: issue accounting and the run outcome

pub mod component;
pub mod context;
pub mod document;
pub mod gate;
pub mod session;
pub mod summary;

pub use component::ComponentExporter;
pub use context::ExportContext;
pub use document::OpenDocument;
pub use gate::should_write;
pub use session::{design_segments, progress_message, ExportSession, SessionState, INTRO_NOTICE};
pub use summary::{ExportSummary, Issue, IssueTracker, RunOutcome};

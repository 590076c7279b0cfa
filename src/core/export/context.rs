//! Session context threaded through the walk
//!
//! [`ExportContext`] owns everything a session mutates while walking: the
//! issue tracker, the statistics and the progress surface. It also holds the
//! cancellation token and the export options. Nothing in the walk touches
//! global state, so independent sessions never interfere.

use super::gate::should_write;
use super::summary::{ExportSummary, Issue, IssueTracker};
use crate::adapters::host::ProgressSurface;
use crate::config::ExportConfig;
use crate::core::cancel::CancellationToken;
use crate::core::naming::build_path;
use crate::domain::{HostResult, IssueKind};
use crate::{log_artifact_skipped, log_artifact_written, log_issue};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Mutable state of one export session
pub struct ExportContext<'a> {
    options: &'a ExportConfig,
    token: CancellationToken,
    progress: &'a mut dyn ProgressSurface,
    tracker: IssueTracker,
    summary: ExportSummary,
}

impl<'a> ExportContext<'a> {
    /// Create a context for one session
    pub fn new(
        options: &'a ExportConfig,
        token: CancellationToken,
        progress: &'a mut dyn ProgressSurface,
    ) -> Self {
        Self {
            options,
            token,
            progress,
            tracker: IssueTracker::new(),
            summary: ExportSummary::new(),
        }
    }

    /// Export options of this session
    pub fn options(&self) -> &'a ExportConfig {
        self.options
    }

    /// The progress surface
    pub fn progress(&mut self) -> &mut dyn ProgressSurface {
        &mut *self.progress
    }

    /// Issues recorded so far
    pub fn tracker(&self) -> &IssueTracker {
        &self.tracker
    }

    /// Mutable access to the statistics
    pub fn summary_mut(&mut self) -> &mut ExportSummary {
        &mut self.summary
    }

    /// Check for cancellation
    ///
    /// A cancel pressed on the progress surface sets the token. The first
    /// observation marks the run as cancelled; later calls keep returning true.
    pub fn is_cancelled(&mut self) -> bool {
        if self.tracker.is_cancelled() {
            return true;
        }
        if self.token.is_cancelled() || self.progress.was_cancelled() {
            self.token.cancel();
            self.tracker.mark_cancelled();
            tracing::info!("The process was cancelled!");
            return true;
        }
        false
    }

    /// Record a failure and log it
    pub fn record(&mut self, kind: IssueKind, context: &str, error: &dyn Display) {
        log_issue!(kind, context, error);
        self.tracker
            .record_issue(Issue::new(kind, error.to_string()).with_context(context));
    }

    /// Run one host call, converting its failure into a recorded issue
    ///
    /// Returns `None` when the call failed. Empty geometry is recorded as a
    /// benign failure regardless of `kind`.
    pub fn attempt<T>(
        &mut self,
        kind: IssueKind,
        context: &str,
        operation: impl FnOnce() -> HostResult<T>,
    ) -> Option<T> {
        match operation() {
            Ok(value) => Some(value),
            Err(error) => {
                let kind = if error.is_benign() {
                    IssueKind::BenignEncodeFailure
                } else {
                    kind
                };
                self.record(kind, context, &error);
                None
            }
        }
    }

    /// Decide whether an artifact is written
    ///
    /// False after cancellation, or when the file exists and overwriting is
    /// disabled. A skip is logged and counted here; a write is only counted
    /// once the host reports success through [`ExportContext::written`].
    pub fn admit(&mut self, label: &str, path: &Path) -> bool {
        if self.is_cancelled() {
            return false;
        }
        if !should_write(path, self.options.overwrite_existing) {
            log_artifact_skipped!(label, path);
            self.summary.artifacts_skipped += 1;
            return false;
        }
        true
    }

    /// Log and count an artifact the host has written
    pub fn written(&mut self, label: &str, path: &Path) {
        log_artifact_written!(label, path);
        self.summary.artifacts_written += 1;
    }

    /// Run the host write for an admitted artifact
    ///
    /// Counts the artifact as written on success and records `kind` on
    /// failure, so one artifact is never both written and an issue.
    pub fn write_artifact(
        &mut self,
        kind: IssueKind,
        label: &str,
        path: &Path,
        context: &str,
        operation: impl FnOnce() -> HostResult<()>,
    ) {
        if self.attempt(kind, context, operation).is_some() {
            self.written(label, path);
        }
    }

    /// Create a directory chain, recording a directory failure on error
    pub fn create_dir<S: AsRef<str>>(&mut self, base: &Path, segments: &[S]) -> Option<PathBuf> {
        match build_path(base, segments) {
            Ok(path) => Some(path),
            Err(error) => {
                let context = format!("create directory under {}", base.display());
                self.record(IssueKind::DirectoryFailure, &context, &error);
                None
            }
        }
    }

    /// Consume the context and produce the final summary
    pub fn finish(self) -> ExportSummary {
        let mut summary = self.summary;
        summary.finish(&self.tracker);
        summary
    }
}

//! Issue accounting and run summary
//!
//! [`IssueTracker`] counts the non-fatal failures of one session and decides the
//! [`RunOutcome`]. [`ExportSummary`] carries the statistics reported at the end
//! of a run.

use crate::domain::IssueKind;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Final outcome of an export session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunOutcome {
    /// Every file was walked and no issue was counted
    #[default]
    Success,
    /// The walk completed with this many counted issues
    PartialFailure(usize),
    /// The user cancelled; takes precedence over any issue count
    Cancelled,
}

impl RunOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::PartialFailure(_) => 1,
            RunOutcome::Cancelled => 130,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Success => write!(f, "Export finished successfully."),
            RunOutcome::PartialFailure(count) => write!(
                f,
                "The exporting process ran into {} issue{}. \
                 Please check the log for more information",
                count,
                if *count > 1 { "s" } else { "" }
            ),
            RunOutcome::Cancelled => write!(f, "Cancelled!"),
        }
    }
}

/// A failure recorded during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Classification of the failure
    pub kind: IssueKind,

    /// Error message
    pub message: String,

    /// Optional context (e.g. artifact label and path)
    pub context: Option<String>,
}

impl Issue {
    /// Create a new issue
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Add context to the issue
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Session-owned issue counter
///
/// The count never decreases. Benign issues are kept for the summary but are
/// not counted.
#[derive(Debug, Clone, Default)]
pub struct IssueTracker {
    issues: Vec<Issue>,
    counted: usize,
    cancelled: bool,
}

impl IssueTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue
    pub fn record_issue(&mut self, issue: Issue) {
        if issue.kind.is_counted() {
            self.counted += 1;
        }
        self.issues.push(issue);
    }

    /// Number of counted issues
    pub fn issue_count(&self) -> usize {
        self.counted
    }

    /// Number of benign failures
    pub fn benign_count(&self) -> usize {
        self.issues.len() - self.counted
    }

    /// Every issue recorded so far, counted or not
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Remember that the run was cancelled
    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    /// Whether cancellation was observed
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Outcome of the run so far
    pub fn outcome(&self) -> RunOutcome {
        if self.cancelled {
            RunOutcome::Cancelled
        } else if self.counted > 0 {
            RunOutcome::PartialFailure(self.counted)
        } else {
            RunOutcome::Success
        }
    }
}

/// Summary of an export session
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Destination root of the run, if one was chosen
    pub destination: Option<PathBuf>,

    /// Hubs walked (only the active one)
    pub hubs_visited: usize,

    /// Inactive hubs skipped
    pub hubs_skipped: usize,

    /// Projects that passed the filter
    pub projects_exported: usize,

    /// Projects removed by the filter
    pub projects_skipped: usize,

    /// Files listed under the selected projects
    pub files_listed: usize,

    /// Design files that were opened and exported
    pub files_exported: usize,

    /// Files skipped because they are not designs
    pub files_ignored: usize,

    /// Artifacts handed to an encoder
    pub artifacts_written: usize,

    /// Artifacts skipped because they already exist
    pub artifacts_skipped: usize,

    /// Failures on empty geometry that were not counted
    pub benign_failures: usize,

    /// Every recorded issue
    pub issues: Vec<Issue>,

    /// Duration of the export
    pub duration: Duration,

    /// Final outcome
    pub outcome: RunOutcome,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Copy the issues and outcome out of a tracker
    pub fn finish(&mut self, tracker: &IssueTracker) {
        self.issues = tracker.issues().to_vec();
        self.benign_failures = tracker.benign_count();
        self.outcome = tracker.outcome();
    }

    /// Number of counted issues
    pub fn issue_count(&self) -> usize {
        self.issues.iter().filter(|i| i.kind.is_counted()).count()
    }

    /// Check if the export was successful (not cancelled and no counted issue)
    pub fn is_successful(&self) -> bool {
        self.outcome == RunOutcome::Success
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            hubs_visited = self.hubs_visited,
            hubs_skipped = self.hubs_skipped,
            projects_exported = self.projects_exported,
            projects_skipped = self.projects_skipped,
            files_listed = self.files_listed,
            files_exported = self.files_exported,
            files_ignored = self.files_ignored,
            artifacts_written = self.artifacts_written,
            artifacts_skipped = self.artifacts_skipped,
            benign_failures = self.benign_failures,
            duration_secs = self.duration.as_secs(),
            outcome = %self.outcome,
            "Export completed"
        );

        if self.issue_count() > 0 {
            tracing::warn!(issue_count = self.issue_count(), "Export completed with issues");
            for issue in self.issues.iter().filter(|i| i.kind.is_counted()) {
                tracing::warn!(
                    kind = ?issue.kind,
                    message = %issue.message,
                    context = issue.context.as_deref().unwrap_or(""),
                    "Export issue"
                );
            }
        }
    }
}

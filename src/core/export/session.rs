//! Export session - the top-level orchestrator of one export run
//!
//! A session moves through [`SessionState`]: it shows the intro notice, asks
//! for a destination, walks the active hub and ends with one of the three
//! [`RunOutcome`] messages.
//!
//! For every design file the session writes
//!
//! ```text
//! <dest>/Hub <hub>/Project <project>/<folder>.../<file>.<ext>/
//!     <file>.png        viewport screenshot
//!     <file>.f3d        document archive
//!     <root>.stp|stl|igs
//!     <root>/...        sketches, bodies and sub-components
//! ```

use super::component::ComponentExporter;
use super::context::ExportContext;
use super::document::OpenDocument;
use super::summary::{ExportSummary, RunOutcome};
use crate::adapters::host::{CadHost, Interaction};
use crate::config::{ExporterConfig, ProjectFilterConfig};
use crate::core::cancel::CancellationToken;
use crate::core::naming::{sanitize, sanitize_or, with_suffix};
use crate::core::walker::{
    list_exportable_files, log_selection, project_selection, ProjectFile, ProjectSelection,
};
use crate::domain::format::{ARCHIVE_EXTENSION, SCREENSHOT_EXTENSION};
use crate::domain::{ExporterError, Hub, IssueKind, Project, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Notice shown before the destination prompt
pub const INTRO_NOTICE: &str = "The exporter opens and closes every design of the active hub. \
The host stays busy until the export finishes.\n\n\
Exporting your designs will take a while, depending on how many you have.\n\n\
You can cancel at any time.";

/// Title of the progress surface
pub const PROGRESS_TITLE: &str = "Exporting data!";

/// Fallback directory name for a file whose name sanitizes to nothing
const UNNAMED_FILE: &str = "Design";

/// Progress template for the current hub and project
///
/// `%v` and `%m` are left for the progress surface to expand.
///
/// # Examples
///
/// ```
/// use hub_exporter::core::export::progress_message;
///
/// assert_eq!(
///     progress_message(1, 1, 2, 3),
///     "Hub: 1 of 1\nProject: 2 of 3\nExporting design %v of %m"
/// );
/// ```
pub fn progress_message(
    hub: usize,
    hub_count: usize,
    project: usize,
    project_count: usize,
) -> String {
    format!(
        "Hub: {hub} of {hub_count}\nProject: {project} of {project_count}\n\
         Exporting design %v of %m"
    )
}

/// Lifecycle of an export session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, nothing shown yet
    Idle,
    /// Intro notice shown, waiting for a destination
    AwaitingDestination,
    /// Walking the hierarchy
    Walking,
    /// Finished with the given outcome
    Done(RunOutcome),
}

/// One export run against a host
pub struct ExportSession<'s, H, I>
where
    H: CadHost + ?Sized,
    I: Interaction + ?Sized,
{
    host: &'s mut H,
    interaction: &'s mut I,
    config: &'s ExporterConfig,
    token: CancellationToken,
    state: SessionState,
}

impl<'s, H, I> ExportSession<'s, H, I>
where
    H: CadHost + ?Sized,
    I: Interaction + ?Sized,
{
    /// Create a session
    ///
    /// Cancelling `token` from any thread stops the walk at the next check.
    pub fn new(
        host: &'s mut H,
        interaction: &'s mut I,
        config: &'s ExporterConfig,
        token: CancellationToken,
    ) -> Self {
        Self {
            host,
            interaction,
            config,
            token,
            state: SessionState::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Show the intro notice and ask for the destination root
    ///
    /// Returns `None` and finishes the session as cancelled when the user
    /// dismisses the prompt.
    pub fn select_destination(&mut self) -> Option<PathBuf> {
        if self.state != SessionState::Idle {
            tracing::warn!(state = ?self.state, "Destination already selected");
            return None;
        }

        self.interaction.show_message(INTRO_NOTICE);
        self.state = SessionState::AwaitingDestination;

        match self.interaction.choose_destination() {
            Some(destination) => {
                tracing::info!(destination = %destination.display(), "Destination selected");
                Some(destination)
            }
            None => {
                tracing::info!("No destination selected, export cancelled");
                self.state = SessionState::Done(RunOutcome::Cancelled);
                None
            }
        }
    }

    /// Walk the active hub and export into `destination`
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::DestinationUnavailable`] if the destination
    /// root cannot be created, and an error if the session already finished.
    /// Every failure during the walk is recorded in the summary instead.
    pub fn export_to(&mut self, destination: &Path) -> Result<ExportSummary> {
        if let SessionState::Done(outcome) = self.state {
            return Err(ExporterError::Other(format!(
                "Export session already finished ({outcome:?})"
            )));
        }

        fs::create_dir_all(destination).map_err(|e| {
            ExporterError::DestinationUnavailable(format!("{}: {}", destination.display(), e))
        })?;

        let start_time = Instant::now();
        self.state = SessionState::Walking;
        tracing::info!(destination = %destination.display(), "Starting export");

        let config = self.config;
        let progress = self.interaction.progress();
        let mut ctx = ExportContext::new(&config.export, self.token.clone(), progress);
        ctx.summary_mut().destination = Some(destination.to_path_buf());

        HubWalk {
            host: &mut *self.host,
            ctx: &mut ctx,
            filter: &config.projects,
            destination,
        }
        .run();

        let summary = ctx.finish().with_duration(start_time.elapsed());
        summary.log_summary();

        self.state = SessionState::Done(summary.outcome);
        self.interaction.show_message(&summary.outcome.to_string());

        Ok(summary)
    }

    /// Select a destination and export into it
    ///
    /// A dismissed prompt yields an empty summary with a cancelled outcome.
    ///
    /// # Errors
    ///
    /// See [`ExportSession::export_to`].
    pub fn run(&mut self) -> Result<ExportSummary> {
        match self.select_destination() {
            Some(destination) => self.export_to(&destination),
            None => {
                let mut summary = ExportSummary::new();
                summary.outcome = RunOutcome::Cancelled;
                Ok(summary)
            }
        }
    }
}

/// Walk state borrowed from the session for the duration of one run
struct HubWalk<'w, 'c, 'a, H: CadHost + ?Sized> {
    host: &'w mut H,
    ctx: &'c mut ExportContext<'a>,
    filter: &'w ProjectFilterConfig,
    destination: &'w Path,
}

impl<H: CadHost + ?Sized> HubWalk<'_, '_, '_, H> {
    fn run(&mut self) {
        self.ctx.progress().show(PROGRESS_TITLE, "", 0, 1);
        self.walk_hubs();
        self.ctx.progress().hide();
    }

    fn walk_hubs(&mut self) {
        let host = &*self.host;
        let Some(active) = self
            .ctx
            .attempt(IssueKind::EnumerationFailure, "Getting the active hub", || host.active_hub())
        else {
            return;
        };
        let Some(hubs) = self
            .ctx
            .attempt(IssueKind::EnumerationFailure, "Listing hubs", || host.hubs())
        else {
            return;
        };

        let hub_count = hubs.len();
        for (index, hub) in hubs.iter().enumerate() {
            if self.ctx.is_cancelled() {
                return;
            }
            if hub.id != active.id {
                tracing::info!(hub = %hub.name, "Skipping hub as it is not active");
                self.ctx.summary_mut().hubs_skipped += 1;
                continue;
            }

            tracing::info!(hub = %hub.name, "Exporting hub");
            self.ctx.summary_mut().hubs_visited += 1;
            self.walk_projects(hub, index + 1, hub_count);
            tracing::info!(hub = %hub.name, "Finished exporting hub");
        }
    }

    fn walk_projects(&mut self, hub: &Hub, hub_number: usize, hub_count: usize) {
        let host = &*self.host;
        let context = format!("Listing projects of hub \"{}\"", hub.name);
        let Some(projects) = self
            .ctx
            .attempt(IssueKind::EnumerationFailure, &context, || host.projects(hub))
        else {
            return;
        };

        let project_count = projects.len();
        for (index, project) in projects.iter().enumerate() {
            if self.ctx.is_cancelled() {
                return;
            }

            let selection =
                project_selection(&project.name, &self.filter.include, &self.filter.exclude);
            log_selection(&project.name, selection);
            if selection != ProjectSelection::Selected {
                self.ctx.summary_mut().projects_skipped += 1;
                continue;
            }

            tracing::info!(project = %project.name, "Exporting project");
            self.ctx.summary_mut().projects_exported += 1;

            let files = list_exportable_files(&*self.host, project);
            self.ctx.summary_mut().files_listed += files.len();

            let message = progress_message(hub_number, hub_count, index + 1, project_count);
            let progress = self.ctx.progress();
            progress.set_message(&message);
            progress.set_maximum(files.len());
            progress.reset();

            if files.is_empty() {
                tracing::info!(project = %project.name, "No files to export for this project");
                continue;
            }

            for (file_index, file) in files.iter().enumerate() {
                if self.ctx.is_cancelled() {
                    return;
                }
                self.ctx.progress().set_value(file_index + 1);
                self.export_file(hub, project, file);
            }

            tracing::info!(project = %project.name, "Finished exporting project");
        }
    }

    fn export_file(&mut self, hub: &Hub, project: &Project, entry: &ProjectFile) {
        let file = &entry.file;
        if !file.is_design(&self.ctx.options().design_extensions) {
            tracing::info!(
                file = %file.name,
                extension = %file.extension,
                "Not exporting file as it is not a design"
            );
            self.ctx.summary_mut().files_ignored += 1;
            return;
        }

        tracing::info!(file = %file.name, "Exporting design");

        let mut document = match OpenDocument::open(&mut *self.host, file) {
            Ok(document) => document,
            Err(error) => {
                let context = format!("Failed to open \"{}\"", file.name);
                self.ctx.record(IssueKind::OpenFailure, &context, &error);
                return;
            }
        };

        let id = document.id().clone();
        if let Err(error) = document.activate(&id) {
            let context = format!("Failed to activate \"{}\"", file.name);
            self.ctx.record(IssueKind::OpenFailure, &context, &error);
            document.close(self.ctx);
            return;
        }

        self.ctx.summary_mut().files_exported += 1;
        let segments = design_segments(hub, project, entry);
        Self::export_design(&mut document, self.ctx, self.destination, &segments);
        document.close(self.ctx);

        tracing::info!(file = %file.name, "Finished exporting design");
    }

    /// Screenshot, archive and component tree of one opened design
    fn export_design(
        document: &mut OpenDocument<'_, H>,
        ctx: &mut ExportContext<'_>,
        destination: &Path,
        segments: &[String],
    ) {
        if ctx.is_cancelled() {
            return;
        }
        let Some(file_dir) = ctx.create_dir(destination, segments) else {
            return;
        };
        tracing::info!(path = %file_dir.display(), "Writing design");

        let file_name = sanitize_or(document.name(), || UNNAMED_FILE.to_string());
        let export_base = file_dir.join(&file_name);
        let options = ctx.options();

        if options.screenshot {
            let path = with_suffix(&export_base, SCREENSHOT_EXTENSION);
            if ctx.admit("screenshot", &path) {
                let saved = document.refresh_viewport().and_then(|()| {
                    document.process_events();
                    document.save_screenshot(
                        &path,
                        options.screenshot_width,
                        options.screenshot_height,
                    )
                });
                match saved {
                    Ok(()) => ctx.written("screenshot", &path),
                    Err(error) => tracing::warn!(
                        path = %path.display(),
                        error = %error,
                        "Error saving screenshot"
                    ),
                }
            }
        }

        let id = document.id().clone();
        let archive = with_suffix(&export_base, ARCHIVE_EXTENSION);
        if ctx.admit("archive", &archive) {
            let host = document.host_mut();
            let context = format!("Archive export to {}", archive.display());
            ctx.write_artifact(IssueKind::EncodeFailure, "archive", &archive, &context, || {
                host.export_archive(&id, &archive)
            });
        }

        let host = document.host_mut();
        let context = format!("Getting the root component of \"{file_name}\"");
        let Some(root) =
            ctx.attempt(IssueKind::EnumerationFailure, &context, || host.root_component(&id))
        else {
            return;
        };

        ComponentExporter::new(document.host_mut(), ctx).export_component(&file_dir, &root);
    }
}

/// Directory segments of a design below the destination root
///
/// `Hub <hub>/Project <project>/<folder chain>/<file>.<ext>`, every name
/// sanitized.
pub fn design_segments(hub: &Hub, project: &Project, entry: &ProjectFile) -> Vec<String> {
    let mut segments = Vec::with_capacity(entry.folders.len() + 3);
    segments.push(format!("Hub {}", sanitize(&hub.name)));
    segments.push(format!("Project {}", sanitize(&project.name)));
    segments.extend(entry.folders.iter().map(|folder| sanitize(folder)));
    let file_name = sanitize_or(&entry.file.name, || UNNAMED_FILE.to_string());
    segments.push(format!("{}.{}", file_name, entry.file.extension));
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::host::{ProgressSurface, SilentProgress};
    use crate::adapters::manifest::{HubManifest, ManifestHost};
    use crate::domain::{DataFile, EntityId};
    use serde_json::json;
    use tempfile::TempDir;

    struct ScriptedInteraction {
        destination: Option<PathBuf>,
        messages: Vec<String>,
        progress: SilentProgress,
    }

    impl ScriptedInteraction {
        fn new(destination: Option<PathBuf>) -> Self {
            Self {
                destination,
                messages: Vec::new(),
                progress: SilentProgress,
            }
        }
    }

    impl Interaction for ScriptedInteraction {
        fn choose_destination(&mut self) -> Option<PathBuf> {
            self.destination.clone()
        }

        fn show_message(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }

        fn progress(&mut self) -> &mut dyn ProgressSurface {
            &mut self.progress
        }
    }

    fn host() -> ManifestHost {
        let manifest: HubManifest = serde_json::from_value(json!({
            "active_hub": "Work",
            "hubs": [
                {"name": "Personal", "projects": [{"name": "Hidden"}]},
                {
                    "name": "Work",
                    "projects": [
                        {"name": "Archive", "root": {"files": [{"name": "Old"}]}},
                        {
                            "name": "Widgets",
                            "root": {
                                "files": [
                                    {"name": "Bracket"},
                                    {"name": "Notes", "extension": "pdf"}
                                ]
                            }
                        }
                    ]
                }
            ]
        }))
        .unwrap();
        ManifestHost::from_manifest(manifest)
    }

    fn config() -> ExporterConfig {
        let mut config = ExporterConfig::default();
        config.export.screenshot = false;
        config.export.formats = vec![crate::domain::ExportFormat::Step];
        config
    }

    #[test]
    fn test_progress_message() {
        assert_eq!(
            progress_message(2, 3, 4, 5),
            "Hub: 2 of 3\nProject: 4 of 5\nExporting design %v of %m"
        );
    }

    #[test]
    fn test_design_segments_are_sanitized() {
        let hub = Hub {
            id: EntityId::new("0").unwrap(),
            name: "Team/Hub".to_string(),
        };
        let project = Project {
            id: EntityId::new("0/0").unwrap(),
            name: "Widgets".to_string(),
            hub_name: "Team/Hub".to_string(),
        };
        let entry = ProjectFile {
            file: DataFile {
                id: EntityId::new("0/0/r#0").unwrap(),
                name: "Bracket:v2".to_string(),
                extension: "f3d".to_string(),
            },
            folders: vec!["Widgets".to_string(), "Parts".to_string()],
        };

        assert_eq!(
            design_segments(&hub, &project, &entry),
            vec!["Hub Team Hub", "Project Widgets", "Widgets", "Parts", "Bracket v2.f3d"]
        );
    }

    #[test]
    fn test_run_walks_active_hub_only() {
        let temp = TempDir::new().unwrap();
        let mut host = host();
        let mut interaction = ScriptedInteraction::new(Some(temp.path().to_path_buf()));
        let config = config();

        let mut session =
            ExportSession::new(&mut host, &mut interaction, &config, CancellationToken::new());
        let summary = session.run().unwrap();

        assert_eq!(session.state(), SessionState::Done(RunOutcome::Success));
        assert_eq!(summary.hubs_visited, 1);
        assert_eq!(summary.hubs_skipped, 1);
        assert_eq!(summary.projects_exported, 2);
        assert_eq!(summary.files_exported, 2);
        assert_eq!(summary.files_ignored, 1);

        let bracket = temp.path().join("Hub Work/Project Widgets/Widgets/Bracket.f3d");
        assert!(bracket.join("Bracket.f3d").is_file());
        assert!(bracket.join("Bracket.stp").is_file());
        assert!(!temp.path().join("Hub Personal").exists());

        assert_eq!(interaction.messages[0], INTRO_NOTICE);
        assert_eq!(interaction.messages[1], "Export finished successfully.");
        assert_eq!(host.open_document_count(), 0);
    }

    #[test]
    fn test_dismissed_prompt_cancels() {
        let mut host = host();
        let mut interaction = ScriptedInteraction::new(None);
        let config = config();

        let mut session =
            ExportSession::new(&mut host, &mut interaction, &config, CancellationToken::new());
        let summary = session.run().unwrap();

        assert_eq!(summary.outcome, RunOutcome::Cancelled);
        assert_eq!(session.state(), SessionState::Done(RunOutcome::Cancelled));
        assert!(host.journal().opened.is_empty());
    }

    #[test]
    fn test_unavailable_destination_is_fatal() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let mut host = host();
        let mut interaction = ScriptedInteraction::new(Some(blocker.join("out")));
        let config = config();

        let mut session =
            ExportSession::new(&mut host, &mut interaction, &config, CancellationToken::new());
        let err = session.run().unwrap_err();

        assert!(matches!(err, ExporterError::DestinationUnavailable(_)));
        assert!(host.journal().opened.is_empty());
    }

    #[test]
    fn test_finished_session_cannot_export_again() {
        let temp = TempDir::new().unwrap();
        let mut host = host();
        let mut interaction = ScriptedInteraction::new(Some(temp.path().to_path_buf()));
        let config = config();

        let mut session =
            ExportSession::new(&mut host, &mut interaction, &config, CancellationToken::new());
        session.run().unwrap();

        assert!(session.export_to(temp.path()).is_err());
    }

    #[test]
    fn test_cancelled_token_stops_before_first_hub() {
        let temp = TempDir::new().unwrap();
        let mut host = host();
        let mut interaction = ScriptedInteraction::new(Some(temp.path().to_path_buf()));
        let config = config();
        let token = CancellationToken::new();
        token.cancel();

        let mut session = ExportSession::new(&mut host, &mut interaction, &config, token);
        let summary = session.run().unwrap();

        assert_eq!(summary.outcome, RunOutcome::Cancelled);
        assert_eq!(summary.hubs_visited, 0);
        assert!(host.journal().opened.is_empty());
        assert_eq!(interaction.messages.last().map(String::as_str), Some("Cancelled!"));
    }
}

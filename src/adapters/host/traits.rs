//! CAD host abstraction traits
//!
//! This module defines the narrow interfaces through which the exporter talks
//! to the host application. Every call is synchronous; the host serializes
//! document access, so one call completes before the next begins.

use crate::domain::{
    BodyKind, BodyRef, ComponentRef, DataFile, DocumentId, ExportFormat, Folder, HostResult, Hub,
    Project, SketchRef,
};
use std::path::{Path, PathBuf};

/// Enumeration of the storage hierarchy
///
/// Hub → projects → root folder → sub-folders and files.
pub trait HierarchyProvider {
    /// The hub whose documents can currently be opened
    fn active_hub(&self) -> HostResult<Hub>;

    /// Every hub visible to the user
    fn hubs(&self) -> HostResult<Vec<Hub>>;

    /// Projects of a hub
    fn projects(&self, hub: &Hub) -> HostResult<Vec<Project>>;

    /// The single root folder of a project
    fn root_folder(&self, project: &Project) -> HostResult<Folder>;

    /// Direct child folders of a folder
    fn subfolders(&self, folder: &Folder) -> HostResult<Vec<Folder>>;

    /// Files stored directly in a folder
    fn files(&self, folder: &Folder) -> HostResult<Vec<DataFile>>;
}

/// Document lifecycle, design graph and encoders
pub trait DesignHost {
    /// Open a file as a document
    ///
    /// # Errors
    ///
    /// Returns [`HostError::OpenFailed`](crate::domain::HostError::OpenFailed) if
    /// the host cannot open it.
    fn open(&mut self, file: &DataFile) -> HostResult<DocumentId>;

    /// Make an opened document the active one
    fn activate(&mut self, document: &DocumentId) -> HostResult<()>;

    /// Close an opened document
    fn close(&mut self, document: &DocumentId, discard_changes: bool) -> HostResult<()>;

    /// Root component of an opened design
    fn root_component(&self, document: &DocumentId) -> HostResult<ComponentRef>;

    /// Write the document-level archive to `path`
    fn export_archive(&mut self, document: &DocumentId, path: &Path) -> HostResult<()>;

    /// Sketches owned by a component
    fn sketches(&self, component: &ComponentRef) -> HostResult<Vec<SketchRef>>;

    /// Bodies of one kind owned by a component
    fn bodies(&self, component: &ComponentRef, kind: BodyKind) -> HostResult<Vec<BodyRef>>;

    /// Number of occurrences (child component references) of a component
    fn occurrence_count(&self, component: &ComponentRef) -> HostResult<usize>;

    /// Component referenced by the occurrence at `index`
    fn occurrence_component(
        &self,
        component: &ComponentRef,
        index: usize,
    ) -> HostResult<ComponentRef>;

    /// Encode a component's geometry in `format` to `path`
    fn export_component(
        &mut self,
        component: &ComponentRef,
        format: ExportFormat,
        path: &Path,
    ) -> HostResult<()>;

    /// Save a sketch as a 2-D vector drawing at `path`
    fn export_sketch(&mut self, sketch: &SketchRef, path: &Path) -> HostResult<()>;

    /// Encode a single body as a mesh at `path`
    fn export_body(&mut self, body: &BodyRef, path: &Path) -> HostResult<()>;

    /// Redraw the active viewport
    fn refresh_viewport(&mut self) -> HostResult<()>;

    /// Yield to the host event loop so pending UI work is processed
    fn process_events(&mut self) {}

    /// Capture the active viewport to an image file
    fn save_screenshot(&mut self, path: &Path, width: u32, height: u32) -> HostResult<()>;
}

/// A host that provides both the hierarchy and the design operations
pub trait CadHost: HierarchyProvider + DesignHost {}

impl<T: HierarchyProvider + DesignHost> CadHost for T {}

/// Progress reporting surface
///
/// The status template may contain `%v` (current value) and `%m` (maximum).
pub trait ProgressSurface {
    /// Display the surface
    fn show(&mut self, title: &str, message: &str, minimum: usize, maximum: usize);

    /// Replace the status template
    fn set_message(&mut self, template: &str);

    /// Set the maximum value
    fn set_maximum(&mut self, maximum: usize);

    /// Set the current value
    fn set_value(&mut self, value: usize);

    /// Reset the current value to the minimum
    fn reset(&mut self);

    /// Whether the user pressed cancel
    fn was_cancelled(&self) -> bool;

    /// Remove the surface
    fn hide(&mut self) {}
}

/// User-facing prompts and messages
pub trait Interaction {
    /// Ask where to write the export; `None` means the user cancelled
    fn choose_destination(&mut self) -> Option<PathBuf>;

    /// Display a modal message
    fn show_message(&mut self, message: &str);

    /// The progress surface owned by this interaction
    fn progress(&mut self) -> &mut dyn ProgressSurface;
}

/// Progress surface that reports nothing and is never cancelled
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSurface for SilentProgress {
    fn show(&mut self, _title: &str, _message: &str, _minimum: usize, _maximum: usize) {}
    fn set_message(&mut self, _template: &str) {}
    fn set_maximum(&mut self, _maximum: usize) {}
    fn set_value(&mut self, _value: usize) {}
    fn reset(&mut self) {}
    fn was_cancelled(&self) -> bool {
        false
    }
}

/// Expands `%v` and `%m` in a progress template
///
/// # Examples
///
/// ```
/// use hub_exporter::adapters::host::render_progress_template;
///
/// assert_eq!(
///     render_progress_template("Exporting design %v of %m", 2, 5),
///     "Exporting design 2 of 5"
/// );
/// ```
pub fn render_progress_template(template: &str, value: usize, maximum: usize) -> String {
    template
        .replace("%v", &value.to_string())
        .replace("%m", &maximum.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_progress_template_multiline() {
        let rendered = render_progress_template(
            "Hub: 1 of 1\nProject: 2 of 3\nExporting design %v of %m",
            4,
            9,
        );
        assert_eq!(rendered, "Hub: 1 of 1\nProject: 2 of 3\nExporting design 4 of 9");
    }

    #[test]
    fn test_silent_progress_never_cancels() {
        let mut progress = SilentProgress;
        progress.show("title", "", 0, 1);
        progress.set_value(1);
        assert!(!progress.was_cancelled());
    }
}

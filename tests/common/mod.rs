//! Shared fixtures for integration tests

#![allow(dead_code)]

use hub_exporter::adapters::host::{DesignHost, HierarchyProvider, Interaction, ProgressSurface};
use hub_exporter::adapters::manifest::{HubManifest, ManifestHost};
use hub_exporter::config::ExporterConfig;
use hub_exporter::core::cancel::CancellationToken;
use hub_exporter::domain::{
    BodyKind, BodyRef, ComponentRef, DataFile, DocumentId, ExportFormat, Folder, HostResult, Hub,
    Project, SketchRef,
};
use std::path::{Path, PathBuf};

/// Build a manifest host from inline JSON
pub fn manifest_host(value: serde_json::Value) -> ManifestHost {
    let manifest: HubManifest = serde_json::from_value(value).expect("valid manifest fixture");
    ManifestHost::from_manifest(manifest)
}

/// Configuration without screenshots and with the given formats
pub fn config_with_formats(formats: &[ExportFormat]) -> ExporterConfig {
    let mut config = ExporterConfig::default();
    config.export.formats = formats.to_vec();
    config.export.screenshot = false;
    config.logging.session_log = false;
    config
}

/// Every file below `root`, relative to it and sorted
pub fn tree(root: &Path) -> Vec<PathBuf> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<PathBuf>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }
    let mut out = Vec::new();
    if root.exists() {
        walk(root, root, &mut out);
    }
    out.sort();
    out
}

/// Progress surface that records every call
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub titles: Vec<String>,
    pub messages: Vec<String>,
    pub maximums: Vec<usize>,
    pub values: Vec<usize>,
    pub hidden: bool,
}

impl ProgressSurface for RecordingProgress {
    fn show(&mut self, title: &str, _message: &str, _minimum: usize, _maximum: usize) {
        self.titles.push(title.to_string());
    }

    fn set_message(&mut self, template: &str) {
        self.messages.push(template.to_string());
    }

    fn set_maximum(&mut self, maximum: usize) {
        self.maximums.push(maximum);
    }

    fn set_value(&mut self, value: usize) {
        self.values.push(value);
    }

    fn reset(&mut self) {}

    fn was_cancelled(&self) -> bool {
        false
    }

    fn hide(&mut self) {
        self.hidden = true;
    }
}

/// Interaction with a fixed destination that records messages
pub struct ScriptedInteraction {
    pub destination: Option<PathBuf>,
    pub messages: Vec<String>,
    pub progress: RecordingProgress,
}

impl ScriptedInteraction {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: Some(destination.into()),
            messages: Vec::new(),
            progress: RecordingProgress::default(),
        }
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
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

/// Host wrapper that cancels a token once a number of documents were opened
/// or artifacts were written
pub struct CancellingHost {
    pub inner: ManifestHost,
    token: CancellationToken,
    after_opens: Option<usize>,
    after_writes: Option<usize>,
    opens: usize,
}

impl CancellingHost {
    pub fn after_opens(inner: ManifestHost, token: CancellationToken, opens: usize) -> Self {
        Self {
            inner,
            token,
            after_opens: Some(opens),
            after_writes: None,
            opens: 0,
        }
    }

    pub fn after_writes(inner: ManifestHost, token: CancellationToken, writes: usize) -> Self {
        Self {
            inner,
            token,
            after_opens: None,
            after_writes: Some(writes),
            opens: 0,
        }
    }

    fn check_writes(&self) {
        if let Some(limit) = self.after_writes {
            if self.inner.writes().len() >= limit {
                self.token.cancel();
            }
        }
    }
}

impl HierarchyProvider for CancellingHost {
    fn active_hub(&self) -> HostResult<Hub> {
        self.inner.active_hub()
    }

    fn hubs(&self) -> HostResult<Vec<Hub>> {
        self.inner.hubs()
    }

    fn projects(&self, hub: &Hub) -> HostResult<Vec<Project>> {
        self.inner.projects(hub)
    }

    fn root_folder(&self, project: &Project) -> HostResult<Folder> {
        self.inner.root_folder(project)
    }

    fn subfolders(&self, folder: &Folder) -> HostResult<Vec<Folder>> {
        self.inner.subfolders(folder)
    }

    fn files(&self, folder: &Folder) -> HostResult<Vec<DataFile>> {
        self.inner.files(folder)
    }
}

impl DesignHost for CancellingHost {
    fn open(&mut self, file: &DataFile) -> HostResult<DocumentId> {
        let result = self.inner.open(file);
        self.opens += 1;
        if self.after_opens == Some(self.opens) {
            self.token.cancel();
        }
        result
    }

    fn activate(&mut self, document: &DocumentId) -> HostResult<()> {
        self.inner.activate(document)
    }

    fn close(&mut self, document: &DocumentId, discard_changes: bool) -> HostResult<()> {
        self.inner.close(document, discard_changes)
    }

    fn root_component(&self, document: &DocumentId) -> HostResult<ComponentRef> {
        self.inner.root_component(document)
    }

    fn export_archive(&mut self, document: &DocumentId, path: &Path) -> HostResult<()> {
        let result = self.inner.export_archive(document, path);
        self.check_writes();
        result
    }

    fn sketches(&self, component: &ComponentRef) -> HostResult<Vec<SketchRef>> {
        self.inner.sketches(component)
    }

    fn bodies(&self, component: &ComponentRef, kind: BodyKind) -> HostResult<Vec<BodyRef>> {
        self.inner.bodies(component, kind)
    }

    fn occurrence_count(&self, component: &ComponentRef) -> HostResult<usize> {
        self.inner.occurrence_count(component)
    }

    fn occurrence_component(
        &self,
        component: &ComponentRef,
        index: usize,
    ) -> HostResult<ComponentRef> {
        self.inner.occurrence_component(component, index)
    }

    fn export_component(
        &mut self,
        component: &ComponentRef,
        format: ExportFormat,
        path: &Path,
    ) -> HostResult<()> {
        let result = self.inner.export_component(component, format, path);
        self.check_writes();
        result
    }

    fn export_sketch(&mut self, sketch: &SketchRef, path: &Path) -> HostResult<()> {
        let result = self.inner.export_sketch(sketch, path);
        self.check_writes();
        result
    }

    fn export_body(&mut self, body: &BodyRef, path: &Path) -> HostResult<()> {
        let result = self.inner.export_body(body, path);
        self.check_writes();
        result
    }

    fn refresh_viewport(&mut self) -> HostResult<()> {
        self.inner.refresh_viewport()
    }

    fn save_screenshot(&mut self, path: &Path, width: u32, height: u32) -> HostResult<()> {
        let result = self.inner.save_screenshot(path, width, height);
        self.check_writes();
        result
    }
}

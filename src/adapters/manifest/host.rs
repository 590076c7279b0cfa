//! Host implementation backed by a [`HubManifest`]
//!
//! Handles are derived from positions in the manifest: hubs are `"<h>"`,
//! projects `"<h>/<p>"`, root folders `"<h>/<p>/r"` with one `/<k>` per nested
//! folder, and files append `#<n>` to their folder. Design handles are scoped
//! to the open document that produced them.

use super::model::{
    ComponentEntry, DesignEntry, FileEntry, FolderEntry, HubEntry, HubManifest, ProjectEntry,
};
use crate::adapters::host::{DesignHost, HierarchyProvider};
use crate::domain::{
    BodyKind, BodyRef, ComponentRef, DataFile, DocumentId, EntityId, ExportFormat, ExporterError,
    Folder, HostError, HostResult, Hub, Project, Result, SketchRef,
};
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Separator between the parts of a design handle
const SEP: char = '\u{1f}';

/// Record of the calls that touched documents or the filesystem
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostJournal {
    /// Names of files passed to `open`, in call order
    pub opened: Vec<String>,

    /// Names of documents passed to `close`, in call order
    pub closed: Vec<String>,

    /// Every artifact path written, in call order
    pub writes: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
struct OpenDesign {
    file_name: String,
    design: DesignEntry,
    fail_activate: bool,
    fail_close: bool,
    fail_archive: bool,
    fail_screenshot: bool,
}

/// CAD host stand-in driven by a JSON manifest
///
/// Every encoder writes a small JSON placeholder describing the entity and
/// format at the requested path.
#[derive(Debug, Clone)]
pub struct ManifestHost {
    manifest: HubManifest,
    open_documents: HashMap<DocumentId, OpenDesign>,
    active_document: Option<DocumentId>,
    journal: HostJournal,
}

impl ManifestHost {
    /// Create a host from an in-memory manifest
    pub fn from_manifest(manifest: HubManifest) -> Self {
        Self {
            manifest,
            open_documents: HashMap::new(),
            active_document: None,
            journal: HostJournal::default(),
        }
    }

    /// Load a manifest from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ExporterError::Configuration(format!(
                "Failed to read manifest {}: {}",
                path.display(),
                e
            ))
        })?;
        let manifest: HubManifest = serde_json::from_str(&contents).map_err(|e| {
            ExporterError::Configuration(format!(
                "Failed to parse manifest {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(
            path = %path.display(),
            hubs = manifest.hubs.len(),
            active_hub = %manifest.active_hub,
            "Loaded hub manifest"
        );

        Ok(Self::from_manifest(manifest))
    }

    /// The manifest this host serves
    pub fn manifest(&self) -> &HubManifest {
        &self.manifest
    }

    /// Calls recorded so far
    pub fn journal(&self) -> &HostJournal {
        &self.journal
    }

    /// Artifact paths written so far
    pub fn writes(&self) -> &[PathBuf] {
        &self.journal.writes
    }

    /// Number of documents currently open
    pub fn open_document_count(&self) -> usize {
        self.open_documents.len()
    }

    fn hub_entry(&self, id: &EntityId) -> HostResult<&HubEntry> {
        let h = parse_index(Some(id.as_str()), id)?;
        self.manifest
            .hubs
            .get(h)
            .ok_or_else(|| HostError::InvalidHandle(format!("hub {id}")))
    }

    fn project_entry(&self, id: &EntityId) -> HostResult<&ProjectEntry> {
        let mut parts = id.as_str().split('/');
        let h = parse_index(parts.next(), id)?;
        let p = parse_index(parts.next(), id)?;
        self.manifest
            .hubs
            .get(h)
            .and_then(|hub| hub.projects.get(p))
            .ok_or_else(|| HostError::InvalidHandle(format!("project {id}")))
    }

    fn folder_entry(&self, id: &EntityId) -> HostResult<&FolderEntry> {
        let mut parts = id.as_str().split('/');
        let h = parse_index(parts.next(), id)?;
        let p = parse_index(parts.next(), id)?;
        if parts.next() != Some("r") {
            return Err(HostError::InvalidHandle(format!("folder {id}")));
        }
        let mut folder = &self
            .manifest
            .hubs
            .get(h)
            .and_then(|hub| hub.projects.get(p))
            .ok_or_else(|| HostError::InvalidHandle(format!("folder {id}")))?
            .root;
        for part in parts {
            let k = parse_index(Some(part), id)?;
            folder = folder
                .folders
                .get(k)
                .ok_or_else(|| HostError::InvalidHandle(format!("folder {id}")))?;
        }
        Ok(folder)
    }

    fn file_entry(&self, id: &EntityId) -> HostResult<&FileEntry> {
        let (folder_id, n) = id
            .as_str()
            .split_once('#')
            .ok_or_else(|| HostError::InvalidHandle(format!("file {id}")))?;
        let folder = self.folder_entry(&entity_id(folder_id.to_string())?)?;
        let n = parse_index(Some(n), id)?;
        folder
            .files
            .get(n)
            .ok_or_else(|| HostError::InvalidHandle(format!("file {id}")))
    }

    fn open_design(&self, document: &DocumentId) -> HostResult<&OpenDesign> {
        self.open_documents
            .get(document)
            .ok_or_else(|| HostError::InvalidHandle(format!("document {document} is not open")))
    }

    fn component_entry(
        &self,
        component: &ComponentRef,
    ) -> HostResult<(&OpenDesign, &ComponentEntry)> {
        let (doc, name) = component
            .id
            .as_str()
            .split_once(SEP)
            .ok_or_else(|| HostError::InvalidHandle(format!("component {}", component.name)))?;
        let document = DocumentId::new(doc).map_err(HostError::InvalidHandle)?;
        let open = self.open_design(&document)?;
        let entry = open.design.components.get(name).ok_or_else(|| {
            HostError::InvalidHandle(format!("component {name} in {}", open.file_name))
        })?;
        Ok((open, entry))
    }

    /// Splits a sketch or body handle into its component and item index
    fn item_entry(
        &self,
        id: &EntityId,
        tag: char,
    ) -> HostResult<(&OpenDesign, &ComponentEntry, usize)> {
        let (component_id, item) = id
            .as_str()
            .rsplit_once(SEP)
            .ok_or_else(|| HostError::InvalidHandle(id.to_string()))?;
        let index = item
            .strip_prefix(tag)
            .and_then(|i| i.parse::<usize>().ok())
            .ok_or_else(|| HostError::InvalidHandle(id.to_string()))?;
        let component = ComponentRef {
            id: entity_id(component_id.to_string())?,
            name: String::new(),
        };
        let (open, entry) = self.component_entry(&component)?;
        Ok((open, entry, index))
    }

    fn write_placeholder(&mut self, path: &Path, description: serde_json::Value) -> HostResult<()> {
        let bytes = serde_json::to_vec_pretty(&description)
            .map_err(|e| HostError::EncodeFailed(e.to_string()))?;
        fs::write(path, bytes)
            .map_err(|e| HostError::EncodeFailed(format!("{}: {}", path.display(), e)))?;
        self.journal.writes.push(path.to_path_buf());
        Ok(())
    }
}

impl HierarchyProvider for ManifestHost {
    fn active_hub(&self) -> HostResult<Hub> {
        self.manifest
            .hubs
            .iter()
            .enumerate()
            .find(|(_, hub)| hub.name == self.manifest.active_hub)
            .map(|(h, hub)| -> HostResult<Hub> {
                Ok(Hub {
                    id: entity_id(h.to_string())?,
                    name: hub.name.clone(),
                })
            })
            .unwrap_or_else(|| {
                Err(HostError::Enumeration(format!(
                    "active hub '{}' not found",
                    self.manifest.active_hub
                )))
            })
    }

    fn hubs(&self) -> HostResult<Vec<Hub>> {
        self.manifest
            .hubs
            .iter()
            .enumerate()
            .map(|(h, hub)| -> HostResult<Hub> {
                Ok(Hub {
                    id: entity_id(h.to_string())?,
                    name: hub.name.clone(),
                })
            })
            .collect()
    }

    fn projects(&self, hub: &Hub) -> HostResult<Vec<Project>> {
        let entry = self.hub_entry(&hub.id)?;
        if entry.fail_listing {
            return Err(HostError::Enumeration(format!(
                "listing projects of hub '{}' failed",
                hub.name
            )));
        }
        entry
            .projects
            .iter()
            .enumerate()
            .map(|(p, project)| -> HostResult<Project> {
                Ok(Project {
                    id: entity_id(format!("{}/{}", hub.id, p))?,
                    name: project.name.clone(),
                    hub_name: entry.name.clone(),
                })
            })
            .collect()
    }

    fn root_folder(&self, project: &Project) -> HostResult<Folder> {
        let entry = self.project_entry(&project.id)?;
        let name = if entry.root.name.is_empty() {
            entry.name.clone()
        } else {
            entry.root.name.clone()
        };
        Ok(Folder {
            id: entity_id(format!("{}/r", project.id))?,
            name,
        })
    }

    fn subfolders(&self, folder: &Folder) -> HostResult<Vec<Folder>> {
        let entry = self.folder_entry(&folder.id)?;
        if entry.fail_listing {
            return Err(HostError::Enumeration(format!(
                "listing folder '{}' failed",
                folder.name
            )));
        }
        entry
            .folders
            .iter()
            .enumerate()
            .map(|(k, child)| -> HostResult<Folder> {
                Ok(Folder {
                    id: entity_id(format!("{}/{}", folder.id, k))?,
                    name: child.name.clone(),
                })
            })
            .collect()
    }

    fn files(&self, folder: &Folder) -> HostResult<Vec<DataFile>> {
        let entry = self.folder_entry(&folder.id)?;
        if entry.fail_listing {
            return Err(HostError::Enumeration(format!(
                "listing folder '{}' failed",
                folder.name
            )));
        }
        entry
            .files
            .iter()
            .enumerate()
            .map(|(n, file)| -> HostResult<DataFile> {
                Ok(DataFile {
                    id: entity_id(format!("{}#{}", folder.id, n))?,
                    name: file.name.clone(),
                    extension: file.extension.clone(),
                })
            })
            .collect()
    }
}

impl DesignHost for ManifestHost {
    fn open(&mut self, file: &DataFile) -> HostResult<DocumentId> {
        self.journal.opened.push(file.name.clone());
        let entry = self.file_entry(&file.id)?;
        if entry.fail_open {
            return Err(HostError::OpenFailed(format!("'{}' could not be opened", file.name)));
        }

        let design = entry.design.clone().unwrap_or_else(|| DesignEntry {
            root: file.name.clone(),
            components: [(file.name.clone(), ComponentEntry::default())]
                .into_iter()
                .collect(),
        });
        let open = OpenDesign {
            file_name: file.name.clone(),
            design,
            fail_activate: entry.fail_activate,
            fail_close: entry.fail_close,
            fail_archive: entry.fail_archive,
            fail_screenshot: entry.fail_screenshot,
        };

        let document =
            DocumentId::new(format!("doc:{}", file.id)).map_err(HostError::InvalidHandle)?;
        self.open_documents.insert(document.clone(), open);
        Ok(document)
    }

    fn activate(&mut self, document: &DocumentId) -> HostResult<()> {
        let open = self.open_design(document)?;
        if open.fail_activate {
            return Err(HostError::OpenFailed(format!(
                "'{}' could not be activated",
                open.file_name
            )));
        }
        self.active_document = Some(document.clone());
        Ok(())
    }

    fn close(&mut self, document: &DocumentId, _discard_changes: bool) -> HostResult<()> {
        let open = self
            .open_documents
            .remove(document)
            .ok_or_else(|| HostError::InvalidHandle(format!("document {document} is not open")))?;
        if self.active_document.as_ref() == Some(document) {
            self.active_document = None;
        }
        self.journal.closed.push(open.file_name.clone());
        if open.fail_close {
            return Err(HostError::CloseFailed(format!(
                "'{}' could not be closed",
                open.file_name
            )));
        }
        Ok(())
    }

    fn root_component(&self, document: &DocumentId) -> HostResult<ComponentRef> {
        let open = self.open_design(document)?;
        let root = &open.design.root;
        if !open.design.components.contains_key(root) {
            return Err(HostError::InvalidHandle(format!(
                "root component {root} missing in {}",
                open.file_name
            )));
        }
        Ok(ComponentRef {
            id: entity_id(format!("{document}{SEP}{root}"))?,
            name: root.clone(),
        })
    }

    fn export_archive(&mut self, document: &DocumentId, path: &Path) -> HostResult<()> {
        let open = self.open_design(document)?;
        if open.fail_archive {
            return Err(HostError::EncodeFailed(format!(
                "archive of '{}' failed",
                open.file_name
            )));
        }
        let description = json!({
            "artifact": "archive",
            "document": open.file_name,
            "components": open.design.components.keys().collect::<Vec<_>>(),
        });
        self.write_placeholder(path, description)
    }

    fn sketches(&self, component: &ComponentRef) -> HostResult<Vec<SketchRef>> {
        let (_, entry) = self.component_entry(component)?;
        entry
            .sketches
            .iter()
            .enumerate()
            .map(|(i, sketch)| -> HostResult<SketchRef> {
                Ok(SketchRef {
                    id: entity_id(format!("{}{SEP}s{i}", component.id))?,
                    name: sketch.name.clone(),
                })
            })
            .collect()
    }

    fn bodies(&self, component: &ComponentRef, kind: BodyKind) -> HostResult<Vec<BodyRef>> {
        let (_, entry) = self.component_entry(component)?;
        entry
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.kind == kind)
            .map(|(i, body)| -> HostResult<BodyRef> {
                Ok(BodyRef {
                    id: entity_id(format!("{}{SEP}b{i}", component.id))?,
                    name: body.name.clone(),
                    kind,
                })
            })
            .collect()
    }

    fn occurrence_count(&self, component: &ComponentRef) -> HostResult<usize> {
        let (_, entry) = self.component_entry(component)?;
        Ok(entry.occurrences.len())
    }

    fn occurrence_component(
        &self,
        component: &ComponentRef,
        index: usize,
    ) -> HostResult<ComponentRef> {
        let (open, entry) = self.component_entry(component)?;
        let name = entry.occurrences.get(index).ok_or_else(|| {
            HostError::InvalidHandle(format!("occurrence {index} of {}", component.name))
        })?;
        if !open.design.components.contains_key(name) {
            return Err(HostError::InvalidHandle(format!(
                "occurrence {index} of {} references unknown component {name}",
                component.name
            )));
        }
        let (document, _) = component
            .id
            .as_str()
            .split_once(SEP)
            .ok_or_else(|| HostError::InvalidHandle(component.id.to_string()))?;
        Ok(ComponentRef {
            id: entity_id(format!("{document}{SEP}{name}"))?,
            name: name.clone(),
        })
    }

    fn export_component(
        &mut self,
        component: &ComponentRef,
        format: ExportFormat,
        path: &Path,
    ) -> HostResult<()> {
        let (open, entry) = self.component_entry(component)?;
        if entry.fail_formats.contains(&format) {
            return Err(HostError::EncodeFailed(format!(
                "{} export of {} failed",
                format.label(),
                component.name
            )));
        }
        if format == ExportFormat::Stl && entry.is_empty() {
            return Err(HostError::EmptyGeometry(format!(
                "{} has no geometry",
                component.name
            )));
        }
        let description = json!({
            "artifact": "component",
            "format": format.extension(),
            "component": component.name,
            "document": open.file_name,
        });
        self.write_placeholder(path, description)
    }

    fn export_sketch(&mut self, sketch: &SketchRef, path: &Path) -> HostResult<()> {
        let (open, entry, index) = self.item_entry(&sketch.id, 's')?;
        let item = entry
            .sketches
            .get(index)
            .ok_or_else(|| HostError::InvalidHandle(sketch.id.to_string()))?;
        if item.fail {
            return Err(HostError::EncodeFailed(format!(
                "DXF export of sketch {} failed",
                sketch.name
            )));
        }
        let description = json!({
            "artifact": "sketch",
            "format": "dxf",
            "sketch": item.name,
            "document": open.file_name,
        });
        self.write_placeholder(path, description)
    }

    fn export_body(&mut self, body: &BodyRef, path: &Path) -> HostResult<()> {
        let (open, entry, index) = self.item_entry(&body.id, 'b')?;
        let item = entry
            .bodies
            .get(index)
            .ok_or_else(|| HostError::InvalidHandle(body.id.to_string()))?;
        if item.empty {
            return Err(HostError::EmptyGeometry(format!("body {} is empty", body.name)));
        }
        if item.fail {
            return Err(HostError::EncodeFailed(format!(
                "STL export of body {} failed",
                body.name
            )));
        }
        let description = json!({
            "artifact": "body",
            "format": "stl",
            "kind": item.kind,
            "body": item.name,
            "document": open.file_name,
        });
        self.write_placeholder(path, description)
    }

    fn refresh_viewport(&mut self) -> HostResult<()> {
        match &self.active_document {
            Some(_) => Ok(()),
            None => Err(HostError::ScreenshotFailed("no active document".to_string())),
        }
    }

    fn save_screenshot(&mut self, path: &Path, width: u32, height: u32) -> HostResult<()> {
        let document = self
            .active_document
            .clone()
            .ok_or_else(|| HostError::ScreenshotFailed("no active document".to_string()))?;
        let open = self.open_design(&document)?;
        if open.fail_screenshot {
            return Err(HostError::ScreenshotFailed(format!(
                "viewport of '{}' could not be captured",
                open.file_name
            )));
        }
        let description = json!({
            "artifact": "screenshot",
            "document": open.file_name,
            "width": width,
            "height": height,
        });
        self.write_placeholder(path, description)
    }
}

fn entity_id(raw: String) -> HostResult<EntityId> {
    EntityId::new(raw).map_err(HostError::InvalidHandle)
}

fn parse_index(part: Option<&str>, id: &EntityId) -> HostResult<usize> {
    part.and_then(|p| p.parse::<usize>().ok())
        .ok_or_else(|| HostError::InvalidHandle(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_host() -> ManifestHost {
        let manifest: HubManifest = serde_json::from_value(json!({
            "active_hub": "Work",
            "hubs": [
                {"name": "Archive Hub"},
                {
                    "name": "Work",
                    "projects": [{
                        "name": "Widgets",
                        "root": {
                            "files": [
                                {
                                    "name": "Bracket",
                                    "design": {
                                        "root": "Bracket",
                                        "components": {
                                            "Bracket": {
                                                "sketches": [
                                                    {"name": "Profile"},
                                                    {"name": "Holes", "fail": true}
                                                ],
                                                "bodies": [
                                                    {"name": "Solid1"},
                                                    {"name": "Scan", "kind": "mesh", "empty": true}
                                                ],
                                                "occurrences": ["Bolt", "Ghost"],
                                                "fail_formats": ["igs"]
                                            },
                                            "Bolt": {}
                                        }
                                    }
                                },
                                {"name": "Notes", "extension": "pdf"}
                            ],
                            "folders": [{"name": "Old", "fail_listing": true}]
                        }
                    }]
                }
            ]
        }))
        .unwrap();
        ManifestHost::from_manifest(manifest)
    }

    fn open_bracket(host: &mut ManifestHost) -> (DocumentId, ComponentRef) {
        let hub = host.active_hub().unwrap();
        let project = host.projects(&hub).unwrap().remove(0);
        let root = host.root_folder(&project).unwrap();
        let file = host.files(&root).unwrap().remove(0);
        let document = host.open(&file).unwrap();
        host.activate(&document).unwrap();
        let component = host.root_component(&document).unwrap();
        (document, component)
    }

    #[test]
    fn test_hierarchy_enumeration() {
        let host = sample_host();
        let hub = host.active_hub().unwrap();
        assert_eq!(hub.name, "Work");
        assert_eq!(host.hubs().unwrap().len(), 2);

        let projects = host.projects(&hub).unwrap();
        assert_eq!(projects[0].name, "Widgets");
        assert_eq!(projects[0].hub_name, "Work");

        let root = host.root_folder(&projects[0]).unwrap();
        assert_eq!(root.name, "Widgets");

        let files = host.files(&root).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].extension, "pdf");

        let folders = host.subfolders(&root).unwrap();
        assert_eq!(folders[0].name, "Old");
        assert!(matches!(host.files(&folders[0]), Err(HostError::Enumeration(_))));
    }

    #[test]
    fn test_design_graph_and_invalid_occurrence() {
        let mut host = sample_host();
        let (_, component) = open_bracket(&mut host);

        assert_eq!(component.name, "Bracket");
        assert_eq!(host.occurrence_count(&component).unwrap(), 2);
        assert_eq!(host.occurrence_component(&component, 0).unwrap().name, "Bolt");
        assert!(matches!(
            host.occurrence_component(&component, 1),
            Err(HostError::InvalidHandle(_))
        ));
        assert_eq!(host.sketches(&component).unwrap().len(), 2);
        assert_eq!(host.bodies(&component, BodyKind::Solid).unwrap().len(), 1);
        assert_eq!(host.bodies(&component, BodyKind::Mesh).unwrap().len(), 1);
    }

    #[test]
    fn test_encoders_write_and_fail_as_described() {
        let temp = TempDir::new().unwrap();
        let mut host = sample_host();
        let (_, component) = open_bracket(&mut host);

        let step = temp.path().join("Bracket.stp");
        host.export_component(&component, ExportFormat::Step, &step).unwrap();
        assert!(step.is_file());

        let iges = temp.path().join("Bracket.igs");
        assert!(matches!(
            host.export_component(&component, ExportFormat::Iges, &iges),
            Err(HostError::EncodeFailed(_))
        ));

        let sketches = host.sketches(&component).unwrap();
        host.export_sketch(&sketches[0], &temp.path().join("Profile.dxf")).unwrap();
        assert!(host
            .export_sketch(&sketches[1], &temp.path().join("Holes.dxf"))
            .is_err());

        let mesh = host.bodies(&component, BodyKind::Mesh).unwrap().remove(0);
        let err = host.export_body(&mesh, &temp.path().join("Scan.stl")).unwrap_err();
        assert!(err.is_benign());

        assert_eq!(host.writes().len(), 2);
    }

    #[test]
    fn test_empty_component_stl_is_empty_geometry() {
        let temp = TempDir::new().unwrap();
        let mut host = sample_host();
        let (_, component) = open_bracket(&mut host);
        let bolt = host.occurrence_component(&component, 0).unwrap();

        let err = host
            .export_component(&bolt, ExportFormat::Stl, &temp.path().join("Bolt.stl"))
            .unwrap_err();
        assert!(err.is_benign());
    }

    #[test]
    fn test_close_invalidates_handles() {
        let mut host = sample_host();
        let (document, component) = open_bracket(&mut host);
        assert_eq!(host.open_document_count(), 1);

        host.close(&document, false).unwrap();
        assert_eq!(host.open_document_count(), 0);
        assert!(host.sketches(&component).is_err());
        assert!(host.close(&document, false).is_err());
        assert_eq!(host.journal().closed, vec!["Bracket".to_string()]);
    }

    #[test]
    fn test_from_path_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hub.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ManifestHost::from_path(&path).unwrap_err();
        assert!(matches!(err, ExporterError::Configuration(_)));
        assert!(ManifestHost::from_path(temp.path().join("missing.json")).is_err());
    }
}

//! Manifest document model
//!
//! A manifest describes a hub hierarchy and the designs stored in it as JSON.
//! Optional `fail_*` flags make the corresponding host call fail so every
//! error path of the exporter can be rehearsed.

use crate::domain::{BodyKind, ExportFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of a manifest file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubManifest {
    /// Name of the hub whose documents can be opened
    pub active_hub: String,

    #[serde(default)]
    pub hubs: Vec<HubEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubEntry {
    pub name: String,

    #[serde(default)]
    pub projects: Vec<ProjectEntry>,

    /// Listing the projects of this hub fails
    #[serde(default)]
    pub fail_listing: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,

    #[serde(default)]
    pub root: FolderEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub files: Vec<FileEntry>,

    #[serde(default)]
    pub folders: Vec<FolderEntry>,

    /// Listing this folder's files and sub-folders fails
    #[serde(default)]
    pub fail_listing: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,

    #[serde(default = "default_extension")]
    pub extension: String,

    /// Design content; files without one open as an empty design
    #[serde(default)]
    pub design: Option<DesignEntry>,

    #[serde(default)]
    pub fail_open: bool,

    /// Opening succeeds but activation fails
    #[serde(default)]
    pub fail_activate: bool,

    #[serde(default)]
    pub fail_close: bool,

    #[serde(default)]
    pub fail_archive: bool,

    #[serde(default)]
    pub fail_screenshot: bool,
}

/// Component graph of one design
///
/// Components are keyed by name; occurrences refer to components by name, so
/// shared children and cycles can both be expressed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignEntry {
    pub root: String,

    #[serde(default)]
    pub components: BTreeMap<String, ComponentEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    #[serde(default)]
    pub sketches: Vec<SketchEntry>,

    #[serde(default)]
    pub bodies: Vec<BodyEntry>,

    /// Names of the referenced child components
    #[serde(default)]
    pub occurrences: Vec<String>,

    /// Formats whose encoder fails for this component
    #[serde(default)]
    pub fail_formats: Vec<ExportFormat>,
}

impl ComponentEntry {
    /// Whether the component owns no geometry and no children
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.occurrences.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SketchEntry {
    pub name: String,

    #[serde(default)]
    pub fail: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyEntry {
    pub name: String,

    #[serde(default)]
    pub kind: BodyKind,

    /// The body has no geometry; the encoder reports empty geometry
    #[serde(default)]
    pub empty: bool,

    #[serde(default)]
    pub fail: bool,
}

fn default_extension() -> String {
    "f3d".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_manifest_defaults() {
        let manifest: HubManifest = serde_json::from_str(
            r#"{"active_hub":"Personal","hubs":[{"name":"Personal","projects":[{"name":"P"}]}]}"#,
        )
        .unwrap();

        assert_eq!(manifest.hubs.len(), 1);
        let project = &manifest.hubs[0].projects[0];
        assert!(project.root.files.is_empty());
        assert!(!manifest.hubs[0].fail_listing);
    }

    #[test]
    fn test_design_graph_parsing() {
        let design: DesignEntry = serde_json::from_value(serde_json::json!({
            "root": "Assembly",
            "components": {
                "Assembly": {
                    "sketches": [{"name": "Profile"}],
                    "bodies": [{"name": "Shell", "kind": "mesh", "empty": true}],
                    "occurrences": ["Bolt", "Bolt"],
                    "fail_formats": ["igs"]
                },
                "Bolt": {}
            }
        }))
        .unwrap();

        let assembly = &design.components["Assembly"];
        assert_eq!(assembly.occurrences, vec!["Bolt", "Bolt"]);
        assert_eq!(assembly.bodies[0].kind, BodyKind::Mesh);
        assert_eq!(assembly.fail_formats, vec![ExportFormat::Iges]);
        assert!(design.components["Bolt"].is_empty());
        assert!(!assembly.is_empty());
    }

    #[test]
    fn test_file_extension_defaults_to_design() {
        let file: FileEntry = serde_json::from_str(r#"{"name":"Bracket"}"#).unwrap();
        assert_eq!(file.extension, "f3d");
        assert!(file.design.is_none());
    }
}

//! Read-only views of the host hierarchy
//!
//! Hub, project, folder and file descriptors come from the hierarchy provider;
//! component, sketch and body descriptors come from an opened design. The core
//! only reads names from them and passes their handles back to the host.

use super::ids::EntityId;
use serde::{Deserialize, Serialize};

/// Top-level workspace container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub {
    pub id: EntityId,
    pub name: String,
}

/// Named collection of designs within a hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    /// Name of the owning hub
    pub hub_name: String,
}

/// Storage folder within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: EntityId,
    pub name: String,
}

/// Stored file within a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFile {
    pub id: EntityId,
    pub name: String,
    /// Extension without the leading dot, e.g. `f3d`
    pub extension: String,
}

impl DataFile {
    /// Whether the file is a design document according to `design_extensions`
    ///
    /// Comparison is case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use hub_exporter::domain::{DataFile, EntityId};
    ///
    /// let file = DataFile {
    ///     id: EntityId::new("f1").unwrap(),
    ///     name: "Bracket".to_string(),
    ///     extension: "F3D".to_string(),
    /// };
    /// assert!(file.is_design(&["f3d".to_string(), "f3z".to_string()]));
    /// ```
    pub fn is_design(&self, design_extensions: &[String]) -> bool {
        design_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}

/// Named sub-assembly or part node within a design
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    pub id: EntityId,
    pub name: String,
}

/// 2-D drawing owned by a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchRef {
    pub id: EntityId,
    pub name: String,
}

/// Kind of 3-D body geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// Boundary-representation solid
    #[default]
    Solid,
    /// Triangle mesh
    Mesh,
}

/// 3-D geometry owned by a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRef {
    pub id: EntityId,
    pub name: String,
    pub kind: BodyKind,
}

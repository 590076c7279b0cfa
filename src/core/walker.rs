//! Hierarchy walking and project filtering
//!
//! Flattens the folder tree of a project into a list of files and decides
//! which projects of the active hub take part in an export.

use crate::adapters::host::HierarchyProvider;
use crate::domain::{DataFile, Folder, Project};

/// A file together with the folder chain it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// The file descriptor
    pub file: DataFile,

    /// Raw folder names from the project's root folder down to the file's folder
    pub folders: Vec<String>,
}

/// Why a project is or is not exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSelection {
    /// The project is exported
    Selected,
    /// The project is named in the exclude list
    Excluded,
    /// An include list is set and does not name the project
    NotIncluded,
}

/// Classify a project name against the include and exclude lists
///
/// A non-empty exclude list wins; the include list is consulted only when the
/// exclude list is empty.
pub fn project_selection(name: &str, include: &[String], exclude: &[String]) -> ProjectSelection {
    if !exclude.is_empty() {
        if exclude.iter().any(|n| n == name) {
            ProjectSelection::Excluded
        } else {
            ProjectSelection::Selected
        }
    } else if !include.is_empty() && !include.iter().any(|n| n == name) {
        ProjectSelection::NotIncluded
    } else {
        ProjectSelection::Selected
    }
}

/// Whether a project takes part in the export
///
/// # Examples
///
/// ```
/// use hub_exporter::core::walker::is_project_selected;
///
/// let archive = vec!["Archive".to_string()];
/// assert!(!is_project_selected("Archive", &[], &archive));
/// assert!(is_project_selected("Widgets", &[], &archive));
/// ```
pub fn is_project_selected(name: &str, include: &[String], exclude: &[String]) -> bool {
    project_selection(name, include, exclude) == ProjectSelection::Selected
}

/// Log the filter decision for one project
pub fn log_selection(name: &str, selection: ProjectSelection) {
    match selection {
        ProjectSelection::Selected => {}
        ProjectSelection::Excluded => {
            tracing::info!(project = %name, "Skipping project as project in exclude list");
        }
        ProjectSelection::NotIncluded => {
            tracing::info!(project = %name, "Not exporting project as not in include list");
        }
    }
}

/// Every file transitively under the project's root folder
///
/// Folders are visited depth-first, files of a folder before its sub-folders.
/// A listing failure is logged and that subtree contributes nothing; the walk
/// continues with the siblings.
pub fn list_exportable_files<H>(host: &H, project: &Project) -> Vec<ProjectFile>
where
    H: HierarchyProvider + ?Sized,
{
    let root = match host.root_folder(project) {
        Ok(root) => root,
        Err(e) => {
            tracing::error!(project = %project.name, error = %e, "Exception getting files");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    let mut chain = Vec::new();
    collect_files(host, &root, &mut chain, &mut files);

    tracing::debug!(project = %project.name, files = files.len(), "Listed project files");
    files
}

fn collect_files<H>(
    host: &H,
    folder: &Folder,
    chain: &mut Vec<String>,
    out: &mut Vec<ProjectFile>,
) where
    H: HierarchyProvider + ?Sized,
{
    chain.push(folder.name.clone());

    match host.files(folder) {
        Ok(files) => out.extend(files.into_iter().map(|file| ProjectFile {
            file,
            folders: chain.clone(),
        })),
        Err(e) => {
            tracing::error!(folder = %folder.name, error = %e, "Exception getting files");
            chain.pop();
            return;
        }
    }

    match host.subfolders(folder) {
        Ok(subfolders) => {
            for subfolder in &subfolders {
                collect_files(host, subfolder, chain, out);
            }
        }
        Err(e) => {
            tracing::error!(folder = %folder.name, error = %e, "Exception getting sub-folders");
        }
    }

    chain.pop();
}

//! Plan command implementation
//!
//! This module implements the `plan` command, which walks the hierarchy
//! without opening any document and shows what an export would write.

use crate::adapters::host::HierarchyProvider;
use crate::adapters::manifest::ManifestHost;
use crate::config::{load_config, ExporterConfig};
use crate::core::export::design_segments;
use crate::core::naming::compose_path;
use crate::core::walker::{list_exportable_files, project_selection, ProjectSelection};
use crate::domain::HostResult;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Hub manifest to read (overrides [host].manifest)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// List every file instead of per-project counts
    #[arg(long)]
    pub files: bool,
}

/// A file an export would visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// File name with extension
    pub name: String,

    /// Output directory relative to the destination root
    pub directory: PathBuf,

    /// Whether the file is a design and would be opened
    pub is_design: bool,
}

/// A project of the active hub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedProject {
    pub name: String,
    pub selection: ProjectSelection,
    pub files: Vec<PlannedFile>,
}

/// Everything an export of the active hub would visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub active_hub: String,
    pub skipped_hubs: Vec<String>,
    pub projects: Vec<PlannedProject>,
}

impl ExportPlan {
    /// Number of design files in selected projects
    pub fn design_count(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| p.selection == ProjectSelection::Selected)
            .flat_map(|p| p.files.iter())
            .filter(|f| f.is_design)
            .count()
    }
}

/// Walk the hierarchy the way an export would, without opening documents
///
/// # Errors
///
/// Returns the host error if the hubs or the active hub's projects cannot be
/// listed. Folder listing failures only drop the affected files.
pub fn build_plan<H>(host: &H, config: &ExporterConfig) -> HostResult<ExportPlan>
where
    H: HierarchyProvider + ?Sized,
{
    let active = host.active_hub()?;
    let skipped_hubs = host
        .hubs()?
        .into_iter()
        .filter(|hub| hub.id != active.id)
        .map(|hub| hub.name)
        .collect();

    let mut projects = Vec::new();
    for project in host.projects(&active)? {
        let selection =
            project_selection(&project.name, &config.projects.include, &config.projects.exclude);
        let files = if selection == ProjectSelection::Selected {
            list_exportable_files(host, &project)
                .into_iter()
                .map(|entry| PlannedFile {
                    name: format!("{}.{}", entry.file.name, entry.file.extension),
                    directory: compose_path("", &design_segments(&active, &project, &entry)),
                    is_design: entry.file.is_design(&config.export.design_extensions),
                })
                .collect()
        } else {
            Vec::new()
        };
        projects.push(PlannedProject {
            name: project.name,
            selection,
            files,
        });
    }

    Ok(ExportPlan {
        active_hub: active.name,
        skipped_hubs,
        projects,
    })
}

impl PlanArgs {
    /// Execute the plan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Planning export");

        println!("🗺️  Export Plan");
        println!();

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2); // Configuration error exit code
            }
        };
        if let Some(manifest) = &self.manifest {
            config.host.manifest = manifest.clone();
        }

        let host = match ManifestHost::from_path(&config.host.manifest) {
            Ok(h) => h,
            Err(e) => {
                println!("❌ Failed to load hub manifest");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let plan = match build_plan(&host, &config) {
            Ok(p) => p,
            Err(e) => {
                println!("❌ Failed to walk the hub");
                println!("   Error: {}", e);
                return Ok(5); // Fatal error exit code
            }
        };

        println!("Active hub: {}", plan.active_hub);
        for hub in &plan.skipped_hubs {
            println!("  Skipped hub (not active): {hub}");
        }
        println!();

        for project in &plan.projects {
            match project.selection {
                ProjectSelection::Selected => {
                    let designs = project.files.iter().filter(|f| f.is_design).count();
                    println!(
                        "📁 {} ({} designs, {} other files)",
                        project.name,
                        designs,
                        project.files.len() - designs
                    );
                    if self.files {
                        for file in &project.files {
                            if file.is_design {
                                println!("    {} -> {}", file.name, file.directory.display());
                            } else {
                                println!("    {} (not a design, skipped)", file.name);
                            }
                        }
                    }
                }
                ProjectSelection::Excluded => {
                    println!("⏭️  {} (in exclude list)", project.name);
                }
                ProjectSelection::NotIncluded => {
                    println!("⏭️  {} (not in include list)", project.name);
                }
            }
        }

        println!();
        println!("Designs to export: {}", plan.design_count());
        println!();
        Ok(0)
    }
}

//! Recursive export of one component and its sub-components
//!
//! For a component named `C` under directory `D` the exporter writes
//! `D/C.stp|stl|igs`, `D/C/<sketch>.dxf` and `D/C/<body>.stl`, then exports
//! every child component under `D/C`. Every host call is isolated: a failure
//! becomes a recorded issue and the walk moves on to the next artifact.

use super::context::ExportContext;
use crate::adapters::host::DesignHost;
use crate::core::naming::{compose_path, sanitize_or, with_suffix};
use crate::domain::format::{BODY_EXTENSION, SKETCH_EXTENSION};
use crate::domain::{BodyKind, ComponentRef, ExportFormat, IssueKind};
use std::path::{Path, PathBuf};

/// Fallback path segment for a component whose name sanitizes to nothing
const UNNAMED_COMPONENT: &str = "Component";

/// Exports a component tree of an opened design
pub struct ComponentExporter<'h, 'c, 'a, H: DesignHost + ?Sized> {
    host: &'h mut H,
    ctx: &'c mut ExportContext<'a>,
}

impl<'h, 'c, 'a, H: DesignHost + ?Sized> ComponentExporter<'h, 'c, 'a, H> {
    /// Create an exporter writing through `host` and recording into `ctx`
    pub fn new(host: &'h mut H, ctx: &'c mut ExportContext<'a>) -> Self {
        Self { host, ctx }
    }

    /// Export `component` and, if enabled, its sub-components under `base_dir`
    ///
    /// Never fails: every problem is recorded in the context.
    pub fn export_component(&mut self, base_dir: &Path, component: &ComponentRef) {
        self.export_at_depth(base_dir, component, 0);
    }

    fn export_at_depth(&mut self, base_dir: &Path, component: &ComponentRef, depth: usize) {
        if self.ctx.is_cancelled() {
            return;
        }

        tracing::info!(
            component = %component.name,
            path = %base_dir.display(),
            depth,
            "Writing component"
        );

        let name = sanitize_or(&component.name, || UNNAMED_COMPONENT.to_string());
        let artifact_base = compose_path(base_dir, &[&name]);
        let options = self.ctx.options();

        for &format in &options.formats {
            self.export_format(component, format, &artifact_base);
        }

        if options.sketches {
            self.export_sketches(component, base_dir, &name);
        }

        if options.bodies {
            for kind in [BodyKind::Solid, BodyKind::Mesh] {
                self.export_bodies(component, kind, base_dir, &name);
            }
        }

        if options.subcomponents {
            self.export_subcomponents(component, base_dir, &name, depth);
        }
    }

    fn export_format(&mut self, component: &ComponentRef, format: ExportFormat, base: &Path) {
        let path = with_suffix(base, format.extension());
        if !self.ctx.admit(format.label(), &path) {
            return;
        }

        let Err(error) = self.host.export_component(component, format, &path) else {
            self.ctx.written(format.label(), &path);
            return;
        };
        let benign = error.is_benign()
            || (format == ExportFormat::Stl && self.is_empty_component(component));
        let kind = if benign {
            IssueKind::BenignEncodeFailure
        } else {
            IssueKind::EncodeFailure
        };
        let context = format!(
            "{} export of {} to {}",
            format.label(),
            component.name,
            path.display()
        );
        self.ctx.record(kind, &context, &error);
    }

    /// A component with no occurrences and no bodies has nothing to mesh
    fn is_empty_component(&self, component: &ComponentRef) -> bool {
        let no_occurrences = matches!(self.host.occurrence_count(component), Ok(0));
        let no_bodies = [BodyKind::Solid, BodyKind::Mesh].into_iter().all(|kind| {
            self.host
                .bodies(component, kind)
                .map(|bodies| bodies.is_empty())
                .unwrap_or(false)
        });
        no_occurrences && no_bodies
    }

    fn export_sketches(&mut self, component: &ComponentRef, base_dir: &Path, name: &str) {
        let host = &mut *self.host;
        let context = format!("listing sketches of {}", component.name);
        let Some(sketches) = self
            .ctx
            .attempt(IssueKind::EnumerationFailure, &context, || host.sketches(component))
        else {
            return;
        };
        if sketches.is_empty() {
            return;
        }
        let Some(dir) = self.artifact_dir(base_dir, name) else {
            return;
        };

        for (index, sketch) in sketches.iter().enumerate() {
            if self.ctx.is_cancelled() {
                return;
            }
            let stem = sanitize_or(&sketch.name, || format!("Sketch {}", index + 1));
            let path = with_suffix(&dir.join(stem), SKETCH_EXTENSION);
            if !self.ctx.admit("DXF sketch", &path) {
                continue;
            }

            let host = &mut *self.host;
            let context = format!("DXF export of sketch {} to {}", sketch.name, path.display());
            self.ctx.write_artifact(IssueKind::EncodeFailure, "DXF sketch", &path, &context, || {
                host.export_sketch(sketch, &path)
            });
        }
    }

    fn export_bodies(
        &mut self,
        component: &ComponentRef,
        kind: BodyKind,
        base_dir: &Path,
        name: &str,
    ) {
        let host = &mut *self.host;
        let context = format!("listing {kind:?} bodies of {}", component.name);
        let Some(bodies) = self
            .ctx
            .attempt(IssueKind::EnumerationFailure, &context, || host.bodies(component, kind))
        else {
            return;
        };
        if bodies.is_empty() {
            return;
        }
        let Some(dir) = self.artifact_dir(base_dir, name) else {
            return;
        };

        for (index, body) in bodies.iter().enumerate() {
            if self.ctx.is_cancelled() {
                return;
            }
            let stem = sanitize_or(&body.name, || format!("Body {}", index + 1));
            let path = with_suffix(&dir.join(stem), BODY_EXTENSION);
            if !self.ctx.admit("STL body", &path) {
                continue;
            }

            let host = &mut *self.host;
            let context = format!("STL export of body {} to {}", body.name, path.display());
            self.ctx.write_artifact(IssueKind::EncodeFailure, "STL body", &path, &context, || {
                host.export_body(body, &path)
            });
        }
    }

    fn export_subcomponents(
        &mut self,
        component: &ComponentRef,
        base_dir: &Path,
        name: &str,
        depth: usize,
    ) {
        let host = &mut *self.host;
        let context = format!("counting occurrences of {}", component.name);
        let Some(count) = self
            .ctx
            .attempt(IssueKind::EnumerationFailure, &context, || host.occurrence_count(component))
        else {
            return;
        };
        if count == 0 {
            return;
        }

        let options = self.ctx.options();
        if count > options.max_subcomponent_count {
            tracing::info!(
                component = %component.name,
                count,
                limit = options.max_subcomponent_count,
                "Component has more subcomponents than the set limit. No subcomponents exported."
            );
            return;
        }
        if depth + 1 >= options.max_component_depth {
            tracing::info!(
                component = %component.name,
                depth,
                limit = options.max_component_depth,
                "Component nesting exceeds the set depth limit. No subcomponents exported."
            );
            return;
        }

        let Some(sub_dir) = self.artifact_dir(base_dir, name) else {
            return;
        };

        for index in 0..count {
            if self.ctx.is_cancelled() {
                return;
            }

            let host = &mut *self.host;
            let context = format!("occurrence {index} of {}", component.name);
            let Some(child) = self.ctx.attempt(IssueKind::EnumerationFailure, &context, || {
                host.occurrence_component(component, index)
            }) else {
                continue;
            };

            self.export_at_depth(&sub_dir, &child, depth + 1);
        }
    }

    /// Directory `base_dir/name` holding sketches, bodies and sub-components
    fn artifact_dir(&mut self, base_dir: &Path, name: &str) -> Option<PathBuf> {
        if self.ctx.is_cancelled() {
            return None;
        }
        self.ctx.create_dir(base_dir, &[name])
    }
}

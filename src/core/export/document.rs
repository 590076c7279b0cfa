//! Scoped ownership of an opened design document

use super::context::ExportContext;
use crate::adapters::host::DesignHost;
use crate::domain::{DocumentId, IssueKind};
use std::ops::{Deref, DerefMut};

/// An opened document that is closed on every exit path
///
/// Call [`OpenDocument::close`] to close it and record a failure as a
/// `CloseFailure` issue. If the guard is dropped without that call, for
/// example while unwinding, the document is closed on drop and a failure is
/// only logged.
pub struct OpenDocument<'h, H: DesignHost + ?Sized> {
    host: &'h mut H,
    id: DocumentId,
    name: String,
    closed: bool,
}

impl<'h, H: DesignHost + ?Sized> OpenDocument<'h, H> {
    /// Take ownership of the document `id` opened on `host`
    pub fn new(host: &'h mut H, id: DocumentId, name: impl Into<String>) -> Self {
        Self {
            host,
            id,
            name: name.into(),
            closed: false,
        }
    }

    /// Open `file` on `host` and guard the resulting document
    pub fn open(
        host: &'h mut H,
        file: &crate::domain::DataFile,
    ) -> crate::domain::HostResult<Self> {
        let id = host.open(file)?;
        Ok(Self::new(host, id, file.name.clone()))
    }

    /// Handle of the document
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Name of the file the document was opened from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The host, for calls scoped to this document
    pub fn host_mut(&mut self) -> &mut H {
        self.host
    }

    /// Close the document without saving
    pub fn close(mut self, ctx: &mut ExportContext<'_>) {
        self.closed = true;
        match self.host.close(&self.id, false) {
            Ok(()) => tracing::debug!(document = %self.name, "Closed document"),
            Err(error) => {
                let context = format!("Failed to close \"{}\"", self.name);
                ctx.record(IssueKind::CloseFailure, &context, &error);
            }
        }
    }
}

impl<H: DesignHost + ?Sized> Deref for OpenDocument<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: DesignHost + ?Sized> DerefMut for OpenDocument<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: DesignHost + ?Sized> Drop for OpenDocument<'_, H> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(error) = self.host.close(&self.id, false) {
            tracing::error!(document = %self.name, error = %error, "Failed to close document");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::host::{HierarchyProvider, SilentProgress};
    use crate::adapters::manifest::{HubManifest, ManifestHost};
    use crate::config::ExportConfig;
    use crate::core::cancel::CancellationToken;
    use crate::domain::DataFile;
    use serde_json::json;

    fn host_and_file(fail_close: bool) -> (ManifestHost, DataFile) {
        let manifest: HubManifest = serde_json::from_value(json!({
            "active_hub": "Hub",
            "hubs": [{
                "name": "Hub",
                "projects": [{
                    "name": "P",
                    "root": {"files": [{"name": "Bracket", "fail_close": fail_close}]}
                }]
            }]
        }))
        .unwrap();
        let host = ManifestHost::from_manifest(manifest);
        let hub = host.active_hub().unwrap();
        let project = host.projects(&hub).unwrap().remove(0);
        let root = host.root_folder(&project).unwrap();
        let file = host.files(&root).unwrap().remove(0);
        (host, file)
    }

    #[test]
    fn test_drop_closes_document() {
        let (mut host, file) = host_and_file(false);
        {
            let doc = OpenDocument::open(&mut host, &file).unwrap();
            assert_eq!(doc.name(), "Bracket");
        }
        assert_eq!(host.open_document_count(), 0);
        assert_eq!(host.journal().closed, vec!["Bracket".to_string()]);
    }

    #[test]
    fn test_close_failure_is_recorded_once() {
        let (mut host, file) = host_and_file(true);
        let options = ExportConfig::default();
        let mut progress = SilentProgress;
        let mut ctx = ExportContext::new(&options, CancellationToken::new(), &mut progress);

        let doc = OpenDocument::open(&mut host, &file).unwrap();
        doc.close(&mut ctx);

        assert_eq!(ctx.tracker().issue_count(), 1);
        assert_eq!(ctx.tracker().issues()[0].kind, IssueKind::CloseFailure);
        assert_eq!(host.journal().closed.len(), 1);
    }

    #[test]
    fn test_deref_reaches_host() {
        let (mut host, file) = host_and_file(false);
        let mut doc = OpenDocument::open(&mut host, &file).unwrap();
        let id = doc.id().clone();

        let root = doc.root_component(&id).unwrap();
        assert_eq!(root.name, "Bracket");
        assert!(doc.activate(&id).is_ok());
    }
}

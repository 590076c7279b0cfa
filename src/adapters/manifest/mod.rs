//! JSON manifest host
//!
//! [`ManifestHost`] serves a hub hierarchy described in a JSON file and writes
//! placeholder artifacts. It lets the whole export walk be rehearsed, and tested,
//! without a running CAD application.

pub mod host;
pub mod model;

pub use host::{HostJournal, ManifestHost};
pub use model::{
    BodyEntry, ComponentEntry, DesignEntry, FileEntry, FolderEntry, HubEntry, HubManifest,
    ProjectEntry, SketchEntry,
};

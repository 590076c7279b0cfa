//! Host application seams
//!
//! The exporter consumes the CAD host only through the traits in [`traits`]:
//! hierarchy enumeration, document lifecycle and encoders, and the user-facing
//! prompt, message and progress surfaces.

pub mod traits;

pub use traits::{
    render_progress_template, CadHost, DesignHost, HierarchyProvider, Interaction,
    ProgressSurface, SilentProgress,
};

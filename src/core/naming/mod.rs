//! Name sanitization and output path construction
//!
//! Every artifact path is a pure function of the hierarchy path from the hub
//! down to the artifact after sanitization, so two runs against an unchanged
//! hierarchy produce identical trees.

pub mod paths;
pub mod sanitize;

pub use paths::{build_path, compose_path, with_suffix};
pub use sanitize::{clean_characters, guard_extension, sanitize, sanitize_or};

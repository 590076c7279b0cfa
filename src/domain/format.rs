//! Output formats and the file extensions the exporter produces

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Extension of the document-level archive
pub const ARCHIVE_EXTENSION: &str = "f3d";

/// Extension of the per-design screenshot
pub const SCREENSHOT_EXTENSION: &str = "png";

/// Extension of exported sketches
pub const SKETCH_EXTENSION: &str = "dxf";

/// Extension of exported bodies
pub const BODY_EXTENSION: &str = "stl";

/// Component-level geometry format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// STEP (ISO 10303)
    #[serde(rename = "stp")]
    Step,
    /// Stereolithography mesh
    #[serde(rename = "stl")]
    Stl,
    /// IGES
    #[serde(rename = "igs")]
    Iges,
}

impl ExportFormat {
    /// Every supported format, in export order
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Step, ExportFormat::Stl, ExportFormat::Iges];

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Step => "stp",
            ExportFormat::Stl => "stl",
            ExportFormat::Iges => "igs",
        }
    }

    /// Human-readable label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Step => "STEP",
            ExportFormat::Stl => "STL",
            ExportFormat::Iges => "IGES",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stp" | "step" => Ok(ExportFormat::Step),
            "stl" => Ok(ExportFormat::Stl),
            "igs" | "iges" => Ok(ExportFormat::Iges),
            other => Err(format!(
                "Unknown export format '{other}'. Must be one of: stp, stl, igs"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(ExportFormat::Step.extension(), "stp");
        assert_eq!(ExportFormat::Stl.extension(), "stl");
        assert_eq!(ExportFormat::Iges.extension(), "igs");
    }

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!(ExportFormat::from_str("STEP").unwrap(), ExportFormat::Step);
        assert_eq!(ExportFormat::from_str(" igs ").unwrap(), ExportFormat::Iges);
        assert!(ExportFormat::from_str("obj").is_err());
    }

    #[test]
    fn test_serde_uses_extensions() {
        let formats: Vec<ExportFormat> = serde_json::from_str(r#"["stp","stl","igs"]"#).unwrap();
        assert_eq!(formats, ExportFormat::ALL.to_vec());
        assert_eq!(serde_json::to_string(&ExportFormat::Iges).unwrap(), "\"igs\"");
    }
}

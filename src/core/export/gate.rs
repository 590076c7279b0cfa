//! Per-artifact write gate

use std::path::Path;

/// Whether an artifact at `path` should be written
///
/// True when `overwrite` is set or nothing exists at `path` yet.
///
/// # Examples
///
/// ```
/// use hub_exporter::core::export::should_write;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("Bracket.stp");
/// assert!(should_write(&path, false));
///
/// std::fs::write(&path, b"solid").unwrap();
/// assert!(!should_write(&path, false));
/// assert!(should_write(&path, true));
/// ```
pub fn should_write(path: &Path, overwrite: bool) -> bool {
    overwrite || !path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case(false, true, false ; "existing file without overwrite is skipped")]
    #[test_case(true, true, true ; "existing file with overwrite is written")]
    #[test_case(false, false, true ; "missing file without overwrite is written")]
    #[test_case(true, false, true ; "missing file with overwrite is written")]
    fn test_should_write(overwrite: bool, exists: bool, expected: bool) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Part.stl");
        if exists {
            std::fs::write(&path, b"mesh").unwrap();
        }

        assert_eq!(should_write(&path, overwrite), expected);
    }
}

//! Composition and creation of the mirrored output directories

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Joins `segments` onto `base` without touching the filesystem
///
/// Empty segments are skipped so that a name that sanitizes to nothing does
/// not produce a doubled separator. A segment made only of periods (`.`,
/// `..`, `...`) has each period replaced by `_`, so every composed path stays
/// below `base`.
pub fn compose_path<S: AsRef<str>>(base: impl AsRef<Path>, segments: &[S]) -> PathBuf {
    let mut path = base.as_ref().to_path_buf();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        if segment.chars().all(|c| c == '.') {
            path.push(segment.replace('.', "_"));
        } else {
            path.push(segment);
        }
    }
    path
}

/// Composes the path and creates the whole directory chain
///
/// Calling it again for an existing chain is a no-op. Any failure other than
/// "already exists as a directory" is returned to the caller.
///
/// # Examples
///
/// ```
/// use hub_exporter::core::naming::build_path;
///
/// let base = tempfile::tempdir().unwrap();
/// let path = build_path(base.path(), &["Hub Personal", "Project Widgets"]).unwrap();
/// assert!(path.is_dir());
/// assert_eq!(build_path(base.path(), &["Hub Personal", "Project Widgets"]).unwrap(), path);
/// ```
pub fn build_path<S: AsRef<str>>(base: impl AsRef<Path>, segments: &[S]) -> io::Result<PathBuf> {
    let path = compose_path(base, segments);
    fs::create_dir_all(&path)?;
    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", path.display()),
        ));
    }
    Ok(path)
}

/// Appends `.extension` to the final component of `base`
///
/// Unlike [`Path::with_extension`] this never replaces an existing dot suffix,
/// so `Bracket v2` and `x.y` both keep their full names.
pub fn with_suffix(base: &Path, extension: &str) -> PathBuf {
    let mut raw = base.as_os_str().to_os_string();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose_path("/out", &["Hub H", "Project P", "Folder", "Part.f3d"]);
        let b = compose_path("/out", &["Hub H", "Project P", "Folder", "Part.f3d"]);
        assert_eq!(a, b);
        assert_eq!(a, PathBuf::from("/out/Hub H/Project P/Folder/Part.f3d"));
    }

    #[test]
    fn test_compose_skips_empty_segments() {
        let path = compose_path("/out", &["Hub H", "", "Part"]);
        assert_eq!(path, PathBuf::from("/out/Hub H/Part"));
    }

    #[test]
    fn test_compose_never_climbs_above_base() {
        let path = compose_path("/out", &["Hub H", "..", ".", "...", "Part"]);
        assert_eq!(path, PathBuf::from("/out/Hub H/__/_/___/Part"));
        assert!(path.components().all(|c| c != std::path::Component::ParentDir));
    }

    #[test]
    fn test_compose_keeps_inner_periods() {
        let path = compose_path("/out", &["v1..2", ".hidden"]);
        assert_eq!(path, PathBuf::from("/out/v1..2/.hidden"));
    }

    #[test]
    fn test_build_path_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let first = build_path(temp.path(), &["a", "b", "c"]).unwrap();
        let second = build_path(temp.path(), &["a", "b", "c"]).unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_build_path_fails_when_a_file_blocks_the_chain() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("blocker"), b"x").unwrap();

        let result = build_path(temp.path(), &["blocker", "child"]);
        assert!(result.is_err());

        let result = build_path(temp.path(), &["blocker"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_suffix_keeps_dots() {
        assert_eq!(
            with_suffix(Path::new("/out/x.y"), "stp"),
            PathBuf::from("/out/x.y.stp")
        );
        assert_eq!(
            with_suffix(Path::new("/out/Bracket v2"), "stl"),
            PathBuf::from("/out/Bracket v2.stl")
        );
    }
}

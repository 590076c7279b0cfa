//! Conversion of hierarchy names into filesystem-safe path segments

use regex::Regex;
use std::sync::OnceLock;

/// Extensions the exporter writes for component geometry
const RESERVED_EXTENSIONS: [&str; 3] = [".stp", ".stl", ".igs"];

fn disallowed_characters() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9 \n\.]").expect("static pattern is valid"))
}

/// Replaces every character outside `[a-zA-Z0-9 \n.]` with a space and trims
/// surrounding whitespace.
///
/// The result only contains allowed characters and applying the function again
/// returns the same string.
///
/// # Examples
///
/// ```
/// use hub_exporter::core::naming::clean_characters;
///
/// assert_eq!(clean_characters("  Gear/Box: v1 "), "Gear Box  v1");
/// assert_eq!(clean_characters("***"), "");
/// ```
pub fn clean_characters(raw: &str) -> String {
    disallowed_characters()
        .replace_all(raw, " ")
        .trim()
        .to_string()
}

/// Inserts an underscore before a trailing reserved extension token
///
/// A component named `Part.stp` would otherwise collide with the `.stp`
/// artifact generated for a component named `Part`.
///
/// # Examples
///
/// ```
/// use hub_exporter::core::naming::guard_extension;
///
/// assert_eq!(guard_extension("Bracket v2.stp"), "Bracket v2_stp");
/// assert_eq!(guard_extension("Bracket v2"), "Bracket v2");
/// ```
pub fn guard_extension(name: &str) -> String {
    if RESERVED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        // Reserved tokens are ASCII, so the split lands on a char boundary.
        let (stem, ext) = name.split_at(name.len() - 3);
        format!("{}_{}", &stem[..stem.len() - 1], ext)
    } else {
        name.to_string()
    }
}

/// Sanitizes an entity name into a path segment
///
/// Total for every input, including the empty string.
///
/// # Examples
///
/// ```
/// use hub_exporter::core::naming::sanitize;
///
/// assert_eq!(sanitize("Bracket v2.stp"), "Bracket v2_stp");
/// assert_eq!(sanitize("Bracket v2"), "Bracket v2");
/// assert_eq!(sanitize(""), "");
/// ```
pub fn sanitize(raw: &str) -> String {
    guard_extension(&clean_characters(raw))
}

/// Sanitizes `raw`, falling back to `fallback` when nothing is left
///
/// An empty segment would place an artifact next to its directory instead of
/// inside it.
///
/// # Examples
///
/// ```
/// use hub_exporter::core::naming::sanitize_or;
///
/// assert_eq!(sanitize_or("???", || "Sketch 2".to_string()), "Sketch 2");
/// assert_eq!(sanitize_or("Profile", || "Sketch 2".to_string()), "Profile");
/// ```
pub fn sanitize_or(raw: &str, fallback: impl FnOnce() -> String) -> String {
    let name = sanitize(raw);
    if name.is_empty() {
        fallback()
    } else {
        name
    }
}

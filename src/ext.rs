//! Extension tokens: extraction from filenames and the one case-insensitive
//! equality used by register, remove and dispatch.

/// Extension of `filename`: text after the last `.` of the final path
/// component.
///
/// Returns None for "no dot", a trailing dot (`"img."`) and dot-files without
/// another dot (`".hidden"`).
pub fn extract_extension(filename: &str) -> Option<&str> {
    let name = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// Normalized form of an extension token (Unicode lowercase).
pub fn normalize_ext(ext: &str) -> String {
    ext.to_lowercase()
}

/// Case-insensitive equality of two extension tokens.
pub fn ext_eq(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.to_lowercase() == b.to_lowercase()
}

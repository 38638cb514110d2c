//! Entry name folding, suffix extraction and relative path handling

use crate::error::{ScanError, TreeError};
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Fold an entry name for case-insensitive comparison.
///
/// Names are normalized to NFC before lowercasing so that composed and
/// decomposed spellings of the same name compare equal.
pub fn fold_name(name: &str) -> String {
    name.nfc().collect::<String>().to_lowercase()
}

/// Compare two entry names case-insensitively.
pub fn names_equal(a: &str, b: &str) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }
    fold_name(a) == fold_name(b)
}

/// Text after the last `.` of a name, or an empty string when there is none.
pub fn suffix(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => "",
    }
}

/// Case-insensitive suffix test against a list of suffixes (without the dot).
pub fn has_suffix_in<S: AsRef<str>>(name: &str, suffixes: &[S]) -> bool {
    let ext = suffix(name);
    !ext.is_empty() && suffixes.iter().any(|s| names_equal(ext, s.as_ref()))
}

/// Validate a single entry name.
pub fn validate_name(name: &str) -> Result<(), TreeError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(TreeError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Split a relative archive path into its components.
///
/// Both `/` and `\` separate components; empty and `.` components are skipped.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\'])
        .filter(|component| !component.is_empty() && *component != ".")
}

/// Canonicalize the root of a scan so relative paths are computed consistently.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, ScanError> {
    dunce::canonicalize(path)
        .map_err(|e| ScanError::InvalidPath(format!("Failed to canonicalize {:?}: {}", path, e)))
}

//! Resolving a candidate against the active document.
//!
//! Like `std::path::absolute`, except relative names are anchored at the directory of the
//! document being edited rather than the process working directory.

use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Turn a document location as reported by a host into a filesystem path.
///
/// Hosts usually report a plain path, but some hand back a `file://` URI.
pub fn document_path(location: &str) -> &Path {
    Path::new(location.strip_prefix(FILE_SCHEME).unwrap_or(location))
}

/// Resolve `path` relative to the directory containing `document`.
///
/// Absolute paths come back unchanged, as does everything when there is no document.
pub fn resolve_relative_to(document: Option<&str>, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }

    match document {
        Some(location) => {
            let base = document_path(location)
                .parent()
                .unwrap_or_else(|| Path::new(""));
            base.join(candidate)
        }
        None => candidate.to_path_buf(),
    }
}

//! Read-only filesystem checks applied to path-valued launch options.

use std::path::{Path, PathBuf};

use crate::lib::errors::ArgumentError;

/// Convert a raw option value into a path that must exist right now.
///
/// The path is kept exactly as given (no canonicalization); only its presence
/// is checked. Nothing is created or modified.
pub fn existing_path(raw: &str) -> Result<PathBuf, ArgumentError> {
    let path = PathBuf::from(raw);
    if !path_exists(&path) {
        return Err(ArgumentError::FileNotFound { path });
    }
    Ok(path)
}

/// Unreadable metadata (permissions, broken symlinks) counts as missing.
fn path_exists(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.try_exists().unwrap_or(false)
}

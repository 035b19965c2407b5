//! File system utilities for bundling.

use crate::error::BundleError;
use std::{io, path::Path};

/// Copies a regular file over `to`, replacing any existing copy.
///
/// The destination directory must already exist.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), BundleError> {
    if !from.is_file() {
        return Err(BundleError::MissingSourceFile {
            path: from.to_path_buf(),
        });
    }
    std::fs::copy(from, to).map_err(|source| BundleError::CopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Creates the parent directory of `path` and any missing ancestors.
pub fn create_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

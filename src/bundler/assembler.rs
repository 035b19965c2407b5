//! Release bundle assembly.
//!
//! Copies the license and readme into the build output directory so the
//! directory holds everything the archive should contain.

use crate::bundler::utils::fs::copy_file;
use crate::error::BundleError;
use std::path::{Path, PathBuf};

/// Copy `license_path` and `readme_path` into `output_dir` under their own names.
///
/// Every precondition is checked before the first copy, so a missing file never
/// leaves a half-assembled bundle behind. Existing copies are overwritten, which
/// makes repeated runs converge on the same contents.
pub fn assemble_bundle(
    output_dir: &Path,
    license_path: &Path,
    readme_path: &Path,
) -> Result<(), BundleError> {
    // A build that reported success without output outranks any other fault
    if !output_dir.is_dir() {
        return Err(BundleError::OutputDirectoryMissing {
            path: output_dir.to_path_buf(),
        });
    }

    let sources = [license_path, readme_path];
    if let Some(missing) = sources.iter().find(|path| !path.is_file()) {
        return Err(BundleError::MissingSourceFile {
            path: missing.to_path_buf(),
        });
    }

    for source in sources {
        let destination = bundle_destination(output_dir, source)?;
        copy_file(source, &destination)?;
        log::debug!(
            "Copied {} -> {}",
            source.display(),
            destination.display()
        );
    }

    Ok(())
}

fn bundle_destination(output_dir: &Path, source: &Path) -> Result<PathBuf, BundleError> {
    source
        .file_name()
        .map(|name| output_dir.join(name))
        .ok_or_else(|| BundleError::MissingSourceFile {
            path: source.to_path_buf(),
        })
}

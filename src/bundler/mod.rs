//! Release bundle assembly and archiving.
//!
//! A release bundle is the build output directory plus copies of the license
//! and readme. Once assembled, the bundle directory is packed into a single
//! archive named after the release version:
//!
//! ```no_run
//! use repraxis_bundler_release::bundler::{assemble_bundle, write_archive, ArchiveFormat};
//! use std::path::Path;
//!
//! # fn example() -> repraxis_bundler_release::Result<()> {
//! let bundle = Path::new("dist/RePraxis");
//! assemble_bundle(bundle, Path::new("LICENSE.md"), Path::new("README.md"))?;
//! let archive = write_archive(bundle, Path::new("dist/RePraxis_1.0.0"), ArchiveFormat::Zip)?;
//! assert_eq!(archive, Path::new("dist/RePraxis_1.0.0.zip"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod archive;
mod assembler;
mod checksum;
mod error;
pub(crate) mod utils;

// Public re-exports
pub use archive::{ArchiveFormat, write_archive};
pub use assembler::assemble_bundle;
pub use checksum::calculate_sha256;
pub use error::{ArchiveWriteError, ErrorExt, Result};

use std::path::PathBuf;

/// The archive produced by a release run.
///
/// # Fields
///
/// - `path`: Location of the archive
/// - `version`: Version the archive is named after
/// - `size`: Archive size in bytes
/// - `checksum`: SHA-256 checksum, for publishing alongside the archive
#[derive(Debug, Clone)]
pub struct ReleaseArtifact {
    /// Location of the archive (`<releases-dir>/<name>_<version>.<ext>`).
    pub path: PathBuf,

    /// Version read from the project manifest.
    pub version: String,

    /// Archive format.
    pub format: ArchiveFormat,

    /// Size of the archive in bytes.
    pub size: u64,

    /// Hex-encoded SHA-256 checksum of the archive.
    pub checksum: String,
}

impl ReleaseArtifact {
    /// Describe a finished archive, reading its size and checksum from disk.
    pub fn from_archive(path: PathBuf, version: String, format: ArchiveFormat) -> Result<Self> {
        let size = std::fs::metadata(&path)
            .fs_context("reading archive metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path)?;

        Ok(Self {
            path,
            version,
            format,
            size,
            checksum,
        })
    }
}

//! Error types for archive creation.
//!
//! Every failure while packaging the bundle is an [`ArchiveWriteError`]. I/O
//! failures carry the operation and the path involved; use the [`ErrorExt`]
//! trait to attach them:
//!
//! ```no_run
//! use repraxis_bundler_release::bundler::{ArchiveWriteError, ErrorExt};
//! use std::path::Path;
//!
//! fn open(path: &Path) -> Result<std::fs::File, ArchiveWriteError> {
//!     std::fs::File::open(path).fs_context("opening bundle file", path)
//! }
//! ```

use std::{
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned while writing a release archive.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum ArchiveWriteError {
    /// File system error with path context.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Operation being performed (e.g., "reading bundle file")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Source directory to archive does not exist or is not a directory.
    #[error("archive source {0} is not a directory")]
    SourceNotDirectory(PathBuf),

    /// Error walking the source directory (e.g., it vanished mid-write).
    #[error("{0}")]
    Walkdir(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripPrefix(#[from] path::StripPrefixError),

    /// ZIP archive creation error.
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    /// Moving the finished archive into place failed.
    #[error("failed to move archive into place at {path}: {error}")]
    Persist {
        /// Final archive path
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Bundle file name that cannot be stored in an archive.
    #[error("path {0} is not valid UTF-8")]
    NonUtf8Path(PathBuf),
}

/// Convenient type alias of Result type for archive writing.
pub type Result<T> = std::result::Result<T, ArchiveWriteError>;

/// Attach the failing operation and path to an I/O error.
pub trait ErrorExt<T> {
    /// Wrap the error as [`ArchiveWriteError::Fs`].
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| ArchiveWriteError::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

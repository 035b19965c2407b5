//! Error types for release bundling operations.
//!
//! Each pipeline stage has its own error enum; [`ReleaseError`] aggregates them
//! and knows which stage a fault belongs to and how an operator can fix it.

use std::path::PathBuf;
use thiserror::Error;

pub use crate::bundler::ArchiveWriteError;
use crate::release::ReleaseStage;

/// Result type alias for release bundling operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release bundling operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Project manifest errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Build toolchain errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Bundle assembly errors
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    /// Archive creation errors
    #[error("Archive write error: {0}")]
    Archive(#[from] ArchiveWriteError),

    /// Settings errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),
}

/// Errors reading the release version out of the project manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest missing, unreadable or not well-formed XML
    #[error("Failed to parse manifest {path}: {reason}")]
    Parse {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// No `<Version>` element anywhere in the document
    #[error("Could not find <Version> element in {path}")]
    VersionNotFound {
        /// Manifest path
        path: PathBuf,
    },

    /// `<Version>` element present without text
    #[error("<Version> element in {path} has no text content")]
    VersionEmpty {
        /// Manifest path
        path: PathBuf,
    },

    /// Version text that cannot be used in an archive file name
    #[error("Version '{version}' in {path} contains a path separator")]
    UnusableVersion {
        /// Manifest path
        path: PathBuf,
        /// Offending version string
        version: String,
    },
}

/// Build toolchain errors
///
/// A build that runs and fails is not an error; see [`crate::build::BuildResult`].
#[derive(Error, Debug)]
pub enum BuildError {
    /// The toolchain could not be started at all
    #[error("Build toolchain '{program}' is unavailable: {reason}")]
    ToolchainUnavailable {
        /// Program that was looked up
        program: String,
        /// Reason for the error
        reason: String,
    },
}

/// Bundle assembly errors
#[derive(Error, Debug)]
pub enum BundleError {
    /// License or readme missing from the repository root
    #[error("Required file not found: {path}")]
    MissingSourceFile {
        /// Expected source path
        path: PathBuf,
    },

    /// Build reported success but produced no output directory
    #[error("Build output directory {path} does not exist although the build reported success")]
    OutputDirectoryMissing {
        /// Expected output directory
        path: PathBuf,
    },

    /// Copying a metadata file failed
    #[error("Failed to copy {from} to {to}: {source}")]
    CopyFailed {
        /// Source file
        from: PathBuf,
        /// Destination file
        to: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Settings errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings that cannot produce a sane release
    #[error("Invalid settings: {reason}")]
    InvalidSettings {
        /// Reason for the error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Pipeline stage this error aborted
    pub fn stage(&self) -> ReleaseStage {
        match self {
            ReleaseError::Build(_) => ReleaseStage::Building,
            ReleaseError::Bundle(_) => ReleaseStage::Assembling,
            ReleaseError::Manifest(_) => ReleaseStage::VersionRead,
            ReleaseError::Archive(_) => ReleaseStage::Archiving,
            ReleaseError::Config(_) | ReleaseError::Cli(_) => ReleaseStage::Start,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Build(BuildError::ToolchainUnavailable { program, .. }) => vec![
                format!("Install '{program}' and make sure it is on PATH"),
                "Verify the toolchain runs from this shell: dotnet --info".to_string(),
            ],
            ReleaseError::Bundle(BundleError::OutputDirectoryMissing { path }) => vec![
                format!(
                    "The build claimed success but {} was not produced; inspect the build log",
                    path.display()
                ),
                "Check the project's output path settings against the expected layout"
                    .to_string(),
            ],
            ReleaseError::Bundle(BundleError::MissingSourceFile { path }) => vec![format!(
                "Restore {} at the repository root and rerun",
                path.display()
            )],
            ReleaseError::Manifest(ManifestError::VersionNotFound { path }) => vec![format!(
                "Add a <Version>x.y.z</Version> element to {}",
                path.display()
            )],
            ReleaseError::Manifest(ManifestError::VersionEmpty { path }) => vec![format!(
                "Fill in the empty <Version> element in {}",
                path.display()
            )],
            ReleaseError::Manifest(ManifestError::UnusableVersion { path, version }) => vec![
                format!(
                    "Replace '{}' in {} with a version free of '/' and '\\'",
                    version,
                    path.display()
                ),
                "The version becomes part of the archive file name".to_string(),
            ],
            ReleaseError::Manifest(ManifestError::Parse { path, .. }) => vec![
                format!("Check that {} exists and is well-formed XML", path.display()),
                "Run with --root to point at the repository root".to_string(),
            ],
            ReleaseError::Archive(_) => vec![
                "Check free disk space and write permissions on the releases directory"
                    .to_string(),
                "Rerun the release; the archive is rewritten from scratch".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

//! Command line argument parsing and validation.
//!
//! Every flag is optional: running the bare command releases the project in
//! the current directory using the conventional layout.

use crate::bundler::ArchiveFormat;
use crate::error::{CliError, Result};
use crate::settings::{DEFAULT_ARTIFACT_NAME, Settings, SettingsBuilder};
use clap::Parser;
use std::path::PathBuf;

/// Build the project and package a versioned release archive
#[derive(Parser, Debug)]
#[command(
    name = "repraxis_bundler_release",
    version,
    about = "Build the project and package a versioned release archive",
    long_about = "Build the project in release mode, copy LICENSE.md and README.md into the
build output, and pack it as dist/<name>_<version>.zip.

The version is read from the <Version> element of src/<name>/<name>.csproj.
Nothing is packaged when the build fails.

Usage:
  repraxis_bundler_release
  repraxis_bundler_release --root /path/to/repo
  repraxis_bundler_release --format tar.gz"
)]
pub struct Args {
    /// Repository root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Artifact base name; also locates src/<NAME>/<NAME>.csproj and dist/<NAME>
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ARTIFACT_NAME)]
    pub name: String,

    /// Archive format: zip or tar.gz
    #[arg(long, value_name = "FORMAT", default_value = "zip")]
    pub format: ArchiveFormat,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the run settings these arguments describe
    pub fn settings(&self) -> Result<Settings> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(|e| CliError::InvalidArguments {
                reason: format!("Cannot determine current directory: {}", e),
            })?,
        };

        SettingsBuilder::new(root)
            .artifact_name(self.name.clone())
            .archive_format(self.format)
            .build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}

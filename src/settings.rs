//! Immutable run configuration.
//!
//! [`Settings`] is built once at startup and handed by reference to every
//! pipeline component. All paths are absolute or rooted at the project root;
//! nothing is read from global state after construction.

use crate::build::ToolchainCommand;
use crate::bundler::ArchiveFormat;
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// Artifact base name used when none is given
pub const DEFAULT_ARTIFACT_NAME: &str = "RePraxis";

/// License file copied into every bundle
pub const LICENSE_FILE: &str = "LICENSE.md";

/// Readme file copied into every bundle
pub const README_FILE: &str = "README.md";

/// Directory (relative to the project root) holding build output and archives
pub const DIST_DIR: &str = "dist";

/// Configuration for a single release run.
#[derive(Debug, Clone)]
pub struct Settings {
    project_root: PathBuf,
    artifact_name: String,
    manifest_path: PathBuf,
    license_path: PathBuf,
    readme_path: PathBuf,
    build_output_dir: PathBuf,
    releases_dir: PathBuf,
    archive_format: ArchiveFormat,
    toolchain: ToolchainCommand,
}

impl Settings {
    /// Settings for the conventional layout rooted at `project_root`.
    pub fn for_project<P: AsRef<Path>>(project_root: P) -> Result<Self> {
        SettingsBuilder::new(project_root).build()
    }

    /// Repository root; also the toolchain's working directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Base name of the release archive.
    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    /// Project manifest declaring `<Version>`.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// License file at the repository root.
    pub fn license_path(&self) -> &Path {
        &self.license_path
    }

    /// Readme file at the repository root.
    pub fn readme_path(&self) -> &Path {
        &self.readme_path
    }

    /// Directory the toolchain writes compiled output to.
    pub fn build_output_dir(&self) -> &Path {
        &self.build_output_dir
    }

    /// Directory release archives are written to.
    pub fn releases_dir(&self) -> &Path {
        &self.releases_dir
    }

    /// Archive format of the release artifact.
    pub fn archive_format(&self) -> ArchiveFormat {
        self.archive_format
    }

    /// External build command.
    pub fn toolchain(&self) -> &ToolchainCommand {
        &self.toolchain
    }

    /// `<releases-dir>/<artifact-name>_<version>`, without extension.
    pub fn archive_base_path(&self, version: &str) -> PathBuf {
        self.releases_dir
            .join(format!("{}_{}", self.artifact_name, version))
    }
}

/// Builder for [`Settings`].
///
/// Unset paths fall back to the conventional layout for the artifact name:
/// `src/<name>/<name>.csproj`, `LICENSE.md`, `README.md`, `dist/<name>` and `dist`.
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    project_root: PathBuf,
    artifact_name: Option<String>,
    manifest_path: Option<PathBuf>,
    license_path: Option<PathBuf>,
    readme_path: Option<PathBuf>,
    build_output_dir: Option<PathBuf>,
    releases_dir: Option<PathBuf>,
    archive_format: ArchiveFormat,
    toolchain: Option<ToolchainCommand>,
}

impl SettingsBuilder {
    /// Creates a builder rooted at `project_root`.
    pub fn new<P: AsRef<Path>>(project_root: P) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            artifact_name: None,
            manifest_path: None,
            license_path: None,
            readme_path: None,
            build_output_dir: None,
            releases_dir: None,
            archive_format: ArchiveFormat::default(),
            toolchain: None,
        }
    }

    /// Sets the artifact base name.
    pub fn artifact_name<S: Into<String>>(mut self, name: S) -> Self {
        self.artifact_name = Some(name.into());
        self
    }

    /// Sets the project manifest path.
    pub fn manifest_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.manifest_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the license file path.
    pub fn license_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.license_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the readme file path.
    pub fn readme_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.readme_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the build output directory.
    pub fn build_output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the releases directory.
    pub fn releases_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.releases_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the archive format.
    pub fn archive_format(mut self, format: ArchiveFormat) -> Self {
        self.archive_format = format;
        self
    }

    /// Sets the external build command.
    pub fn toolchain(mut self, toolchain: ToolchainCommand) -> Self {
        self.toolchain = Some(toolchain);
        self
    }

    /// Validates and freezes the settings.
    pub fn build(self) -> Result<Settings> {
        let root = self.project_root;
        let name = self
            .artifact_name
            .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string());

        if name.trim().is_empty() {
            return Err(invalid("artifact name must not be empty"));
        }
        if name.contains(['/', '\\']) {
            return Err(invalid(format!(
                "artifact name '{name}' must not contain a path separator"
            )));
        }

        let resolve = |path: Option<PathBuf>, default: PathBuf| root.join(path.unwrap_or(default));

        let manifest_path = resolve(
            self.manifest_path,
            Path::new("src").join(&name).join(format!("{name}.csproj")),
        );
        let license_path = resolve(self.license_path, PathBuf::from(LICENSE_FILE));
        let readme_path = resolve(self.readme_path, PathBuf::from(README_FILE));
        let build_output_dir = resolve(self.build_output_dir, Path::new(DIST_DIR).join(&name));
        let releases_dir = resolve(self.releases_dir, PathBuf::from(DIST_DIR));

        if releases_dir.starts_with(&build_output_dir) {
            return Err(invalid(format!(
                "releases directory {} lies inside the build output directory {}",
                releases_dir.display(),
                build_output_dir.display()
            )));
        }

        let toolchain = self.toolchain.unwrap_or_default();
        if toolchain.program.trim().is_empty() {
            return Err(invalid("toolchain program must not be empty"));
        }

        Ok(Settings {
            project_root: root,
            artifact_name: name,
            manifest_path,
            license_path,
            readme_path,
            build_output_dir,
            releases_dir,
            archive_format: self.archive_format,
            toolchain,
        })
    }
}

fn invalid(reason: impl Into<String>) -> crate::error::ReleaseError {
    ConfigError::InvalidSettings {
        reason: reason.into(),
    }
    .into()
}

//! Release pipeline orchestration.
//!
//! One run walks a fixed sequence of stages:
//!
//! ```text
//! Start -> Building -> BuildFailed
//!                   -> Assembling -> VersionRead -> Archiving -> Done
//! ```
//!
//! A failed build ends the run before anything is copied or archived. Any
//! error in a later stage halts the run immediately; the archive is only
//! written once the bundle is complete and the version is known.

use crate::build::{BuildInvoker, BuildResult};
use crate::bundler::{ReleaseArtifact, assemble_bundle, write_archive};
use crate::error::Result;
use crate::metadata::read_version;
use crate::settings::Settings;

/// Stage of a release run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStage {
    /// Nothing has run yet
    Start,
    /// External toolchain is running
    Building,
    /// Toolchain reported failure (terminal)
    BuildFailed,
    /// Copying license and readme into the build output
    Assembling,
    /// Reading the version from the project manifest
    VersionRead,
    /// Writing the release archive
    Archiving,
    /// Archive written (terminal)
    Done,
}

impl std::fmt::Display for ReleaseStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReleaseStage::Start => "start",
            ReleaseStage::Building => "build",
            ReleaseStage::BuildFailed => "build failed",
            ReleaseStage::Assembling => "bundle assembly",
            ReleaseStage::VersionRead => "version read",
            ReleaseStage::Archiving => "archiving",
            ReleaseStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// How a run that did not hit a fatal error ended
#[derive(Debug, Clone)]
pub enum ReleaseOutcome {
    /// Archive produced
    Released(ReleaseArtifact),
    /// Toolchain failed; nothing was assembled or archived
    BuildFailed(BuildResult),
}

impl ReleaseOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseOutcome::Released(_) => 0,
            ReleaseOutcome::BuildFailed(_) => 1,
        }
    }
}

/// Sequences build, assembly, version discovery and archiving for one release.
pub struct ReleaseOrchestrator<'a> {
    settings: &'a Settings,
    builder: &'a dyn BuildInvoker,
    stage: ReleaseStage,
}

impl<'a> ReleaseOrchestrator<'a> {
    /// Create an orchestrator that builds with `builder`
    pub fn new(settings: &'a Settings, builder: &'a dyn BuildInvoker) -> Self {
        Self {
            settings,
            builder,
            stage: ReleaseStage::Start,
        }
    }

    /// Current stage; after an error, the stage that failed
    pub fn stage(&self) -> ReleaseStage {
        self.stage
    }

    fn enter(&mut self, stage: ReleaseStage) {
        log::debug!("Release stage: {} -> {}", self.stage, stage);
        self.stage = stage;
    }

    /// Run the release pipeline once.
    pub fn run(&mut self) -> Result<ReleaseOutcome> {
        let settings = self.settings;

        self.enter(ReleaseStage::Building);
        let build = self.builder.run_release_build()?;
        if !build.is_success() {
            self.enter(ReleaseStage::BuildFailed);
            log::debug!(
                "Build failed, skipping bundling: {}",
                build.diagnostic.as_deref().unwrap_or("no diagnostic")
            );
            return Ok(ReleaseOutcome::BuildFailed(build));
        }

        self.enter(ReleaseStage::Assembling);
        assemble_bundle(
            settings.build_output_dir(),
            settings.license_path(),
            settings.readme_path(),
        )?;

        self.enter(ReleaseStage::VersionRead);
        let version = read_version(settings.manifest_path())?;
        log::info!("Release version: {}", version);

        self.enter(ReleaseStage::Archiving);
        let archive_path = write_archive(
            settings.build_output_dir(),
            &settings.archive_base_path(&version),
            settings.archive_format(),
        )?;
        let artifact =
            ReleaseArtifact::from_archive(archive_path, version, settings.archive_format())?;

        self.enter(ReleaseStage::Done);
        Ok(ReleaseOutcome::Released(artifact))
    }
}

/// Build, bundle and archive the project described by `settings` with the real toolchain.
pub fn run_release(settings: &Settings) -> Result<ReleaseOutcome> {
    let toolchain = crate::build::ProcessToolchain::from_settings(settings);
    ReleaseOrchestrator::new(settings, &toolchain).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BuildStatus;
    use crate::error::{BuildError, ReleaseError};
    use std::cell::Cell;
    use tempfile::TempDir;

    struct FixedBuild {
        result: BuildResult,
        calls: Cell<usize>,
    }

    impl FixedBuild {
        fn new(result: BuildResult) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl BuildInvoker for FixedBuild {
        fn run_release_build(&self) -> std::result::Result<BuildResult, BuildError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.result.clone())
        }
    }

    struct MissingToolchain;

    impl BuildInvoker for MissingToolchain {
        fn run_release_build(&self) -> std::result::Result<BuildResult, BuildError> {
            Err(BuildError::ToolchainUnavailable {
                program: "dotnet".to_string(),
                reason: "not found".to_string(),
            })
        }
    }

    fn project() -> (TempDir, Settings) {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("LICENSE.md"), "license").unwrap();
        std::fs::write(root.path().join("README.md"), "readme").unwrap();
        std::fs::create_dir_all(root.path().join("src/RePraxis")).unwrap();
        std::fs::write(
            root.path().join("src/RePraxis/RePraxis.csproj"),
            "<Project><PropertyGroup><Version>1.2.0</Version></PropertyGroup></Project>",
        )
        .unwrap();
        std::fs::create_dir_all(root.path().join("dist/RePraxis")).unwrap();
        std::fs::write(root.path().join("dist/RePraxis/RePraxis.dll"), "dll").unwrap();

        let settings = Settings::for_project(root.path()).unwrap();
        (root, settings)
    }

    #[test]
    fn test_successful_run_reaches_done() {
        let (root, settings) = project();
        let build = FixedBuild::new(BuildResult::success());
        let mut orchestrator = ReleaseOrchestrator::new(&settings, &build);

        let outcome = orchestrator.run().unwrap();

        assert_eq!(orchestrator.stage(), ReleaseStage::Done);
        assert_eq!(outcome.exit_code(), 0);
        let ReleaseOutcome::Released(artifact) = outcome else {
            panic!("expected a release");
        };
        assert_eq!(artifact.path, root.path().join("dist/RePraxis_1.2.0.zip"));
        assert_eq!(artifact.version, "1.2.0");
        assert_eq!(artifact.checksum.len(), 64);
        assert!(artifact.size > 0);
        assert_eq!(build.calls.get(), 1);
    }

    #[test]
    fn test_failed_build_stops_before_assembly() {
        let (root, settings) = project();
        let build = FixedBuild::new(BuildResult::failure(Some(1), "exited with code 1"));
        let mut orchestrator = ReleaseOrchestrator::new(&settings, &build);

        let outcome = orchestrator.run().unwrap();

        assert_eq!(orchestrator.stage(), ReleaseStage::BuildFailed);
        assert_eq!(outcome.exit_code(), 1);
        assert!(matches!(
            outcome,
            ReleaseOutcome::BuildFailed(BuildResult { status: BuildStatus::Failure, .. })
        ));
        assert!(!root.path().join("dist/RePraxis/LICENSE.md").exists());
        assert!(!root.path().join("dist/RePraxis_1.2.0.zip").exists());
    }

    #[test]
    fn test_unavailable_toolchain_is_fatal_in_build_stage() {
        let (_root, settings) = project();
        let mut orchestrator = ReleaseOrchestrator::new(&settings, &MissingToolchain);

        let err = orchestrator.run().unwrap_err();

        assert_eq!(orchestrator.stage(), ReleaseStage::Building);
        assert_eq!(err.stage(), ReleaseStage::Building);
    }

    #[test]
    fn test_version_error_halts_before_archiving() {
        let (root, settings) = project();
        std::fs::write(
            root.path().join("src/RePraxis/RePraxis.csproj"),
            "<Project><Version/></Project>",
        )
        .unwrap();
        let build = FixedBuild::new(BuildResult::success());
        let mut orchestrator = ReleaseOrchestrator::new(&settings, &build);

        let err = orchestrator.run().unwrap_err();

        assert_eq!(orchestrator.stage(), ReleaseStage::VersionRead);
        assert!(matches!(err, ReleaseError::Manifest(_)));
        let archives = std::fs::read_dir(root.path().join("dist"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .count();
        assert_eq!(archives, 0);
    }
}

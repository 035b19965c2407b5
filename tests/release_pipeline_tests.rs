//! End-to-end pipeline tests with a simulated build toolchain.

use repraxis_bundler_release::bundler::ArchiveFormat;
use repraxis_bundler_release::error::{BuildError, BundleError, ReleaseError};
use repraxis_bundler_release::{
    BuildInvoker, BuildResult, ReleaseOrchestrator, ReleaseOutcome, ReleaseStage, Settings,
    SettingsBuilder,
};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Simulated toolchain: optionally writes build output, then exits with a fixed code.
struct SimulatedBuild {
    output_dir: Option<PathBuf>,
    exit_code: i32,
}

impl BuildInvoker for SimulatedBuild {
    fn run_release_build(&self) -> Result<BuildResult, BuildError> {
        if let Some(dir) = &self.output_dir {
            std::fs::create_dir_all(dir.join("lib")).unwrap();
            std::fs::write(dir.join("RePraxis.dll"), b"assembly").unwrap();
            std::fs::write(dir.join("RePraxis.xml"), b"<doc/>").unwrap();
            std::fs::write(dir.join("lib/dep.dll"), b"dependency").unwrap();
        }
        if self.exit_code == 0 {
            Ok(BuildResult::success())
        } else {
            Ok(BuildResult::failure(
                Some(self.exit_code),
                format!("exited with code {}", self.exit_code),
            ))
        }
    }
}

struct Project {
    root: TempDir,
}

impl Project {
    fn new(version: &str) -> Self {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("LICENSE.md"), "MIT License").unwrap();
        std::fs::write(root.path().join("README.md"), "# Re:Praxis").unwrap();
        std::fs::create_dir_all(root.path().join("src/RePraxis")).unwrap();
        std::fs::write(
            root.path().join("src/RePraxis/RePraxis.csproj"),
            format!(
                r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>netstandard2.1</TargetFramework>
    <PackageId>RePraxis</PackageId>
    <Version>{version}</Version>
  </PropertyGroup>
</Project>"#
            ),
        )
        .unwrap();
        Self { root }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    fn settings(&self) -> Settings {
        Settings::for_project(self.root.path()).unwrap()
    }

    fn build(&self, exit_code: i32) -> SimulatedBuild {
        SimulatedBuild {
            output_dir: Some(self.path("dist/RePraxis")),
            exit_code,
        }
    }
}

fn zip_entries(path: &Path) -> BTreeSet<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn archives_in(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn successful_build_produces_named_archive_with_full_bundle() {
    let project = Project::new("1.3.0");
    let settings = project.settings();
    let build = project.build(0);

    let outcome = ReleaseOrchestrator::new(&settings, &build).run().unwrap();

    let ReleaseOutcome::Released(artifact) = outcome else {
        panic!("expected an archive");
    };
    assert_eq!(artifact.path, project.path("dist/RePraxis_1.3.0.zip"));
    assert!(artifact.path.is_file());

    let entries = zip_entries(&artifact.path);
    for expected in [
        "RePraxis/LICENSE.md",
        "RePraxis/README.md",
        "RePraxis/RePraxis.dll",
        "RePraxis/RePraxis.xml",
        "RePraxis/lib/dep.dll",
    ] {
        assert!(entries.contains(expected), "missing {expected} in {entries:?}");
    }
}

#[test]
fn failing_build_exits_non_zero_and_leaves_archives_untouched() {
    let project = Project::new("1.3.0");
    let settings = project.settings();
    std::fs::create_dir_all(project.path("dist")).unwrap();
    std::fs::write(project.path("dist/RePraxis_1.3.0.zip"), b"previous release").unwrap();

    let build = project.build(1);
    let mut orchestrator = ReleaseOrchestrator::new(&settings, &build);
    let outcome = orchestrator.run().unwrap();

    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(orchestrator.stage(), ReleaseStage::BuildFailed);
    let ReleaseOutcome::BuildFailed(result) = outcome else {
        panic!("expected build failure");
    };
    assert_eq!(result.exit_code, Some(1));
    assert_eq!(
        std::fs::read(project.path("dist/RePraxis_1.3.0.zip")).unwrap(),
        b"previous release"
    );
    assert!(!project.path("dist/RePraxis/LICENSE.md").exists());
}

#[test]
fn failing_build_creates_no_archive() {
    let project = Project::new("2.0.0");
    let settings = project.settings();
    let build = SimulatedBuild {
        output_dir: None,
        exit_code: 1,
    };

    let outcome = ReleaseOrchestrator::new(&settings, &build).run().unwrap();

    assert!(matches!(outcome, ReleaseOutcome::BuildFailed(_)));
    assert!(archives_in(&project.path("dist")).is_empty());
}

#[test]
fn rerun_with_same_version_overwrites_archive() {
    let project = Project::new("1.3.0");
    let settings = project.settings();
    let build = project.build(0);

    let first = match ReleaseOrchestrator::new(&settings, &build).run().unwrap() {
        ReleaseOutcome::Released(artifact) => artifact,
        other => panic!("unexpected outcome {other:?}"),
    };
    let first_entries = zip_entries(&first.path);

    let second = match ReleaseOrchestrator::new(&settings, &build).run().unwrap() {
        ReleaseOutcome::Released(artifact) => artifact,
        other => panic!("unexpected outcome {other:?}"),
    };

    assert_eq!(first.path, second.path);
    assert_eq!(first_entries, zip_entries(&second.path));
    assert_eq!(first.checksum, second.checksum);
    assert_eq!(archives_in(&project.path("dist")), vec![second.path.clone()]);
}

#[test]
fn missing_output_directory_despite_success_is_consistency_fault() {
    let project = Project::new("1.3.0");
    let settings = project.settings();
    let build = SimulatedBuild {
        output_dir: None,
        exit_code: 0,
    };
    let mut orchestrator = ReleaseOrchestrator::new(&settings, &build);

    let err = orchestrator.run().unwrap_err();

    assert!(matches!(
        err,
        ReleaseError::Bundle(BundleError::OutputDirectoryMissing { .. })
    ));
    assert_eq!(orchestrator.stage(), ReleaseStage::Assembling);
    assert!(archives_in(&project.path("dist")).is_empty());
}

#[test]
fn missing_readme_halts_before_archiving() {
    let project = Project::new("1.3.0");
    std::fs::remove_file(project.path("README.md")).unwrap();
    let settings = project.settings();
    let build = project.build(0);

    let err = ReleaseOrchestrator::new(&settings, &build).run().unwrap_err();

    assert!(matches!(
        err,
        ReleaseError::Bundle(BundleError::MissingSourceFile { .. })
    ));
    assert!(archives_in(&project.path("dist")).is_empty());
}

#[test]
fn missing_version_names_manifest_in_error() {
    let project = Project::new("1.3.0");
    std::fs::write(
        project.path("src/RePraxis/RePraxis.csproj"),
        "<Project><PropertyGroup/></Project>",
    )
    .unwrap();
    let settings = project.settings();
    let build = project.build(0);

    let err = ReleaseOrchestrator::new(&settings, &build).run().unwrap_err();

    assert_eq!(err.stage(), ReleaseStage::VersionRead);
    assert!(err.to_string().contains("RePraxis.csproj"));
    assert!(archives_in(&project.path("dist")).is_empty());
}

#[test]
fn tarball_format_uses_tar_gz_extension() {
    let project = Project::new("0.5.1");
    let settings = SettingsBuilder::new(project.root.path())
        .archive_format(ArchiveFormat::TarGz)
        .build()
        .unwrap();
    let build = project.build(0);

    let outcome = ReleaseOrchestrator::new(&settings, &build).run().unwrap();

    let ReleaseOutcome::Released(artifact) = outcome else {
        panic!("expected an archive");
    };
    assert_eq!(artifact.path, project.path("dist/RePraxis_0.5.1.tar.gz"));
    assert_eq!(artifact.format, ArchiveFormat::TarGz);
}

//! External build toolchain invocation.
//!
//! The toolchain runs as a child process with inherited stdout/stderr so the
//! operator sees build output live. A non-zero exit is an ordinary
//! [`BuildResult`]; only failing to start the toolchain is an error.

use crate::error::BuildError;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Outcome of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    /// Toolchain exited with code 0
    Success,
    /// Toolchain exited non-zero or was killed
    Failure,
}

/// Result of one toolchain invocation, consumed once by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// Success or failure
    pub status: BuildStatus,
    /// Process exit code, `None` if terminated by a signal
    pub exit_code: Option<i32>,
    /// Human-readable explanation of a failure
    pub diagnostic: Option<String>,
}

impl BuildResult {
    /// Successful build
    pub fn success() -> Self {
        Self {
            status: BuildStatus::Success,
            exit_code: Some(0),
            diagnostic: None,
        }
    }

    /// Failed build with the given exit code
    pub fn failure(exit_code: Option<i32>, diagnostic: impl Into<String>) -> Self {
        Self {
            status: BuildStatus::Failure,
            exit_code,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Whether the build succeeded
    pub fn is_success(&self) -> bool {
        self.status == BuildStatus::Success
    }

    fn from_status(command: &ToolchainCommand, status: ExitStatus) -> Self {
        if status.success() {
            return Self::success();
        }
        match status.code() {
            Some(code) => Self::failure(Some(code), format!("'{command}' exited with code {code}")),
            None => Self::failure(None, format!("'{command}' was terminated by a signal")),
        }
    }
}

/// Program and arguments selecting a release build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainCommand {
    /// Executable name or path
    pub program: String,
    /// Arguments passed verbatim
    pub args: Vec<String>,
}

impl ToolchainCommand {
    /// Create a toolchain command
    pub fn new<S, I, A>(program: S, args: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ToolchainCommand {
    fn default() -> Self {
        Self::new("dotnet", ["build", "--configuration", "Release"])
    }
}

impl std::fmt::Display for ToolchainCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs the release build.
///
/// Implementations block until the build finishes. There is no timeout and no retry.
pub trait BuildInvoker {
    /// Run the build once and report how it went.
    fn run_release_build(&self) -> Result<BuildResult, BuildError>;
}

/// [`BuildInvoker`] that spawns the real toolchain.
#[derive(Debug, Clone)]
pub struct ProcessToolchain {
    command: ToolchainCommand,
    working_dir: PathBuf,
}

impl ProcessToolchain {
    /// Toolchain running `command` inside `working_dir`
    pub fn new(command: ToolchainCommand, working_dir: impl AsRef<Path>) -> Self {
        Self {
            command,
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    /// Toolchain configured by `settings`
    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self::new(settings.toolchain().clone(), settings.project_root())
    }

    fn unavailable(&self, reason: impl std::fmt::Display) -> BuildError {
        BuildError::ToolchainUnavailable {
            program: self.command.program.clone(),
            reason: reason.to_string(),
        }
    }
}

impl BuildInvoker for ProcessToolchain {
    fn run_release_build(&self) -> Result<BuildResult, BuildError> {
        let program = which::which(&self.command.program).map_err(|e| self.unavailable(e))?;
        log::debug!("Resolved toolchain at: {}", program.display());
        log::info!(
            "Running '{}' in {}",
            self.command,
            self.working_dir.display()
        );

        let status = Command::new(&program)
            .args(&self.command.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| self.unavailable(e))?;

        let result = BuildResult::from_status(&self.command, status);
        if result.is_success() {
            log::info!("Build finished successfully");
        } else {
            log::info!(
                "Build failed: {}",
                result.diagnostic.as_deref().unwrap_or("unknown failure")
            );
        }
        Ok(result)
    }
}

//! Release command execution and user feedback.

use crate::cli::{Args, RuntimeConfig};
use crate::error::{ReleaseError, Result};
use crate::release::{ReleaseOutcome, ReleaseStage, run_release};

/// Execute the release described by `args` and return the process exit code.
pub fn execute_command(args: Args) -> Result<i32> {
    let config = RuntimeConfig::from(&args);
    let settings = args.settings()?;

    let _ = config
        .output()
        .section(&format!("Releasing {}", settings.artifact_name()));
    config.verbose_println(&format!("Project root: {}", settings.project_root().display()));
    config.verbose_println(&format!("Manifest: {}", settings.manifest_path().display()));
    config.println(&format!("🔨 Building: {}", settings.toolchain()));

    match run_release(&settings) {
        Ok(outcome) => {
            match &outcome {
                ReleaseOutcome::Released(artifact) => {
                    let _ = config.output().artifact(artifact);
                }
                ReleaseOutcome::BuildFailed(build) => {
                    config.error_println(&format!(
                        "An error occurred during build: {}",
                        build.diagnostic.as_deref().unwrap_or("toolchain reported failure")
                    ));
                    config.error_println("Nothing was bundled or archived");
                }
            }
            Ok(outcome.exit_code())
        }
        Err(e) => {
            report_failure(&config, &e);
            Ok(1)
        }
    }
}

fn report_failure(config: &RuntimeConfig, error: &ReleaseError) {
    match error.stage() {
        ReleaseStage::Start => config.error_println(&format!("Release aborted: {}", error)),
        stage => config.error_println(&format!("Release failed during {}: {}", stage, error)),
    }
    config.output().recovery(&error.recovery_suggestions());
}

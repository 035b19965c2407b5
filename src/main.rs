//! Re:Praxis release bundler binary.
//!
//! Builds the project, assembles the release bundle and writes the versioned
//! archive. Exits 0 when the archive was produced and 1 otherwise.

use repraxis_bundler_release::cli::{self, Args, OutputManager};
use std::process;

fn main() {
    let args = Args::parse_args();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli::run(args) {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));
            output.recovery(&e.recovery_suggestions());

            process::exit(1);
        }
    }
}

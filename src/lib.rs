//! # Re:Praxis Release Bundler
//!
//! Builds the project in release mode and packages the build output, together
//! with the license and readme, into a single archive named after the version
//! declared in the project manifest.
//!
//! ## Pipeline
//!
//! 1. **Build**: run `dotnet build --configuration Release`; a failed build ends the run
//! 2. **Assemble**: copy `LICENSE.md` and `README.md` into `dist/RePraxis`
//! 3. **Version**: read `<Version>` from `src/RePraxis/RePraxis.csproj`
//! 4. **Archive**: pack `dist/RePraxis` as `dist/RePraxis_<version>.zip`
//!
//! ## Usage
//!
//! ```bash
//! repraxis_bundler_release                    # release the project in the current directory
//! repraxis_bundler_release --root ../RePraxis # release another checkout
//! repraxis_bundler_release --format tar.gz    # produce a tarball instead
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use repraxis_bundler_release::{ReleaseOutcome, Settings, run_release};
//!
//! # fn example() -> repraxis_bundler_release::Result<()> {
//! let settings = Settings::for_project("/path/to/RePraxis")?;
//! match run_release(&settings)? {
//!     ReleaseOutcome::Released(artifact) => println!("{}", artifact.path.display()),
//!     ReleaseOutcome::BuildFailed(build) => eprintln!("{:?}", build.diagnostic),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod build;
pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod release;
pub mod settings;

// Re-export main types for public API
pub use build::{BuildInvoker, BuildResult, BuildStatus, ProcessToolchain, ToolchainCommand};
pub use bundler::{ArchiveFormat, ReleaseArtifact};
pub use cli::Args;
pub use error::{ReleaseError, Result};
pub use metadata::read_version;
pub use release::{ReleaseOrchestrator, ReleaseOutcome, ReleaseStage, run_release};
pub use settings::{Settings, SettingsBuilder};

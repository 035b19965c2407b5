//! Colored terminal output for release runs
//!
//! Progress and results go to stdout and are silenced by `--quiet`. Failures
//! and recovery hints go to stderr and are always shown.

use crate::bundler::ReleaseArtifact;
use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for release progress, results and failures
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Print a line prefixed with a colored marker
    fn marked(&self, marker: &str, spec: &ColorSpec, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.stdout.buffer();
        let _ = buffer.set_color(spec);
        let _ = write!(&mut buffer, "{marker}");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {message}");
        self.stdout.print(&buffer)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            message,
        )
    }

    /// Print a verbose message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.marked("→", ColorSpec::new().set_fg(Some(Color::Blue)), message)
    }

    /// Print the header announcing which artifact is being released
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.stdout.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        let _ = writeln!(&mut buffer, "═══ {title} ═══");
        let _ = buffer.reset();
        self.stdout.print(&buffer)
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.stdout.buffer();
        let _ = writeln!(&mut buffer, "{message}");
        self.stdout.print(&buffer)
    }

    /// Report a finished archive: its path, then version, size and checksum
    pub fn artifact(&self, artifact: &ReleaseArtifact) -> std::io::Result<()> {
        self.success(&format!("Created {}", artifact.path.display()))?;
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.stdout.buffer();
        for line in artifact_details(artifact) {
            let _ = writeln!(&mut buffer, "    {line}");
        }
        self.stdout.print(&buffer)
    }

    /// Print an error message (always shown, on stderr)
    pub fn error(&self, message: &str) {
        let stderr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = stderr.buffer();

        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || writeln!(&mut buffer, " {message}").is_err()
            || stderr.print(&buffer).is_err()
        {
            // stderr is gone; stdout is the last place the failure can land
            println!("✗ {message}");
        }
    }

    /// Print recovery hints under a failure (always shown, on stderr)
    pub fn recovery(&self, suggestions: &[String]) {
        if suggestions.is_empty() {
            return;
        }
        eprintln!("  Recovery suggestions:");
        for suggestion in suggestions {
            eprintln!("    • {suggestion}");
        }
    }
}

/// Indented detail lines shown under a created archive
fn artifact_details(artifact: &ReleaseArtifact) -> [String; 3] {
    [
        format!("Version: {}", artifact.version),
        format!("Size:    {} bytes", artifact.size),
        format!("SHA256:  {}", artifact.checksum),
    ]
}

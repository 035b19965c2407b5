//! Release version discovery from the project manifest.
//!
//! The manifest is an MSBuild project file. The version is the text of the
//! first `<Version>` element in document order, wherever it sits in the tree.

use crate::error::ManifestError;
use std::path::Path;

/// Element carrying the release version
const VERSION_ELEMENT: &str = "Version";

/// Read the declared release version from the manifest at `manifest_path`.
///
/// Distinguishes a missing element ([`ManifestError::VersionNotFound`]) from an
/// element without text ([`ManifestError::VersionEmpty`]). Comments inside the
/// element are skipped and the text around them joined, so
/// `<Version>1.<!-- x -->4.0</Version>` reads as `1.4.0`.
///
/// Surrounding whitespace is trimmed, and whitespace-only text counts as empty:
/// the version ends up in a file name, where stray blanks or newlines never
/// belong. Pure read; the file is closed before returning.
pub fn read_version(manifest_path: &Path) -> Result<String, ManifestError> {
    let content = std::fs::read_to_string(manifest_path).map_err(|e| ManifestError::Parse {
        path: manifest_path.to_path_buf(),
        reason: format!("Failed to read file: {}", e),
    })?;

    // Visual Studio writes project files with a BOM
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let doc = roxmltree::Document::parse(content).map_err(|e| ManifestError::Parse {
        path: manifest_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let element = doc
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == VERSION_ELEMENT)
        .ok_or_else(|| ManifestError::VersionNotFound {
            path: manifest_path.to_path_buf(),
        })?;

    let text: String = element
        .children()
        .filter(|node| node.is_text())
        .filter_map(|node| node.text())
        .collect();
    let version = text.trim();
    if version.is_empty() {
        return Err(ManifestError::VersionEmpty {
            path: manifest_path.to_path_buf(),
        });
    }

    if version.contains(['/', '\\']) {
        return Err(ManifestError::UnusableVersion {
            path: manifest_path.to_path_buf(),
            version: version.to_string(),
        });
    }

    log::debug!(
        "Read version {} from {}",
        version,
        manifest_path.display()
    );
    Ok(version.to_string())
}

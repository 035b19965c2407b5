//! Release archive creation.
//!
//! The whole bundle directory is packed under its own name, so extracting
//! `RePraxis_1.0.zip` recreates `RePraxis/...`. Entries are visited in sorted
//! order with fixed timestamps; packing the same bundle twice yields the same
//! archive.
//!
//! The archive is staged in a temporary file next to the destination and
//! renamed into place only once it is complete.

use crate::bundler::error::{ArchiveWriteError, ErrorExt, Result};
use crate::bundler::utils::fs::create_parent_dir;
use flate2::{Compression, write::GzEncoder};
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use zip::{CompressionMethod, write::SimpleFileOptions};

/// Archive container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveFormat {
    /// Deflate-compressed `.zip`
    #[default]
    Zip,
    /// Gzip-compressed tarball, `.tar.gz`
    TarGz,
}

impl ArchiveFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }

    /// `<destination>.<extension>`.
    ///
    /// Appends rather than replaces, so dots in a version survive.
    pub fn archive_path(&self, destination_without_extension: &Path) -> PathBuf {
        let mut path = OsString::from(destination_without_extension.as_os_str());
        path.push(".");
        path.push(self.extension());
        PathBuf::from(path)
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar.gz" | "tar-gz" | "tgz" | "gztar" => Ok(ArchiveFormat::TarGz),
            other => Err(format!(
                "unsupported archive format '{other}' (expected zip or tar.gz)"
            )),
        }
    }
}

/// One file or directory in the bundle
#[derive(Debug)]
struct BundleEntry {
    source: PathBuf,
    name: String,
    is_dir: bool,
}

/// Pack `source_dir` into `<destination_without_extension>.<ext>`.
///
/// Replaces an existing archive at that path. Returns the archive path.
pub fn write_archive(
    source_dir: &Path,
    destination_without_extension: &Path,
    format: ArchiveFormat,
) -> Result<PathBuf> {
    if !source_dir.is_dir() {
        return Err(ArchiveWriteError::SourceNotDirectory(source_dir.to_path_buf()));
    }

    let archive_path = format.archive_path(destination_without_extension);
    let entries = collect_entries(source_dir)?;

    create_parent_dir(&archive_path).fs_context("creating releases directory", &archive_path)?;
    let staging_dir = archive_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staging = tempfile::Builder::new()
        .prefix(".")
        .suffix(".partial")
        .tempfile_in(staging_dir)
        .fs_context("creating staging file in", staging_dir)?;

    match format {
        ArchiveFormat::Zip => write_zip(staging.as_file_mut(), &entries)?,
        ArchiveFormat::TarGz => write_tar_gz(staging.as_file_mut(), &entries)?,
    }

    staging
        .as_file()
        .sync_all()
        .fs_context("flushing archive", staging.path())?;
    staging
        .persist(&archive_path)
        .map_err(|e| ArchiveWriteError::Persist {
            path: archive_path.clone(),
            error: e.error,
        })?;

    log::info!(
        "Wrote {} entries to {}",
        entries.len(),
        archive_path.display()
    );
    Ok(archive_path)
}

/// Walk `source_dir` in sorted order, naming entries `<dir-name>/<relative path>`.
fn collect_entries(source_dir: &Path) -> Result<Vec<BundleEntry>> {
    let root_name = source_dir
        .file_name()
        .ok_or_else(|| ArchiveWriteError::SourceNotDirectory(source_dir.to_path_buf()))?
        .to_str()
        .ok_or_else(|| ArchiveWriteError::NonUtf8Path(source_dir.to_path_buf()))?
        .to_string();

    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(source_dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(source_dir)?;

        let mut name = root_name.clone();
        for component in rel_path.components() {
            let component = component
                .as_os_str()
                .to_str()
                .ok_or_else(|| ArchiveWriteError::NonUtf8Path(entry.path().to_path_buf()))?;
            name.push('/');
            name.push_str(component);
        }

        entries.push(BundleEntry {
            source: entry.path().to_path_buf(),
            name,
            is_dir: entry.file_type().is_dir(),
        });
    }

    Ok(entries)
}

fn zip_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

fn write_zip(file: &mut File, entries: &[BundleEntry]) -> Result<()> {
    let mut zip = zip::ZipWriter::new(file);

    for entry in entries {
        if entry.is_dir {
            zip.add_directory(format!("{}/", entry.name), zip_options())?;
            continue;
        }

        zip.start_file(entry.name.clone(), zip_options())?;
        let mut source =
            File::open(&entry.source).fs_context("opening bundle file", &entry.source)?;
        std::io::copy(&mut source, &mut zip).fs_context("archiving bundle file", &entry.source)?;
    }

    zip.finish()?;
    Ok(())
}

fn write_tar_gz(file: &mut File, entries: &[BundleEntry]) -> Result<()> {
    let encoder = GzEncoder::new(file, Compression::default());
    let mut tar = tar::Builder::new(encoder);
    tar.mode(tar::HeaderMode::Deterministic);

    for entry in entries {
        if entry.is_dir {
            tar.append_dir(&entry.name, &entry.source)
                .fs_context("archiving bundle directory", &entry.source)?;
        } else {
            tar.append_path_with_name(&entry.source, &entry.name)
                .fs_context("archiving bundle file", &entry.source)?;
        }
    }

    let encoder = tar
        .into_inner()
        .fs_context("finishing tarball", "<archive>")?;
    encoder
        .finish()
        .fs_context("finishing gzip stream", "<archive>")?;
    Ok(())
}

//! Archive checksum calculation.

use crate::bundler::error::{ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Calculates the SHA-256 checksum of a file.
///
/// Reads the file in 8KB chunks and returns the hex-encoded digest (64 characters).
pub fn calculate_sha256(file_path: &Path) -> Result<String> {
    let mut file =
        std::fs::File::open(file_path).fs_context("opening file for hashing", file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

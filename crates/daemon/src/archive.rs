// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive assembly: tar+gzip the working directory, then verify the
//! archive is readable before the working directory may be removed.

use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("working directory {0} has no usable name")]
    BadWorkdir(String),

    #[error("archive {path} failed verification: {message}")]
    Verify { path: String, message: String },
}

/// Timestamp component of archive names: `YYYYmmdd-HHMMSS`.
pub fn stamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}

/// Tar the working directory into `dest`, with the directory name as the
/// single top-level entry.
pub fn create(workdir: &Path, dest: &Path) -> Result<(), ArchiveError> {
    let entry_name = workdir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ArchiveError::BadWorkdir(workdir.display().to_string()))?;

    let file = std::fs::File::create(dest)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(entry_name, workdir)?;
    let encoder = builder.into_inner()?;
    encoder.finish()?;
    Ok(())
}

/// Walk every entry to prove the archive is complete and readable.
/// Returns the entry count.
pub fn verify(dest: &Path) -> Result<usize, ArchiveError> {
    let file = std::fs::File::open(dest)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    let entries = archive.entries().map_err(|e| ArchiveError::Verify {
        path: dest.display().to_string(),
        message: e.to_string(),
    })?;

    let mut count = 0;
    for entry in entries {
        entry.map_err(|e| ArchiveError::Verify {
            path: dest.display().to_string(),
            message: e.to_string(),
        })?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path and filesystem measurement.

use std::path::Path;

use walkdir::WalkDir;

/// Recursive byte size: a file's length, or the sum of all regular file
/// lengths under a directory. Symlinks are not followed; unreadable
/// entries are skipped.
pub fn tree_size(path: &Path) -> std::io::Result<u64> {
    let meta = std::fs::symlink_metadata(path)?;
    if meta.is_file() {
        return Ok(meta.len());
    }
    if !meta.is_dir() {
        return Ok(0);
    }

    let mut total = 0u64;
    for entry in WalkDir::new(path).follow_links(false) {
        let Ok(entry) = entry else { continue };
        if entry.file_type().is_file() {
            total = total.saturating_add(entry.metadata().map(|m| m.len()).unwrap_or(0));
        }
    }
    Ok(total)
}

/// Usage of the filesystem backing a path.
#[derive(Debug, Clone, Copy)]
pub struct FsUsage {
    pub used_bytes: u64,
    /// Percentage of non-reserved space in use, the way `df` reports it.
    pub used_percent: f64,
}

/// Measure the backing filesystem with statvfs.
pub fn fs_usage(path: &Path) -> std::io::Result<FsUsage> {
    let stat = nix::sys::statvfs::statvfs(path).map_err(std::io::Error::from)?;
    let frsize = stat.fragment_size() as u64;
    let blocks = stat.blocks() as u64;
    let free = stat.blocks_free() as u64;
    let available = stat.blocks_available() as u64;

    let used_bytes = blocks.saturating_sub(free).saturating_mul(frsize);
    let usable = used_bytes + available.saturating_mul(frsize);
    let used_percent = if usable == 0 { 0.0 } else { used_bytes as f64 * 100.0 / usable as f64 };
    Ok(FsUsage { used_bytes, used_percent })
}

#[cfg(test)]
#[path = "fs_meter_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Open-at-end log file follower with rotation detection.

use std::io::{Read, Seek, SeekFrom};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// Follows one log file, yielding newly appended complete lines per poll.
///
/// Started at end-of-file so pre-existing content never matches. Rotation
/// (inode change or size shrinkage) reopens from the new beginning. A file
/// that does not exist yet is tolerated: the first successful open after
/// deployment reads from the beginning, since everything in it is new.
pub struct LogTail {
    path: PathBuf,
    file: Option<std::fs::File>,
    ino: u64,
    offset: u64,
    partial: Vec<u8>,
}

impl LogTail {
    pub fn new(path: PathBuf) -> Self {
        Self { path, file: None, ino: 0, offset: 0, partial: Vec::new() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open positioned at end-of-file. Missing files are silently ignored.
    pub fn start(&mut self) {
        if let Ok(file) = std::fs::File::open(&self.path) {
            if let Ok(meta) = file.metadata() {
                self.ino = meta.ino();
                self.offset = meta.len();
                self.file = Some(file);
            }
        }
    }

    /// Drain lines appended since the last poll.
    ///
    /// A vanished file yields no lines and is retried on later polls; other
    /// I/O errors bubble up for the caller to log and retry.
    pub fn poll_lines(&mut self) -> std::io::Result<Vec<String>> {
        let meta = match std::fs::metadata(&self.path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.file = None;
                self.partial.clear();
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let rotated =
            self.file.is_some() && (meta.ino() != self.ino || meta.len() < self.offset);
        if self.file.is_none() || rotated {
            let file = std::fs::File::open(&self.path)?;
            self.ino = meta.ino();
            self.offset = 0;
            self.partial.clear();
            self.file = Some(file);
        }

        let Some(file) = self.file.as_mut() else {
            return Ok(Vec::new());
        };
        if meta.len() <= self.offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(self.offset))?;
        let mut fresh = Vec::new();
        let n = file.by_ref().take(meta.len() - self.offset).read_to_end(&mut fresh)?;
        self.offset += n as u64;

        let mut data = std::mem::take(&mut self.partial);
        data.extend_from_slice(&fresh);

        let mut lines = Vec::new();
        let mut start = 0;
        for (i, byte) in data.iter().enumerate() {
            if *byte == b'\n' {
                lines.push(String::from_utf8_lossy(&data[start..i]).into_owned());
                start = i + 1;
            }
        }
        self.partial = data[start..].to_vec();
        Ok(lines)
    }
}

#[cfg(test)]
#[path = "tail_tests.rs"]
mod tests;

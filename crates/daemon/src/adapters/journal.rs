// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! System journal follower over `journalctl`.
//!
//! Positioning uses journal cursors: `start` captures the tail cursor,
//! each poll drains entries after it and advances. Nothing here requires
//! linking against systemd; a host without `journalctl` simply yields an
//! unavailable source.

use tokio::process::Command;
use tracing::{debug, warn};

use super::subprocess::{run_with_timeout, PROBE_TIMEOUT, SAMPLE_TIMEOUT};

const CURSOR_PREFIX: &str = "-- cursor:";

/// A cursor-positioned journal reader, optionally filtered to units.
pub struct JournalCursor {
    units: Vec<String>,
    cursor: Option<String>,
    available: bool,
}

impl JournalCursor {
    /// An empty unit list follows the entire journal.
    pub fn new(units: Vec<String>) -> Self {
        Self { units, cursor: None, available: true }
    }

    /// Source label used in trigger evidence.
    pub fn label(&self) -> String {
        if self.units.is_empty() {
            "journal".to_string()
        } else {
            format!("journal:{}", self.units.join(","))
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("journalctl");
        cmd.args(["--no-pager", "--quiet", "-o", "cat"]);
        for unit in &self.units {
            cmd.arg("-u").arg(unit);
        }
        cmd.args(args);
        cmd
    }

    /// Position at the journal tail. On any failure the source is dropped
    /// (missing `journalctl`, no journal on this host).
    pub async fn start(&mut self) {
        let cmd = self.command(&["-n", "0", "--show-cursor"]);
        match run_with_timeout(cmd, PROBE_TIMEOUT, "journal cursor probe").await {
            Ok(output) if output.status.success() => {
                self.cursor = parse_cursor(&String::from_utf8_lossy(&output.stdout));
                if self.cursor.is_none() {
                    warn!(source = %self.label(), "journal has no cursor, disabling source");
                    self.available = false;
                }
            }
            Ok(output) => {
                warn!(
                    source = %self.label(),
                    status = %output.status,
                    "journalctl probe failed, disabling source"
                );
                self.available = false;
            }
            Err(e) => {
                warn!(source = %self.label(), error = %e, "journal unavailable, disabling source");
                self.available = false;
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Drain entries appended since the last poll. Errors are logged and
    /// the same cursor is retried on the next tick.
    pub async fn poll(&mut self) -> Vec<String> {
        if !self.available {
            return Vec::new();
        }
        let Some(cursor) = self.cursor.clone() else {
            return Vec::new();
        };

        let after = format!("--after-cursor={}", cursor);
        let cmd = self.command(&[after.as_str(), "--show-cursor"]);
        let output = match run_with_timeout(cmd, SAMPLE_TIMEOUT, "journal read").await {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                debug!(source = %self.label(), status = %output.status, "journal read failed");
                return Vec::new();
            }
            Err(e) => {
                debug!(source = %self.label(), error = %e, "journal read failed");
                return Vec::new();
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut entries = Vec::new();
        for line in stdout.lines() {
            if let Some(cursor) = line.strip_prefix(CURSOR_PREFIX) {
                self.cursor = Some(cursor.trim().to_string());
            } else if !line.is_empty() {
                entries.push(line.to_string());
            }
        }
        entries
    }
}

/// Extract the cursor from `--show-cursor` output.
fn parse_cursor(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix(CURSOR_PREFIX))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;

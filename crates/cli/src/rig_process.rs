// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rig daemon process management.
//!
//! `rig create` spawns a detached `rigd` and then watches both the child
//! and the control socket; deployment failures are reported with the
//! error `rigd` logged after its startup marker.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Startup marker prefix that rigd writes to its log before anything else.
const STARTUP_MARKER_PREFIX: &str = "--- rigd: starting (pid: ";

/// Spawn `rigd` detached from the terminal.
pub fn spawn_rigd(rigfile: &Path, name: &str) -> std::io::Result<Child> {
    Command::new(find_rigd_binary())
        .arg("--file")
        .arg(rigfile)
        .arg("--name")
        .arg(name)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

/// Find the rigd binary: explicit override, then a sibling of the current
/// executable, then PATH.
fn find_rigd_binary() -> PathBuf {
    if let Ok(path) = std::env::var("RIG_DAEMON_BINARY") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("rigd");
            if sibling.exists() {
                return sibling;
            }
        }
    }

    PathBuf::from("rigd")
}

/// Read the rig's daemon log, looking for errors after the most recent
/// startup marker.
pub fn read_startup_error(name: &str) -> Option<String> {
    let log_path = rig_core::paths::daemon_log_path(name);
    let content = std::fs::read_to_string(log_path).ok()?;
    parse_startup_error(&content)
}

/// Parse startup errors from log content (pure logic, no I/O).
fn parse_startup_error(content: &str) -> Option<String> {
    let start = content.rfind(STARTUP_MARKER_PREFIX)?;
    let startup_log = &content[start..];

    let errors: Vec<&str> = startup_log
        .lines()
        .filter(|line| line.contains("ERROR") || line.contains("deployment failed"))
        .collect();
    if errors.is_empty() {
        return None;
    }

    let messages: Vec<String> = errors
        .iter()
        .filter_map(|line| {
            line.split_once("ERROR").map(|(_, message)| message.trim().to_string())
        })
        .filter(|message| !message.is_empty())
        .collect();

    if messages.is_empty() {
        Some(errors.join("\n"))
    } else {
        Some(messages.join("\n"))
    }
}

#[cfg(test)]
#[path = "rig_process_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action option structs.

use std::path::PathBuf;

use serde::Deserialize;

use crate::monitors::ProcSelector;
use crate::parser::ParseError;

/// A configured action, in rigfile mapping order.
#[derive(Debug, Clone)]
pub enum ActionSpec {
    Gcore(GcoreConfig),
    Tcpdump(TcpdumpConfig),
    Watch(WatchConfig),
    Sos(SosConfig),
    Noop(NoopConfig),
    Kdump(KdumpConfig),
}

impl ActionSpec {
    /// Stable plugin name.
    pub fn name(&self) -> &'static str {
        match self {
            ActionSpec::Gcore(_) => "gcore",
            ActionSpec::Tcpdump(_) => "tcpdump",
            ActionSpec::Watch(_) => "watch",
            ActionSpec::Sos(_) => "sos",
            ActionSpec::Noop(_) => "noop",
            ActionSpec::Kdump(_) => "kdump",
        }
    }
}

/// `gcore` action: core-dump one or more processes.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GcoreConfig {
    /// PIDs and/or process names to dump (names resolve at execution time).
    pub procs: Vec<ProcSelector>,

    /// SIGSTOP each target before dumping, SIGCONT after.
    #[serde(default)]
    pub freeze: bool,

    /// Extra dump iterations beyond the first; falls back to the rig-level
    /// `repeat` when unset.
    pub repeat: Option<u32>,
}

impl GcoreConfig {
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.procs.is_empty() {
            return Err(ParseError::InvalidAction {
                name: "gcore",
                message: "procs must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// `tcpdump` action: rolling packet capture for the life of the rig.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TcpdumpConfig {
    /// Capture interface; `any` is permitted.
    pub interface: String,

    /// Optional pcap filter expression.
    pub expression: Option<String>,

    /// Number of rolling capture files.
    #[serde(default = "default_capture_count")]
    pub capture_count: u32,

    /// Size of each capture file in MB.
    #[serde(default = "default_capture_size")]
    pub capture_size: u32,

    /// Snapshot length in bytes; 0 uses the tool default.
    #[serde(default)]
    pub snapshot_length: u32,
}

fn default_capture_count() -> u32 {
    1
}

fn default_capture_size() -> u32 {
    10
}

impl TcpdumpConfig {
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.interface.is_empty() {
            return Err(ParseError::InvalidAction {
                name: "tcpdump",
                message: "interface must not be empty".to_string(),
            });
        }
        if self.capture_count == 0 || self.capture_size == 0 {
            return Err(ParseError::InvalidAction {
                name: "tcpdump",
                message: "capture_count and capture_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// A file sampled by the `watch` action.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WatchTarget {
    /// Bare path; the output name is derived from the file name.
    Path(PathBuf),
    /// Path with an explicit output name inside the working directory.
    Renamed {
        path: PathBuf,
        dest: String,
    },
}

impl WatchTarget {
    pub fn path(&self) -> &PathBuf {
        match self {
            WatchTarget::Path(path) => path,
            WatchTarget::Renamed { path, .. } => path,
        }
    }

    pub fn dest(&self) -> Option<&str> {
        match self {
            WatchTarget::Path(_) => None,
            WatchTarget::Renamed { dest, .. } => Some(dest),
        }
    }
}

/// `watch` action: periodic file and command sampling.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Files to snapshot each tick.
    #[serde(default)]
    pub files: Vec<WatchTarget>,

    /// Commands to run each tick (argv split on whitespace, no shell).
    #[serde(default)]
    pub commands: Vec<String>,

    /// Add the standard sampling inventory.
    #[serde(default)]
    pub use_standard_set: bool,
}

impl WatchConfig {
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.files.is_empty() && self.commands.is_empty() && !self.use_standard_set {
            return Err(ParseError::InvalidAction {
                name: "watch",
                message: "nothing to watch: set files, commands, or use_standard_set".to_string(),
            });
        }
        for command in &self.commands {
            if command.split_whitespace().next().is_none() {
                return Err(ParseError::InvalidAction {
                    name: "watch",
                    message: "empty command".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Which sos mode a rig runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SosMode {
    Report,
    Collect,
}

impl SosMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SosMode::Report => "report",
            SosMode::Collect => "collect",
        }
    }
}

/// `sos` action: host (report) or multi-host (collect) diagnostics.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SosConfig {
    /// Run `sos report` (the default mode).
    #[serde(default)]
    pub report: bool,

    /// Run `sos collect`; mutually exclusive with `report`.
    #[serde(default)]
    pub collect: bool,

    /// Also run the configured mode once at deployment.
    #[serde(default)]
    pub initial_archive: bool,
}

impl SosConfig {
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.report && self.collect {
            return Err(ParseError::InvalidAction {
                name: "sos",
                message: "report and collect are mutually exclusive".to_string(),
            });
        }
        Ok(())
    }

    pub fn mode(&self) -> SosMode {
        if self.collect {
            SosMode::Collect
        } else {
            SosMode::Report
        }
    }
}

/// `noop` action: writes a marker file. Testing only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoopConfig {}

/// `kdump` action: crash the kernel into the dump capture path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KdumpConfig {}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;

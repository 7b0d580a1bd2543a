// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitor option structs.
//!
//! One struct per monitor plugin; serde enforces field presence and types,
//! `validate()` enforces the cross-field rules.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

use crate::parser::ParseError;

/// Conventional system log watched when `files` is omitted.
pub const DEFAULT_LOG_FILE: &str = "/var/log/messages";

/// A configured monitor, in rigfile mapping order.
#[derive(Debug, Clone)]
pub enum MonitorSpec {
    Logs(LogsConfig),
    Process(ProcessConfig),
    Filesystem(FilesystemConfig),
}

impl MonitorSpec {
    /// Stable plugin name.
    pub fn name(&self) -> &'static str {
        match self {
            MonitorSpec::Logs(_) => "logs",
            MonitorSpec::Process(_) => "process",
            MonitorSpec::Filesystem(_) => "filesystem",
        }
    }
}

/// `logs` monitor: regex match over log files and/or the journal.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsConfig {
    /// Regular expression applied to each new line.
    pub message: String,

    /// Matches needed across all sources combined before tripping.
    #[serde(default = "default_count")]
    pub count: u64,

    /// Log files to tail. Omitted → the conventional system log;
    /// explicit `null` → no file sources.
    #[serde(default = "default_files")]
    pub files: Option<Vec<PathBuf>>,

    /// Journal units to follow. Omitted → the entire journal (empty
    /// filter); explicit `null` → journal reading disabled.
    #[serde(default = "default_journals")]
    pub journals: Option<Vec<String>>,
}

fn default_count() -> u64 {
    1
}

fn default_files() -> Option<Vec<PathBuf>> {
    Some(vec![PathBuf::from(DEFAULT_LOG_FILE)])
}

fn default_journals() -> Option<Vec<String>> {
    Some(Vec::new())
}

impl LogsConfig {
    pub fn validate(&self) -> Result<(), ParseError> {
        regex::Regex::new(&self.message).map_err(|e| ParseError::InvalidMonitor {
            name: "logs",
            message: format!("bad message pattern: {}", e),
        })?;
        if self.count == 0 {
            return Err(ParseError::InvalidMonitor {
                name: "logs",
                message: "count must be at least 1".to_string(),
            });
        }
        if self.files.is_none() && self.journals.is_none() {
            return Err(ParseError::InvalidMonitor {
                name: "logs",
                message: "both files and journals are disabled".to_string(),
            });
        }
        Ok(())
    }
}

/// A process to watch: a literal PID or a process name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProcSelector {
    Pid(i32),
    Name(String),
}

impl std::fmt::Display for ProcSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcSelector::Pid(pid) => write!(f, "{}", pid),
            ProcSelector::Name(name) => f.write_str(name),
        }
    }
}

/// Symbolic process states accepted by the `state` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Running,
    Sleeping,
    DiskSleep,
    Stopped,
    Zombie,
    Idle,
    Dead,
}

impl ProcState {
    /// Parse a long name or single-letter code (case insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        let state = match lower.as_str() {
            "running" | "r" => ProcState::Running,
            "sleeping" | "s" => ProcState::Sleeping,
            "disk-sleep" | "disk_sleep" | "d" => ProcState::DiskSleep,
            "stopped" | "t" => ProcState::Stopped,
            "zombie" | "z" => ProcState::Zombie,
            "idle" | "i" => ProcState::Idle,
            "dead" | "x" => ProcState::Dead,
            _ => return None,
        };
        Some(state)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcState::Running => "running",
            ProcState::Sleeping => "sleeping",
            ProcState::DiskSleep => "disk-sleep",
            ProcState::Stopped => "stopped",
            ProcState::Zombie => "zombie",
            ProcState::Idle => "idle",
            ProcState::Dead => "dead",
        }
    }
}

/// A parsed `state` predicate; a leading `!` inverts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateMatcher {
    pub negated: bool,
    pub state: ProcState,
}

impl StateMatcher {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let (negated, rest) = match input.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let state = ProcState::parse(rest.trim()).ok_or_else(|| ParseError::InvalidMonitor {
            name: "process",
            message: format!("unknown process state {:?}", input),
        })?;
        Ok(Self { negated, state })
    }
}

impl std::fmt::Display for StateMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "!{}", self.state.as_str())
        } else {
            f.write_str(self.state.as_str())
        }
    }
}

/// `process` monitor: per-PID resource and state thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessConfig {
    /// PIDs and/or process names to watch.
    pub procs: Vec<ProcSelector>,

    /// CPU utilization threshold over one tick window, percent of a core.
    pub cpu_percent: Option<f64>,

    /// Resident-set threshold as a percentage of system memory.
    pub memory_percent: Option<f64>,

    /// Absolute resident-set threshold (K/M/G/T suffixes accepted).
    #[serde(default, deserialize_with = "de_opt_size")]
    pub rss: Option<u64>,

    /// Absolute virtual-size threshold (K/M/G/T suffixes accepted).
    #[serde(default, deserialize_with = "de_opt_size")]
    pub vms: Option<u64>,

    /// Symbolic state predicate; `!` inverts, `!running` also trips on exit.
    pub state: Option<String>,
}

impl ProcessConfig {
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.procs.is_empty() {
            return Err(ParseError::InvalidMonitor {
                name: "process",
                message: "procs must not be empty".to_string(),
            });
        }
        for selector in &self.procs {
            if let ProcSelector::Pid(pid) = selector {
                if *pid <= 0 {
                    return Err(ParseError::InvalidMonitor {
                        name: "process",
                        message: format!("invalid pid {}", pid),
                    });
                }
            }
        }
        for pct in [self.cpu_percent, self.memory_percent].into_iter().flatten() {
            if pct < 0.0 {
                return Err(ParseError::InvalidMonitor {
                    name: "process",
                    message: format!("negative percentage {}", pct),
                });
            }
        }
        if self.state.is_some() {
            self.state_matcher()?;
        }
        if self.cpu_percent.is_none()
            && self.memory_percent.is_none()
            && self.rss.is_none()
            && self.vms.is_none()
            && self.state.is_none()
        {
            return Err(ParseError::InvalidMonitor {
                name: "process",
                message: "at least one of cpu_percent, memory_percent, rss, vms, state is required"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// The parsed `state` predicate, if configured.
    pub fn state_matcher(&self) -> Result<Option<StateMatcher>, ParseError> {
        self.state.as_deref().map(StateMatcher::parse).transpose()
    }
}

/// `filesystem` monitor: path and backing-filesystem thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemConfig {
    /// File or directory to measure; must exist at deployment.
    pub path: PathBuf,

    /// Recursive size threshold in bytes (directories are summed).
    #[serde(default, deserialize_with = "de_opt_size")]
    pub size: Option<u64>,

    /// Used percentage of the backing filesystem.
    pub used_perc: Option<u64>,

    /// Used bytes of the backing filesystem.
    #[serde(default, deserialize_with = "de_opt_size")]
    pub used_size: Option<u64>,
}

impl FilesystemConfig {
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.size.is_none() && self.used_perc.is_none() && self.used_size.is_none() {
            return Err(ParseError::InvalidMonitor {
                name: "filesystem",
                message: "at least one of size, used_perc, used_size is required".to_string(),
            });
        }
        if let Some(perc) = self.used_perc {
            if perc > 100 {
                return Err(ParseError::InvalidMonitor {
                    name: "filesystem",
                    message: format!("used_perc {} out of range", perc),
                });
            }
        }
        Ok(())
    }
}

/// Accept a byte size as either a bare integer or a suffixed string.
pub(crate) fn de_opt_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(n)) => Ok(Some(n)),
        Some(Raw::Str(s)) => rig_core::bytes::parse_size(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "monitors_tests.rs"]
mod tests;

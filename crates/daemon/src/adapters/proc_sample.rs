// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process table sampling.
//!
//! Thin wrapper over `sysinfo`: CPU percentages are deltas between
//! consecutive `refresh` calls, so one refresh per tick gives exactly the
//! per-window percentages the `process` monitor needs.

use rig_rigfile::{ProcSelector, ProcState};
use sysinfo::{Pid, ProcessStatus, ProcessesToUpdate, System};
use tracing::warn;

/// One process observation.
#[derive(Debug, Clone)]
pub struct ProcSample {
    pub name: String,
    /// Percent of one core over the last refresh window.
    pub cpu_percent: f64,
    /// Resident set in bytes.
    pub rss: u64,
    /// Virtual size in bytes.
    pub vms: u64,
    pub state: ProcState,
}

/// Stateful process table sampler.
pub struct ProcSampler {
    sys: System,
}

impl ProcSampler {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        Self { sys }
    }

    /// Refresh the table; call once per tick.
    pub fn refresh(&mut self) {
        self.sys.refresh_processes(ProcessesToUpdate::All, true);
    }

    /// Total system memory in bytes.
    pub fn total_memory(&self) -> u64 {
        self.sys.total_memory()
    }

    pub fn exists(&self, pid: u32) -> bool {
        self.sys.process(Pid::from_u32(pid)).is_some()
    }

    /// PIDs whose process name equals `name`, sorted for determinism.
    pub fn pids_matching(&self, name: &str) -> Vec<u32> {
        let mut pids: Vec<u32> = self
            .sys
            .processes()
            .iter()
            .filter(|(_, proc_)| proc_.name().to_string_lossy() == name)
            .map(|(pid, _)| pid.as_u32())
            .collect();
        pids.sort_unstable();
        pids
    }

    pub fn sample(&self, pid: u32) -> Option<ProcSample> {
        let proc_ = self.sys.process(Pid::from_u32(pid))?;
        Some(ProcSample {
            name: proc_.name().to_string_lossy().into_owned(),
            cpu_percent: f64::from(proc_.cpu_usage()),
            rss: proc_.memory(),
            vms: proc_.virtual_memory(),
            state: map_status(proc_.status()),
        })
    }
}

impl Default for ProcSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve selectors to `(pid, label)` pairs against the current table.
///
/// PIDs that do not exist and names matching nothing are benign: they are
/// logged and skipped.
pub fn resolve_selectors(sampler: &ProcSampler, selectors: &[ProcSelector]) -> Vec<(u32, String)> {
    let mut resolved = Vec::new();
    for selector in selectors {
        match selector {
            ProcSelector::Pid(pid) => {
                let pid = *pid as u32;
                if sampler.exists(pid) {
                    resolved.push((pid, pid.to_string()));
                } else {
                    warn!(pid, "watched pid does not exist, ignoring");
                }
            }
            ProcSelector::Name(name) => {
                let pids = sampler.pids_matching(name);
                if pids.is_empty() {
                    warn!(name = %name, "no processes match name, watching nothing for it");
                }
                for pid in pids {
                    resolved.push((pid, format!("{}({})", name, pid)));
                }
            }
        }
    }
    resolved
}

/// Collapse sysinfo's status zoo onto the documented state table.
fn map_status(status: ProcessStatus) -> ProcState {
    match status {
        ProcessStatus::Run => ProcState::Running,
        ProcessStatus::Sleep => ProcState::Sleeping,
        ProcessStatus::Idle => ProcState::Idle,
        ProcessStatus::UninterruptibleDiskSleep => ProcState::DiskSleep,
        ProcessStatus::Stop | ProcessStatus::Tracing => ProcState::Stopped,
        ProcessStatus::Zombie => ProcState::Zombie,
        ProcessStatus::Dead => ProcState::Dead,
        _ => ProcState::Sleeping,
    }
}

/// True when the state counts as alive-and-schedulable, the meaning of
/// `running` in state predicates. `!running` therefore trips on stopped,
/// zombie, and exited processes, not on ordinary sleep.
pub fn is_alive_state(state: ProcState) -> bool {
    matches!(
        state,
        ProcState::Running | ProcState::Sleeping | ProcState::DiskSleep | ProcState::Idle
    )
}

#[cfg(test)]
#[path = "proc_sample_tests.rs"]
mod tests;

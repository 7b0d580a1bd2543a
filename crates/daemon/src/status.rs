// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared rig status.
//!
//! The one piece of state shared between the supervisor and the control
//! listener, behind a single mutex. The trigger record is write-once;
//! everything else is simple bookkeeping for status reports.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rig_core::{Phase, TriggerRecord};
use rig_wire::{ActionStatus, MonitorStatus, StatusReport};

struct RigState {
    phase: Phase,
    trigger: Option<TriggerRecord>,
    evidence: Vec<TriggerRecord>,
    monitors: Vec<MonitorStatus>,
    actions: Vec<ActionStatus>,
    destroyed: bool,
}

/// Shared handle; the supervisor writes, the listener reads.
pub struct Shared {
    pub name: String,
    pub pid: u32,
    started: Instant,
    state: Mutex<RigState>,
}

impl Shared {
    pub fn new(name: String, monitor_names: &[&'static str], action_names: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            name,
            pid: std::process::id(),
            started: Instant::now(),
            state: Mutex::new(RigState {
                phase: Phase::Initializing,
                trigger: None,
                evidence: Vec::new(),
                monitors: monitor_names
                    .iter()
                    .map(|n| MonitorStatus { name: n.to_string(), state: "watching".to_string() })
                    .collect(),
                actions: action_names
                    .iter()
                    .map(|n| ActionStatus { name: n.to_string(), state: "idle".to_string() })
                    .collect(),
                destroyed: false,
            }),
        })
    }

    pub fn set_phase(&self, phase: Phase) {
        self.state.lock().phase = phase;
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    /// Latch the trigger source. Returns false if one is already latched
    /// (the record is then kept as evidence instead).
    pub fn latch_trigger(&self, record: TriggerRecord) -> bool {
        let mut state = self.state.lock();
        if state.trigger.is_some() {
            state.evidence.push(record);
            return false;
        }
        state.trigger = Some(record);
        true
    }

    pub fn push_evidence(&self, record: TriggerRecord) {
        self.state.lock().evidence.push(record);
    }

    pub fn trigger(&self) -> Option<TriggerRecord> {
        self.state.lock().trigger.clone()
    }

    pub fn evidence(&self) -> Vec<TriggerRecord> {
        self.state.lock().evidence.clone()
    }

    pub fn set_monitor_state(&self, index: usize, value: &str) {
        let mut state = self.state.lock();
        if let Some(entry) = state.monitors.get_mut(index) {
            entry.state = value.to_string();
        }
    }

    pub fn set_action_state(&self, index: usize, value: &str) {
        let mut state = self.state.lock();
        if let Some(entry) = state.actions.get_mut(index) {
            entry.state = value.to_string();
        }
    }

    pub fn action_states(&self) -> Vec<ActionStatus> {
        self.state.lock().actions.clone()
    }

    /// Mark destroyed. Returns false when already destroyed (the second
    /// administrative destroy gets a "not found").
    pub fn mark_destroyed(&self) -> bool {
        let mut state = self.state.lock();
        if state.destroyed {
            return false;
        }
        state.destroyed = true;
        true
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.lock().destroyed
    }

    pub fn report(&self) -> StatusReport {
        let state = self.state.lock();
        StatusReport {
            name: self.name.clone(),
            pid: self.pid,
            phase: state.phase,
            uptime_s: self.started.elapsed().as_secs(),
            trigger_source: state.trigger.clone(),
            monitors: state.monitors.clone(),
            actions: state.actions.clone(),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

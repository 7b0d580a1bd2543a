// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rig lifecycle phases.
//!
//! A rig moves strictly forward through these phases; `Finished` and
//! `Failed` are terminal. The phase is the coarse state published over the
//! control socket and shown by `rig list`.

use serde::{Deserialize, Serialize};

/// High-level state of a rig process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Validating configuration, binding the socket, building instances.
    Initializing,
    /// Probing and starting pre-trigger collectors.
    PreTriggerRunning,
    /// Monitors are being polled; the rig is armed.
    Polling,
    /// A monitor tripped; waiting out the configured delay.
    Triggered,
    /// Post-trigger actions are running.
    Collecting,
    /// Rolling the working directory into the archive.
    Archiving,
    /// Actions complete and the archive (if any) is on disk.
    Finished,
    /// A fatal supervisor error occurred.
    Failed,
}

impl Phase {
    /// Stable lowercase identifier, matching the wire serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Initializing => "initializing",
            Phase::PreTriggerRunning => "pre_trigger_running",
            Phase::Polling => "polling",
            Phase::Triggered => "triggered",
            Phase::Collecting => "collecting",
            Phase::Archiving => "archiving",
            Phase::Finished => "finished",
            Phase::Failed => "failed",
        }
    }

    /// True once the rig can no longer trip or collect.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finished | Phase::Failed)
    }

    /// True once deployment is complete and the rig is answering as ready.
    pub fn is_ready(&self) -> bool {
        !matches!(self, Phase::Initializing | Phase::PreTriggerRunning)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;

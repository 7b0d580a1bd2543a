// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger evidence records.
//!
//! When a monitor trips it produces a [`TriggerRecord`] naming itself and
//! quoting what it saw. The supervisor latches the first record as the
//! rig's trigger source; any later trips are kept as additional evidence.

use serde::{Deserialize, Serialize};

/// Evidence that a monitor's condition became true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRecord {
    /// Monitor plugin name (`logs`, `process`, `filesystem`).
    pub monitor: String,
    /// Short human-readable evidence: the source plus a quoted excerpt or
    /// measurement, e.g. `matched "boom" in /var/log/messages (3 hits)`.
    pub summary: String,
    /// RFC 3339 timestamp of the observation.
    pub at: String,
}

impl TriggerRecord {
    pub fn new(
        monitor: impl Into<String>,
        summary: impl Into<String>,
        at: impl Into<String>,
    ) -> Self {
        Self { monitor: monitor.into(), summary: summary.into(), at: at.into() }
    }
}

impl std::fmt::Display for TriggerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.monitor, self.summary)
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;

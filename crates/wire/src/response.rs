// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Responses written back on a rig's control socket.

use rig_core::{Phase, TriggerRecord};
use serde::{Deserialize, Serialize};

/// Per-monitor line in a status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorStatus {
    pub name: String,
    /// `watching`, `tripped`, or `lost`.
    pub state: String,
}

/// Per-action line in a status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStatus {
    pub name: String,
    /// `idle`, `pre_trigger_running`, `running`, `done`, `failed`, `stopped`.
    pub state: String,
}

/// The `{"op":"status"}` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub name: String,
    pub pid: u32,
    pub phase: Phase,
    pub uptime_s: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_source: Option<TriggerRecord>,
    pub monitors: Vec<MonitorStatus>,
    pub actions: Vec<ActionStatus>,
}

/// A single response line.
///
/// Serialized shapes are fixed by the protocol: a status object, or
/// `{"ok":true}` / `{"ok":false,"err":…}`. Variant order matters for
/// untagged deserialization (`Err` carries a superset of `Ack`'s fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Status(Box<StatusReport>),
    Err { ok: bool, err: String },
    Ack { ok: bool },
}

impl Response {
    /// `{"ok":true}`
    pub fn ok() -> Self {
        Response::Ack { ok: true }
    }

    /// `{"ok":false,"err":…}`
    pub fn err(message: impl Into<String>) -> Self {
        Response::Err { ok: false, err: message.into() }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ack { ok: true } | Response::Status(_))
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

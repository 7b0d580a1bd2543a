// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin registry: the fixed monitor/action tables and the factories
//! that turn validated rigfile options into instances.
//!
//! Registry contents are fixed at build time. `build_actions` also fixes
//! the execution order: a stable sort by (priority weight ascending,
//! rigfile declaration order ascending), independent of mapping key order.

use rig_rigfile::{ActionSpec, MonitorSpec, Rigfile};

use crate::actions::{
    Action, GcoreAction, KdumpAction, NoopAction, SosAction, TcpdumpAction, WatchAction,
};
use crate::monitors::{FilesystemMonitor, LogsMonitor, Monitor, ProcessMonitor};

/// Static description of an action plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub name: &'static str,
    /// Lower weight runs earlier.
    pub weight: u32,
    /// Starts at deployment, stopped at trigger.
    pub pre_trigger: bool,
    /// Honors the rig-level `repeat`.
    pub repeatable: bool,
}

/// The action table. `kdump` is always last; new actions slot in by weight.
pub const ACTION_TABLE: &[ActionDescriptor] = &[
    ActionDescriptor { name: "gcore", weight: 10, pre_trigger: false, repeatable: true },
    ActionDescriptor { name: "tcpdump", weight: 20, pre_trigger: true, repeatable: false },
    ActionDescriptor { name: "watch", weight: 20, pre_trigger: true, repeatable: false },
    ActionDescriptor { name: "sos", weight: 50, pre_trigger: false, repeatable: false },
    ActionDescriptor { name: "noop", weight: 90, pre_trigger: false, repeatable: false },
    ActionDescriptor { name: "kdump", weight: 100, pre_trigger: false, repeatable: false },
];

/// Monitor plugin names.
pub const MONITOR_NAMES: &[&str] = &["logs", "process", "filesystem"];

/// Look up an action descriptor by name.
pub fn action_descriptor(name: &str) -> Option<&'static ActionDescriptor> {
    ACTION_TABLE.iter().find(|d| d.name == name)
}

/// A built monitor with its registry name.
pub struct MonitorInstance {
    pub name: &'static str,
    pub monitor: Box<dyn Monitor>,
}

/// A built action with its scheduling attributes resolved.
pub struct ActionInstance {
    pub name: &'static str,
    pub weight: u32,
    /// Started at deployment and stopped at trigger.
    pub pre_trigger: bool,
    /// Runs in the post-trigger pipeline. Pure pre-trigger collectors
    /// (tcpdump, watch) have already produced their output by then.
    pub post_trigger: bool,
    pub repeatable: bool,
    /// Per-action repeat override (gcore); rig-level `repeat` otherwise.
    pub repeat_override: Option<u32>,
    pub action: Box<dyn Action>,
}

/// Build monitor instances in declaration order.
pub fn build_monitors(cfg: &Rigfile) -> Result<Vec<MonitorInstance>, String> {
    cfg.monitors
        .iter()
        .map(|spec| {
            let instance = match spec {
                MonitorSpec::Logs(c) => MonitorInstance {
                    name: "logs",
                    monitor: Box::new(LogsMonitor::new(c).map_err(|e| e.to_string())?),
                },
                MonitorSpec::Process(c) => MonitorInstance {
                    name: "process",
                    monitor: Box::new(ProcessMonitor::new(c).map_err(|e| e.to_string())?),
                },
                MonitorSpec::Filesystem(c) => MonitorInstance {
                    name: "filesystem",
                    monitor: Box::new(FilesystemMonitor::new(c)),
                },
            };
            Ok(instance)
        })
        .collect()
}

/// Build action instances in final execution order.
pub fn build_actions(cfg: &Rigfile) -> Vec<ActionInstance> {
    let mut instances: Vec<ActionInstance> =
        cfg.actions.iter().map(build_action).collect();
    // Stable: declaration order breaks weight ties.
    instances.sort_by_key(|a| a.weight);
    instances
}

fn build_action(spec: &ActionSpec) -> ActionInstance {
    match spec {
        ActionSpec::Gcore(c) => ActionInstance {
            name: "gcore",
            weight: 10,
            pre_trigger: false,
            post_trigger: true,
            repeatable: true,
            repeat_override: c.repeat,
            action: Box::new(GcoreAction::new(c.clone())),
        },
        ActionSpec::Tcpdump(c) => ActionInstance {
            name: "tcpdump",
            weight: 20,
            pre_trigger: true,
            post_trigger: false,
            repeatable: false,
            repeat_override: None,
            action: Box::new(TcpdumpAction::new(c.clone())),
        },
        ActionSpec::Watch(c) => ActionInstance {
            name: "watch",
            weight: 20,
            pre_trigger: true,
            post_trigger: false,
            repeatable: false,
            repeat_override: None,
            action: Box::new(WatchAction::new(c.clone())),
        },
        ActionSpec::Sos(c) => ActionInstance {
            name: "sos",
            weight: 50,
            // The initial_archive run shares the action record; it happens
            // in pre_start and the report proper runs post-trigger.
            pre_trigger: c.initial_archive,
            post_trigger: true,
            repeatable: false,
            repeat_override: None,
            action: Box::new(SosAction::new(c.clone())),
        },
        ActionSpec::Noop(_) => ActionInstance {
            name: "noop",
            weight: 90,
            pre_trigger: false,
            post_trigger: true,
            repeatable: false,
            repeat_override: None,
            action: Box::new(NoopAction),
        },
        ActionSpec::Kdump(_) => ActionInstance {
            name: "kdump",
            weight: 100,
            pre_trigger: false,
            post_trigger: true,
            repeatable: false,
            repeat_override: None,
            action: Box::new(KdumpAction),
        },
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rigfile document parsing.
//!
//! Two passes: serde deserializes the top-level document strictly, then
//! each monitor/action mapping entry is dispatched by plugin name to its
//! typed option struct and validated. Mapping order is preserved; it is
//! the tie-break for action execution order.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::actions::{
    ActionSpec, GcoreConfig, KdumpConfig, NoopConfig, SosConfig, TcpdumpConfig, WatchConfig,
};
use crate::monitors::{FilesystemConfig, LogsConfig, MonitorSpec, ProcessConfig};

/// Errors from rigfile parsing and validation.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read rigfile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid rig name: {0}")]
    InvalidName(#[from] rig_core::name::NameError),

    #[error("unknown monitor '{0}'")]
    UnknownMonitor(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("monitor '{name}': {message}")]
    InvalidMonitor { name: &'static str, message: String },

    #[error("action '{name}': {message}")]
    InvalidAction { name: &'static str, message: String },

    #[error("rigfile declares no monitors")]
    NoMonitors,

    #[error("rigfile declares no actions")]
    NoActions,
}

/// Raw document shape; unknown top-level keys are rejected here.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRigfile {
    name: Option<String>,
    interval: Option<f64>,
    delay: Option<u64>,
    repeat: Option<u32>,
    repeat_delay: Option<u64>,
    no_archive: Option<bool>,
    monitors: Option<IndexMap<String, serde_yaml::Value>>,
    actions: Option<IndexMap<String, serde_yaml::Value>>,
}

/// A parsed, validated rigfile.
#[derive(Debug, Clone)]
pub struct Rigfile {
    /// Rig name; generated at deployment when absent.
    pub name: Option<String>,
    /// Polling interval in whole seconds, at least 1.
    pub interval: u64,
    /// Seconds to wait between trigger and action execution.
    pub delay: u64,
    /// Extra iterations for repeatable actions.
    pub repeat: u32,
    /// Seconds between repeat iterations.
    pub repeat_delay: u64,
    /// Keep the working directory untarred instead of archiving.
    pub no_archive: bool,
    /// Monitors in declaration order.
    pub monitors: Vec<MonitorSpec>,
    /// Actions in declaration order.
    pub actions: Vec<ActionSpec>,
}

/// Parse and validate a rigfile on disk.
pub fn parse_file(path: &Path) -> Result<Rigfile, ParseError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| ParseError::Io { path: path.to_path_buf(), source })?;
    parse_str(&content)
}

/// Parse and validate a rigfile document.
pub fn parse_str(input: &str) -> Result<Rigfile, ParseError> {
    let raw: RawRigfile = serde_yaml::from_str(input)?;

    if let Some(ref name) = raw.name {
        rig_core::name::validate(name)?;
    }

    let monitors = raw
        .monitors
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| monitor_entry(&key, value))
        .collect::<Result<Vec<_>, _>>()?;
    if monitors.is_empty() {
        return Err(ParseError::NoMonitors);
    }

    let actions = raw
        .actions
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| action_entry(&key, value))
        .collect::<Result<Vec<_>, _>>()?;
    if actions.is_empty() {
        return Err(ParseError::NoActions);
    }

    Ok(Rigfile {
        name: raw.name,
        interval: effective_interval(raw.interval),
        delay: raw.delay.unwrap_or(0),
        repeat: raw.repeat.unwrap_or(0),
        repeat_delay: raw.repeat_delay.unwrap_or(0),
        no_archive: raw.no_archive.unwrap_or(false),
        monitors,
        actions,
    })
}

/// Clamp the requested interval to whole seconds, minimum 1.
fn effective_interval(requested: Option<f64>) -> u64 {
    let Some(raw) = requested else {
        return 1;
    };
    if !raw.is_finite() || raw < 1.0 {
        warn!(requested = raw, "interval below the 1s minimum, clamping to 1s");
        return 1;
    }
    if raw.fract() != 0.0 {
        warn!(requested = raw, "fractional interval truncated to whole seconds");
    }
    raw.trunc() as u64
}

fn monitor_entry(key: &str, value: serde_yaml::Value) -> Result<MonitorSpec, ParseError> {
    let value = normalize(value);
    let spec = match key {
        "logs" => MonitorSpec::Logs(serde_yaml::from_value::<LogsConfig>(value)?),
        "process" => MonitorSpec::Process(serde_yaml::from_value::<ProcessConfig>(value)?),
        "filesystem" => MonitorSpec::Filesystem(serde_yaml::from_value::<FilesystemConfig>(value)?),
        other => return Err(ParseError::UnknownMonitor(other.to_string())),
    };
    match &spec {
        MonitorSpec::Logs(cfg) => cfg.validate()?,
        MonitorSpec::Process(cfg) => cfg.validate()?,
        MonitorSpec::Filesystem(cfg) => cfg.validate()?,
    }
    Ok(spec)
}

fn action_entry(key: &str, value: serde_yaml::Value) -> Result<ActionSpec, ParseError> {
    let value = normalize(value);
    let spec = match key {
        "gcore" => ActionSpec::Gcore(serde_yaml::from_value::<GcoreConfig>(value)?),
        "tcpdump" => ActionSpec::Tcpdump(serde_yaml::from_value::<TcpdumpConfig>(value)?),
        "watch" => ActionSpec::Watch(serde_yaml::from_value::<WatchConfig>(value)?),
        "sos" => ActionSpec::Sos(serde_yaml::from_value::<SosConfig>(value)?),
        "noop" => ActionSpec::Noop(serde_yaml::from_value::<NoopConfig>(value)?),
        "kdump" => ActionSpec::Kdump(serde_yaml::from_value::<KdumpConfig>(value)?),
        other => return Err(ParseError::UnknownAction(other.to_string())),
    };
    match &spec {
        ActionSpec::Gcore(cfg) => cfg.validate()?,
        ActionSpec::Tcpdump(cfg) => cfg.validate()?,
        ActionSpec::Watch(cfg) => cfg.validate()?,
        ActionSpec::Sos(cfg) => cfg.validate()?,
        ActionSpec::Noop(_) | ActionSpec::Kdump(_) => {}
    }
    Ok(spec)
}

/// Treat a bare `plugin:` key (YAML null) as an empty option mapping.
fn normalize(value: serde_yaml::Value) -> serde_yaml::Value {
    if value.is_null() {
        serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
    } else {
        value
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitor instances.
//!
//! A monitor is a configured, stateful watcher. `poll()` reads host state
//! and never writes into the rig's working directory; a monitor trips at
//! most once and stays tripped.

use async_trait::async_trait;
use rig_core::TriggerRecord;
use thiserror::Error;

mod filesystem;
mod logs;
mod process;

pub use filesystem::FilesystemMonitor;
pub use logs::LogsMonitor;
pub use process::ProcessMonitor;

/// Errors surfaced by monitor instances.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Deployment-time failure (fatal for the rig).
    #[error("{0}")]
    Start(String),

    /// Transient poll failure; retried on the next tick.
    #[error("{0}")]
    Poll(String),

    /// Every source this monitor had is gone; it can never trip.
    #[error("all sources lost")]
    SourcesExhausted,
}

/// Capability set every monitor implements.
#[async_trait]
pub trait Monitor: Send {
    /// Stable plugin name.
    fn name(&self) -> &'static str;

    /// Open sources and position at "now".
    async fn start(&mut self) -> Result<(), MonitorError>;

    /// One tick: returns evidence when the condition became true.
    async fn poll(&mut self) -> Result<Option<TriggerRecord>, MonitorError>;

    /// Release sources. Idempotent.
    async fn stop(&mut self) {}
}

/// RFC 3339 timestamp for trigger evidence.
pub(crate) fn now_stamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Clip evidence excerpts to a displayable length.
pub(crate) fn clip(line: &str, max: usize) -> &str {
    match line.char_indices().nth(max) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

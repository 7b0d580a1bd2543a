// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action instances.
//!
//! An action is a configured collector. Ordinary actions run once (or
//! repeatedly) after the trigger; pre-trigger actions start at deployment
//! and are stopped at trigger time. `probe` runs before polling begins and
//! its failure aborts deployment.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

mod gcore;
mod kdump;
mod noop;
mod sos;
mod tcpdump;
mod watch;

pub use gcore::GcoreAction;
pub use kdump::KdumpAction;
pub use noop::NoopAction;
pub use sos::SosAction;
pub use tcpdump::TcpdumpAction;
pub use watch::WatchAction;

/// Errors surfaced by action instances.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The action failed; it is logged and skipped, later actions still run.
    #[error("{0}")]
    Failed(String),

    /// The rig cannot continue (kdump only).
    #[error("{0}")]
    Fatal(String),

    /// A force-destroy cancelled the in-flight subprocess.
    #[error("cancelled")]
    Cancelled,
}

/// Execution context handed to every action call.
pub struct ActionCtx {
    /// The rig's working directory; every action writes disjoint filenames
    /// beneath it.
    pub workdir: PathBuf,
    /// The rig polling interval in seconds (drives `watch` sampling).
    pub interval: u64,
    /// Post-trigger delay in seconds.
    pub delay: u64,
    /// Fired on force-destroy and on termination signals.
    pub cancel: CancellationToken,
}

/// Capability set every action implements.
///
/// `run` is only invoked for actions that collect after the trigger;
/// pre-trigger collectors do their work between `pre_start` and `stop`.
#[async_trait]
pub trait Action: Send + Sync {
    /// Stable plugin name.
    fn name(&self) -> &'static str;

    /// Deployment feasibility probe. Failure is fatal for the rig.
    async fn probe(&self, _ctx: &ActionCtx) -> Result<(), ActionError> {
        Ok(())
    }

    /// Start pre-trigger collection at deployment.
    async fn pre_start(&mut self, _ctx: &ActionCtx) -> Result<(), ActionError> {
        Ok(())
    }

    /// Collect once, post-trigger.
    async fn run(&mut self, ctx: &ActionCtx) -> Result<(), ActionError>;

    /// Stop pre-trigger collection. Idempotent.
    async fn stop(&mut self, _ctx: &ActionCtx) {}
}

/// RFC 3339 timestamp for output records.
pub(crate) fn now_stamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

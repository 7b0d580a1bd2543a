// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sos` action: host diagnostics via `sos report` / `sos collect`.

use async_trait::async_trait;
use rig_rigfile::SosConfig;
use tokio::process::Command;
use tracing::{info, warn};

use super::{Action, ActionCtx, ActionError};
use crate::adapters::subprocess::{run_cancellable, run_with_timeout, RunError, SOS_TIMEOUT};

pub struct SosAction {
    cfg: SosConfig,
}

impl SosAction {
    pub fn new(cfg: SosConfig) -> Self {
        Self { cfg }
    }

    fn command(&self, ctx: &ActionCtx) -> Command {
        let mut cmd = Command::new("sos");
        cmd.arg(self.cfg.mode().as_str())
            .arg("--batch")
            .arg("--tmp-dir")
            .arg(&ctx.workdir);
        cmd
    }
}

#[async_trait]
impl Action for SosAction {
    fn name(&self) -> &'static str {
        "sos"
    }

    async fn probe(&self, _ctx: &ActionCtx) -> Result<(), ActionError> {
        which::which("sos")
            .map(|_| ())
            .map_err(|_| ActionError::Failed("sos binary not found".to_string()))
    }

    /// The `initial_archive` run. Its failure is logged, not fatal.
    async fn pre_start(&mut self, ctx: &ActionCtx) -> Result<(), ActionError> {
        if !self.cfg.initial_archive {
            return Ok(());
        }
        match run_with_timeout(self.command(ctx), SOS_TIMEOUT, "initial sos").await {
            Ok(output) if output.status.success() => {
                info!(mode = self.cfg.mode().as_str(), "initial sos archive written");
            }
            Ok(output) => {
                warn!(status = %output.status, "initial sos failed, continuing deployment");
            }
            Err(e) => {
                warn!(error = %e, "initial sos failed, continuing deployment");
            }
        }
        Ok(())
    }

    async fn run(&mut self, ctx: &ActionCtx) -> Result<(), ActionError> {
        let description = format!("sos {}", self.cfg.mode().as_str());
        match run_cancellable(self.command(ctx), SOS_TIMEOUT, &ctx.cancel, &description).await {
            Ok(output) if output.status.success() => {
                info!(mode = self.cfg.mode().as_str(), "sos archive written");
                Ok(())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ActionError::Failed(format!(
                    "{} exited {}: {}",
                    description,
                    output.status,
                    stderr.trim()
                )))
            }
            Err(RunError::Cancelled) => Err(ActionError::Cancelled),
            Err(RunError::Failed(e)) => Err(ActionError::Failed(e)),
        }
    }
}

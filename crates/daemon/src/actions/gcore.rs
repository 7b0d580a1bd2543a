// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gcore` action: core-dump the configured processes.

use async_trait::async_trait;
use nix::sys::signal::Signal;
use rig_rigfile::GcoreConfig;
use tokio::process::Command;
use tracing::{info, warn};

use super::{Action, ActionCtx, ActionError};
use crate::adapters::proc_sample::{resolve_selectors, ProcSampler};
use crate::adapters::subprocess::{run_cancellable, send_signal, RunError, DUMP_TIMEOUT};

pub struct GcoreAction {
    cfg: GcoreConfig,
    iteration: u32,
}

impl GcoreAction {
    pub fn new(cfg: GcoreConfig) -> Self {
        Self { cfg, iteration: 0 }
    }
}

#[async_trait]
impl Action for GcoreAction {
    fn name(&self) -> &'static str {
        "gcore"
    }

    async fn probe(&self, _ctx: &ActionCtx) -> Result<(), ActionError> {
        which::which("gcore")
            .map(|_| ())
            .map_err(|_| ActionError::Failed("gcore binary not found".to_string()))
    }

    async fn run(&mut self, ctx: &ActionCtx) -> Result<(), ActionError> {
        // Names resolve to PIDs at execution time; one dump per PID.
        let sampler = ProcSampler::new();
        let targets = resolve_selectors(&sampler, &self.cfg.procs);
        if targets.is_empty() {
            return Err(ActionError::Failed("no matching processes to dump".to_string()));
        }

        let iteration = self.iteration;
        self.iteration += 1;

        let mut failures: Vec<String> = Vec::new();
        for (pid, label) in targets {
            if self.cfg.freeze {
                send_signal(pid, Signal::SIGSTOP);
            }

            let prefix = ctx.workdir.join(format!("gcore.{}", iteration));
            let mut cmd = Command::new("gcore");
            cmd.arg("-o").arg(&prefix).arg(pid.to_string());
            let result =
                run_cancellable(cmd, DUMP_TIMEOUT, &ctx.cancel, "gcore").await;

            // The stop/cont pair is balanced even when the dump fails.
            if self.cfg.freeze {
                send_signal(pid, Signal::SIGCONT);
            }

            match result {
                Ok(output) if output.status.success() => {
                    info!(proc = %label, iteration, "core dump written");
                }
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    failures.push(format!(
                        "gcore of {} exited {}: {}",
                        label,
                        output.status,
                        stderr.trim()
                    ));
                }
                Err(RunError::Cancelled) => return Err(ActionError::Cancelled),
                Err(RunError::Failed(e)) => failures.push(e),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            warn!(count = failures.len(), "gcore had dump failures");
            Err(ActionError::Failed(failures.join("; ")))
        }
    }
}

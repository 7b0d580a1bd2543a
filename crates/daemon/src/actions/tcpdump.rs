// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tcpdump` action: rolling packet capture for the life of the rig.

use std::path::Path;

use async_trait::async_trait;
use rig_rigfile::TcpdumpConfig;
use tokio::process::Command;
use tracing::info;

use super::{Action, ActionCtx, ActionError};
use crate::adapters::subprocess::SupervisedChild;
use crate::env::stop_grace;

pub struct TcpdumpAction {
    cfg: TcpdumpConfig,
    child: Option<SupervisedChild>,
}

impl TcpdumpAction {
    pub fn new(cfg: TcpdumpConfig) -> Self {
        Self { cfg, child: None }
    }

    fn interface_exists(&self) -> bool {
        self.cfg.interface == "any"
            || Path::new("/sys/class/net").join(&self.cfg.interface).exists()
    }
}

#[async_trait]
impl Action for TcpdumpAction {
    fn name(&self) -> &'static str {
        "tcpdump"
    }

    async fn probe(&self, _ctx: &ActionCtx) -> Result<(), ActionError> {
        which::which("tcpdump")
            .map_err(|_| ActionError::Failed("tcpdump binary not found".to_string()))?;
        if !self.interface_exists() {
            return Err(ActionError::Failed(format!(
                "interface {} does not exist",
                self.cfg.interface
            )));
        }
        Ok(())
    }

    async fn pre_start(&mut self, ctx: &ActionCtx) -> Result<(), ActionError> {
        let out = ctx.workdir.join(format!("tcpdump-{}.pcap", self.cfg.interface));
        let mut cmd = Command::new("tcpdump");
        cmd.arg("-i")
            .arg(&self.cfg.interface)
            .arg("-w")
            .arg(&out)
            .arg("-W")
            .arg(self.cfg.capture_count.to_string())
            .arg("-C")
            .arg(self.cfg.capture_size.to_string());
        if self.cfg.snapshot_length > 0 {
            cmd.arg("-s").arg(self.cfg.snapshot_length.to_string());
        }
        if let Some(expression) = &self.cfg.expression {
            cmd.args(expression.split_whitespace());
        }
        cmd.stdout(std::process::Stdio::null()).stderr(std::process::Stdio::null());

        let child = SupervisedChild::spawn(cmd, "tcpdump")
            .map_err(|e| ActionError::Failed(format!("spawning tcpdump: {}", e)))?;
        info!(interface = %self.cfg.interface, out = %out.display(), "capture started");
        self.child = Some(child);
        Ok(())
    }

    // Collection happened before the trigger; nothing runs afterwards.
    async fn run(&mut self, _ctx: &ActionCtx) -> Result<(), ActionError> {
        Ok(())
    }

    async fn stop(&mut self, _ctx: &ActionCtx) {
        if let Some(child) = self.child.take() {
            child.stop(stop_grace()).await;
            info!(interface = %self.cfg.interface, "capture stopped");
        }
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kdump` action: crash the kernel into the dump capture path.
//!
//! Always last by weight. Success reboots the host and never returns;
//! failure is fatal for the rig — there is no soft recovery from a
//! half-initiated crash dump.

use async_trait::async_trait;
use tracing::info;

use super::{Action, ActionCtx, ActionError};

const CRASH_LOADED: &str = "/sys/kernel/kexec_crash_loaded";
const SYSRQ_ENABLE: &str = "/proc/sys/kernel/sysrq";
const SYSRQ_TRIGGER: &str = "/proc/sysrq-trigger";

pub struct KdumpAction;

#[async_trait]
impl Action for KdumpAction {
    fn name(&self) -> &'static str {
        "kdump"
    }

    async fn probe(&self, _ctx: &ActionCtx) -> Result<(), ActionError> {
        match std::fs::read_to_string(CRASH_LOADED) {
            Ok(content) if content.trim() == "1" => Ok(()),
            Ok(_) => Err(ActionError::Failed("no crash kernel loaded".to_string())),
            Err(e) => Err(ActionError::Failed(format!("cannot read {}: {}", CRASH_LOADED, e))),
        }
    }

    async fn run(&mut self, _ctx: &ActionCtx) -> Result<(), ActionError> {
        info!("triggering kernel crash dump");
        std::fs::write(SYSRQ_ENABLE, "1")
            .map_err(|e| ActionError::Fatal(format!("enabling sysrq: {}", e)))?;
        std::fs::write(SYSRQ_TRIGGER, "c")
            .map_err(|e| ActionError::Fatal(format!("raising sysrq-c: {}", e)))?;
        // The write above reboots the host; reaching this point means the
        // trigger was accepted but the crash has not landed yet.
        Ok(())
    }
}

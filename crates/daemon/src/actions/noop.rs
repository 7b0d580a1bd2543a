// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `noop` action: writes a marker file. Testing only.

use std::io::Write;

use async_trait::async_trait;

use super::{now_stamp, Action, ActionCtx, ActionError};

pub struct NoopAction;

#[async_trait]
impl Action for NoopAction {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn run(&mut self, ctx: &ActionCtx) -> Result<(), ActionError> {
        let out = ctx.workdir.join("noop.out");
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&out)
            .map_err(|e| ActionError::Failed(format!("opening {}: {}", out.display(), e)))?;
        writeln!(file, "noop ran at {}", now_stamp())
            .map_err(|e| ActionError::Failed(format!("writing {}: {}", out.display(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;

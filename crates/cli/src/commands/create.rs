// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rig create`: validate a rigfile and deploy it as a detached rig.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::client::{poll_interval, timeout_connect, RigClient};
use crate::exit_error::ExitError;
use crate::rig_process;

#[derive(Args)]
pub struct CreateArgs {
    /// Rigfile to deploy
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: PathBuf,
}

pub async fn handle(args: CreateArgs) -> Result<()> {
    // Validate before anything is spawned; schema violations exit 2.
    let cfg = rig_rigfile::parse_file(&args.file)
        .map_err(|e| ExitError::config(format!("invalid rigfile: {}", e)))?;

    let name = cfg.name.clone().unwrap_or_else(rig_core::name::generate);

    let client = RigClient::for_name(&name);
    if client.ping().await {
        return Err(ExitError::deploy(format!("a rig named '{}' is already running", name)).into());
    }

    let rigfile = std::fs::canonicalize(&args.file)
        .map_err(|e| ExitError::config(format!("cannot resolve {}: {}", args.file.display(), e)))?;
    let mut child = rig_process::spawn_rigd(&rigfile, &name)
        .map_err(|e| ExitError::deploy(format!("cannot start rigd: {}", e)))?;

    // Wait for the rig to come up, surfacing an early daemon exit with
    // its own exit code and logged error.
    let deadline = Instant::now() + timeout_connect();
    loop {
        if let Ok(Some(status)) = child.try_wait() {
            if status.success() {
                // The rig already ran to completion (instant trigger).
                break;
            }
            let code = status.code().unwrap_or(5);
            let detail = rig_process::read_startup_error(&name)
                .unwrap_or_else(|| format!("rig daemon exited with {}", status));
            return Err(ExitError::new(code, detail).into());
        }

        if let Ok(report) = client.status().await {
            if report.phase.is_ready() {
                break;
            }
        }

        if Instant::now() >= deadline {
            return Err(ExitError::deploy("timed out waiting for rig to deploy").into());
        }
        tokio::time::sleep(poll_interval()).await;
    }

    println!("{}", name);
    Ok(())
}

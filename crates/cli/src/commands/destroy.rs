// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rig destroy`: send destroy to one rig or fan out to all of them.

use anyhow::Result;
use clap::Args;

use crate::client::{discover, ClientError, RigClient};
use crate::exit_error::ExitError;

#[derive(Args)]
pub struct DestroyArgs {
    /// Rig name, or `all` to target every deployed rig
    #[arg(short = 'i', long = "id", value_name = "NAME|all")]
    pub id: String,

    /// Kill in-flight collection instead of waiting, and remove stale sockets
    #[arg(long)]
    pub force: bool,
}

pub async fn handle(args: DestroyArgs) -> Result<()> {
    let targets = if args.id == "all" { discover()? } else { vec![args.id.clone()] };
    if targets.is_empty() {
        println!("no rigs deployed");
        return Ok(());
    }

    let mut failures = 0usize;
    for name in targets {
        if destroy_one(&name, args.force).await {
            continue;
        }
        failures += 1;
    }

    if failures > 0 {
        return Err(ExitError::new(1, format!("{} rig(s) could not be destroyed", failures)).into());
    }
    Ok(())
}

/// Destroy one rig; true on success (including stale cleanup with --force).
async fn destroy_one(name: &str, force: bool) -> bool {
    let client = RigClient::for_name(name);
    match client.destroy(force).await {
        Ok(()) => {
            println!("{} destroyed", name);
            true
        }
        Err(ClientError::Rejected(err)) => {
            eprintln!("{}: {}", name, err);
            false
        }
        Err(_) => {
            // Not answering: either a stale socket or no rig at all.
            let socket = rig_core::paths::socket_path(name);
            if !socket.exists() {
                eprintln!("{}: no such rig", name);
                return false;
            }
            if force {
                let _ = std::fs::remove_file(&socket);
                println!("{} stale socket removed", name);
                true
            } else {
                eprintln!("{}: not responding (stale socket; use --force to remove)", name);
                false
            }
        }
    }
}

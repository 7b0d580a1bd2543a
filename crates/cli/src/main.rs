// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rig - host-local diagnostic automation
//!
//! `create` deploys a detached rig daemon from a rigfile; `list` and
//! `destroy` speak to deployed rigs over their control sockets.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod exit_error;
mod rig_process;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{create, destroy, list};
use exit_error::ExitError;

#[derive(Parser)]
#[command(name = "rig", version, about = "Host-local diagnostic automation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a rig from a rigfile
    Create(create::CreateArgs),
    /// List deployed rigs
    List,
    /// Destroy one or more deployed rigs
    Destroy(destroy::DestroyArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e.downcast_ref::<ExitError>().map_or(1, |c| c.code);
        let message = e.to_string();
        if !message.is_empty() {
            eprintln!("Error: {}", message);
        }
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Everything rig does touches host-global state; refuse without root.
    if !nix::unistd::geteuid().is_root() {
        return Err(ExitError::not_root().into());
    }

    match cli.command {
        Commands::Create(args) => create::handle(args).await,
        Commands::List => list::handle().await,
        Commands::Destroy(args) => destroy::handle(args).await,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

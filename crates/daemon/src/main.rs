// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rig Daemon (rigd)
//!
//! Detached supervisor process for one deployed rig. Typically started by
//! the `rig` CLI, which waits for the control socket to answer before
//! reporting success.

use std::path::PathBuf;
use std::process::ExitCode;

use rig_daemon::{Outcome, Supervisor};
use tracing::{error, info};

/// Startup marker prefix written to the log before anything else.
/// The CLI uses this to find where the current startup attempt begins.
/// Full format: "--- rigd: starting (pid: 12345) ---"
const STARTUP_MARKER_PREFIX: &str = "--- rigd: starting (pid: ";

struct Args {
    file: PathBuf,
    name: Option<String>,
}

fn usage() -> ! {
    eprintln!("Usage: rigd --file <rigfile> [--name <name>]");
    std::process::exit(2);
}

fn parse_args() -> Args {
    let mut file = None;
    let mut name = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("rigd {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" | "help" => {
                println!("rigd {}", env!("CARGO_PKG_VERSION"));
                println!("Rig Daemon - detached supervisor for one deployed rig");
                println!();
                println!("USAGE:");
                println!("    rigd --file <rigfile> [--name <name>]");
                println!();
                println!("The daemon is typically started by the `rig` CLI and should not");
                println!("be invoked directly. It listens on a per-rig Unix socket for");
                println!("status and destroy requests from `rig`.");
                println!();
                println!("OPTIONS:");
                println!("    -f, --file <PATH>    Rigfile to deploy");
                println!("    -n, --name <NAME>    Rig name (overrides the rigfile)");
                println!("    -h, --help           Print help information");
                println!("    -v, --version        Print version information");
                std::process::exit(0);
            }
            "--file" | "-f" => file = args.next().map(PathBuf::from),
            "--name" | "-n" => name = args.next(),
            other => {
                eprintln!("error: unexpected argument '{other}'");
                usage();
            }
        }
    }
    let Some(file) = file else { usage() };
    Args { file, name }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = parse_args();

    if !nix::unistd::geteuid().is_root() {
        eprintln!("rigd must run as root");
        return ExitCode::from(1);
    }

    let cfg = match rig_rigfile::parse_file(&args.file) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return ExitCode::from(2);
        }
    };

    let name = match args.name.or_else(|| cfg.name.clone()) {
        Some(name) => name,
        None => rig_core::name::generate(),
    };

    let log_path = rig_core::paths::daemon_log_path(&name);
    if let Err(e) = write_startup_marker(&log_path) {
        eprintln!("cannot write daemon log {}: {}", log_path.display(), e);
        return ExitCode::from(3);
    }
    let log_guard = match setup_logging(&log_path) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("cannot set up logging: {}", e);
            return ExitCode::from(3);
        }
    };

    info!(name = %name, rigfile = %args.file.display(), "starting rig");

    let code = match Supervisor::new(cfg, name).run().await {
        Ok(Outcome::Finished) => {
            info!("rig finished");
            0
        }
        Ok(Outcome::Destroyed) => {
            info!("rig destroyed");
            4
        }
        Err(e) => {
            // Also written synchronously so the CLI can report it even if
            // the non-blocking writer has not flushed yet.
            write_startup_error(&log_path, &e.to_string());
            error!("{}", e);
            e.exit_code()
        }
    };

    drop(log_guard);
    ExitCode::from(code as u8)
}

/// Append the startup marker to the log file (before tracing setup, so the
/// CLI can find where this attempt begins).
fn write_startup_marker(log_path: &std::path::Path) -> std::io::Result<()> {
    use std::io::Write;

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(log_path)?;
    writeln!(file, "{}{}) ---\n", STARTUP_MARKER_PREFIX, std::process::id())?;
    Ok(())
}

/// Write an error synchronously to the log file.
fn write_startup_error(log_path: &std::path::Path, error: &str) {
    use std::io::Write;

    let Ok(mut file) =
        std::fs::OpenOptions::new().create(true).append(true).open(log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR {}", error);
}

fn setup_logging(
    log_path: &std::path::Path,
) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = log_path.parent().unwrap_or_else(|| std::path::Path::new("."));
    let file_name = log_path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("rigd.log"));
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}

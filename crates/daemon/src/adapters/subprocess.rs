// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers.

use std::process::Output;
use std::time::Duration;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Default timeout for feasibility probes at deployment.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for journal reads and watch samples.
pub const SAMPLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for a single core dump.
pub const DUMP_TIMEOUT: Duration = Duration::from_secs(120);

/// Default timeout for an sos run; sos is slow by nature.
pub const SOS_TIMEOUT: Duration = Duration::from_secs(1800);

/// Why a supervised run did not produce an [`Output`].
#[derive(Debug)]
pub enum RunError {
    /// Spawn failure, nonzero-independent I/O failure, or timeout.
    Failed(String),
    /// The caller's cancellation token fired.
    Cancelled,
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Failed(msg) => f.write_str(msg),
            RunError::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Run a subprocess command with a timeout.
///
/// Wraps `Command::output()` with `tokio::time::timeout`, converting
/// timeout expiration into a descriptive error message. The child process
/// is killed when the timeout elapses.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(format!("{} timed out after {}s", description, timeout.as_secs())),
    }
}

/// Run a subprocess command, killing it if `cancel` fires first.
pub async fn run_cancellable(
    cmd: Command,
    timeout: Duration,
    cancel: &CancellationToken,
    description: &str,
) -> Result<Output, RunError> {
    tokio::select! {
        result = run_with_timeout(cmd, timeout, description) => result.map_err(RunError::Failed),
        _ = cancel.cancelled() => Err(RunError::Cancelled),
    }
}

/// Send a signal to a PID, ignoring delivery failures (the target may have
/// exited already).
pub fn send_signal(pid: u32, signal: Signal) {
    let _ = kill(Pid::from_raw(pid as i32), signal);
}

/// A long-lived collector child with cooperative shutdown.
pub struct SupervisedChild {
    child: tokio::process::Child,
    description: String,
}

impl SupervisedChild {
    /// Spawn the command with null stdin and kill-on-drop armed.
    pub fn spawn(mut cmd: Command, description: &str) -> std::io::Result<Self> {
        cmd.stdin(std::process::Stdio::null()).kill_on_drop(true);
        Ok(Self { child: cmd.spawn()?, description: description.to_string() })
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// SIGTERM, wait out the grace window, then SIGKILL whatever remains.
    pub async fn stop(mut self, grace: Duration) {
        if let Some(pid) = self.child.id() {
            send_signal(pid, Signal::SIGTERM);
        }
        match tokio::time::timeout(grace, self.child.wait()).await {
            Ok(_) => {}
            Err(_elapsed) => {
                warn!(child = %self.description, grace_s = grace.as_secs(), "grace expired, killing");
                let _ = self.child.start_kill();
                let _ = self.child.wait().await;
            }
        }
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;

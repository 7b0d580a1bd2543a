// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment knobs for the rig daemon.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Timeout for a single control-socket read or write (`RIG_IPC_TIMEOUT_MS`).
pub fn ipc_timeout() -> Duration {
    parse_duration_ms("RIG_IPC_TIMEOUT_MS").unwrap_or(rig_wire::DEFAULT_TIMEOUT)
}

/// Grace window between SIGTERM and SIGKILL when stopping a collector
/// (`RIG_STOP_GRACE_MS`, default 10 s).
pub fn stop_grace() -> Duration {
    parse_duration_ms("RIG_STOP_GRACE_MS").unwrap_or(Duration::from_secs(10))
}

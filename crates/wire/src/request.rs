// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Administrative requests accepted on a rig's control socket.

use serde::{Deserialize, Serialize};

/// A single `{"op": …}` request line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Liveness probe; used by `rig list` discovery.
    Ping,

    /// Full status report.
    Status,

    /// Initiate shutdown. `force` kills any in-flight action subprocess
    /// instead of letting it finish.
    Destroy {
        #[serde(default)]
        force: bool,
    },
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

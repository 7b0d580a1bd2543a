// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Well-known filesystem layout.
//!
//! Working directories and archives live under the tmp base, control
//! sockets under the run base. Both are overridable through the
//! environment, which is also what lets the integration tests run inside a
//! scratch directory.

use std::path::PathBuf;

/// Default base for working directories, daemon logs, and archives.
pub const DEFAULT_TMP_BASE: &str = "/var/tmp/rig";

/// Default base for per-rig control sockets.
pub const DEFAULT_RUN_BASE: &str = "/var/run/rig";

/// Environment override for [`tmp_base`].
pub const TMP_DIR_ENV: &str = "RIG_TMP_DIR";

/// Environment override for [`run_base`].
pub const RUN_DIR_ENV: &str = "RIG_RUN_DIR";

/// Base directory for working directories and archives.
pub fn tmp_base() -> PathBuf {
    match std::env::var(TMP_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_TMP_BASE),
    }
}

/// Base directory for control sockets.
pub fn run_base() -> PathBuf {
    match std::env::var(RUN_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_RUN_BASE),
    }
}

/// The rig's private working directory: `<tmp_base>/<name>/`.
pub fn workdir(name: &str) -> PathBuf {
    tmp_base().join(name)
}

/// The rig's control socket: `<run_base>/<name>.sock`.
pub fn socket_path(name: &str) -> PathBuf {
    run_base().join(format!("{}.sock", name))
}

/// The daemon log: `<tmp_base>/<name>.log`.
///
/// Kept outside the working directory so it survives cleanup and is not
/// rolled into the archive.
pub fn daemon_log_path(name: &str) -> PathBuf {
    tmp_base().join(format!("{}.log", name))
}

/// The archive destination: `<tmp_base>/<name>-<stamp>.tar.gz`.
pub fn archive_path(name: &str, stamp: &str) -> PathBuf {
    tmp_base().join(format!("{}-{}.tar.gz", name, stamp))
}

/// Extract the rig name from a socket file name (`webfarm.sock` → `webfarm`).
pub fn name_from_socket(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(".sock").filter(|n| !n.is_empty())
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;

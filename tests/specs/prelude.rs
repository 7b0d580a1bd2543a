// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for behavioral specs.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use assert_cmd::Command;
use tempfile::TempDir;

/// True when the suite runs with effective UID 0.
pub fn is_root() -> bool {
    std::process::Command::new("id")
        .arg("-u")
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).trim() == "0")
        .unwrap_or(false)
}

/// Scratch bases for one spec: working dirs, sockets, and the daemon
/// binary override all point into a private tempdir.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("tmp")).unwrap();
        std::fs::create_dir_all(dir.path().join("run")).unwrap();
        Self { dir }
    }

    pub fn tmp_base(&self) -> PathBuf {
        self.dir.path().join("tmp")
    }

    pub fn run_base(&self) -> PathBuf {
        self.dir.path().join("run")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The `rig` binary wired to this scratch environment.
    pub fn rig(&self) -> Command {
        let mut cmd = Command::cargo_bin("rig").unwrap();
        cmd.env("RIG_TMP_DIR", self.tmp_base())
            .env("RIG_RUN_DIR", self.run_base())
            .env("RIG_DAEMON_BINARY", assert_cmd::cargo::cargo_bin("rigd"))
            .timeout(Duration::from_secs(30));
        cmd
    }

    /// Write a rigfile into the scratch dir and return its path.
    pub fn write_rigfile(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Archives currently present under the tmp base.
    pub fn archives(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.tmp_base())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.to_string_lossy().ends_with(".tar.gz"))
            .collect()
    }

    /// Poll until `check` passes or the deadline expires.
    pub fn wait_for(&self, what: &str, timeout: Duration, mut check: impl FnMut(&Self) -> bool) {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if check(self) {
                return;
            }
            std::thread::sleep(Duration::from_millis(100));
        }
        panic!("timed out waiting for {}", what);
    }
}

/// A minimal rigfile: logs monitor on `watched.log`, noop action.
pub fn logs_noop_rigfile(env: &TestEnv, name: &str, extra: &str) -> PathBuf {
    let log = env.path().join("watched.log");
    std::fs::write(&log, "").unwrap();
    env.write_rigfile(
        "rigfile.yaml",
        &format!(
            "name: {}\n{}monitors:\n  logs:\n    message: boom\n    files: [{}]\n    journals: null\nactions:\n  noop:\n",
            name,
            extra,
            log.display()
        ),
    )
}

/// Append a line to the watched log file.
pub fn append_watched(env: &TestEnv, line: &str) {
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(env.path().join("watched.log"))
        .unwrap();
    writeln!(file, "{}", line).unwrap();
}

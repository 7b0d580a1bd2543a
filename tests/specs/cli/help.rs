// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version output work without root.

use crate::prelude::TestEnv;

#[test]
fn help_lists_subcommands() {
    let env = TestEnv::new();
    let assert = env.rig().arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(out.contains("create"));
    assert!(out.contains("list"));
    assert!(out.contains("destroy"));
}

#[test]
fn version_prints_package_version() {
    let env = TestEnv::new();
    let assert = env.rig().arg("--version").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(out.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_subcommand_shows_usage() {
    let env = TestEnv::new();
    env.rig().assert().failure();
}

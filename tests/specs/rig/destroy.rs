// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Administrative destroy semantics.

use std::time::Duration;

use serial_test::serial;

use crate::prelude::{is_root, logs_noop_rigfile, TestEnv};

#[test]
#[serial]
fn destroy_stops_the_rig_and_cleans_up() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let rigfile = logs_noop_rigfile(&env, "spec-d", "");
    env.rig().args(["create", "-f"]).arg(&rigfile).assert().success();

    let assert = env.rig().args(["destroy", "-i", "spec-d"]).assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(out.contains("spec-d destroyed"));

    env.wait_for("socket removal", Duration::from_secs(5), |env| {
        !env.run_base().join("spec-d.sock").exists()
    });
    env.wait_for("workdir removal", Duration::from_secs(5), |env| {
        !env.tmp_base().join("spec-d").exists()
    });
    assert!(env.archives().is_empty());
}

#[test]
#[serial]
fn second_destroy_fails() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let rigfile = logs_noop_rigfile(&env, "spec-e", "");
    env.rig().args(["create", "-f"]).arg(&rigfile).assert().success();

    env.rig().args(["destroy", "-i", "spec-e"]).assert().success();
    env.wait_for("socket removal", Duration::from_secs(5), |env| {
        !env.run_base().join("spec-e.sock").exists()
    });
    env.rig().args(["destroy", "-i", "spec-e"]).assert().failure();
}

#[test]
#[serial]
fn destroy_unknown_rig_fails() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let assert = env.rig().args(["destroy", "-i", "ghost"]).assert().failure();
    let err = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(err.contains("no such rig"));
}

#[test]
#[serial]
fn destroy_all_with_nothing_deployed_succeeds() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    env.rig().args(["destroy", "-i", "all"]).assert().success();
}

#[test]
#[serial]
fn stale_socket_needs_force() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    std::fs::write(env.run_base().join("ghost.sock"), "").unwrap();

    env.rig().args(["destroy", "-i", "ghost"]).assert().failure();
    assert!(env.run_base().join("ghost.sock").exists());

    env.rig().args(["destroy", "-i", "ghost", "--force"]).assert().success();
    assert!(!env.run_base().join("ghost.sock").exists());
}

#[test]
#[serial]
fn destroy_all_fans_out_to_live_rigs() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();

    let log = env.path().join("watched.log");
    std::fs::write(&log, "").unwrap();
    for name in ["spec-f1", "spec-f2"] {
        let rigfile = env.write_rigfile(
            &format!("{}.yaml", name),
            &format!(
                "name: {}\nmonitors:\n  logs:\n    message: boom\n    files: [{}]\n    journals: null\nactions:\n  noop:\n",
                name,
                log.display()
            ),
        );
        env.rig().args(["create", "-f"]).arg(&rigfile).assert().success();
    }

    env.rig().args(["destroy", "-i", "all"]).assert().success();
    env.wait_for("all sockets removed", Duration::from_secs(5), |env| {
        std::fs::read_dir(env.run_base()).unwrap().next().is_none()
    });
}

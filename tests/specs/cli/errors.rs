// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Privilege and configuration error handling.

use crate::prelude::{is_root, TestEnv};

#[test]
fn refuses_to_run_without_root() {
    if is_root() {
        return;
    }
    let env = TestEnv::new();
    let assert = env.rig().arg("list").assert().failure().code(1);
    let err = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(err.contains("root"));
}

#[test]
fn missing_rigfile_exits_2() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    env.rig().args(["create", "-f", "/nonexistent/rigfile.yaml"]).assert().failure().code(2);
}

#[test]
fn invalid_yaml_exits_2() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let rigfile = env.write_rigfile("bad.yaml", "monitors: [not, a, mapping\n");
    env.rig().args(["create", "-f"]).arg(&rigfile).assert().failure().code(2);
}

#[test]
fn unknown_monitor_exits_2_with_its_name() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let rigfile = env.write_rigfile(
        "bad.yaml",
        "monitors:\n  temperature:\n    limit: 90\nactions:\n  noop:\n",
    );
    let assert = env.rig().args(["create", "-f"]).arg(&rigfile).assert().failure().code(2);
    let err = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(err.contains("temperature"));
}

#[test]
fn empty_actions_exits_2() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let rigfile =
        env.write_rigfile("bad.yaml", "monitors:\n  logs:\n    message: x\nactions: {}\n");
    env.rig().args(["create", "-f"]).arg(&rigfile).assert().failure().code(2);
}

#[test]
fn tcpdump_probe_failure_exits_3() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let rigfile = env.write_rigfile(
        "probe.yaml",
        "monitors:\n  logs:\n    message: x\n    journals: null\n    files: [/tmp/never.log]\nactions:\n  tcpdump:\n    interface: rig-test-no-such-iface\n",
    );
    let assert = env.rig().args(["create", "-f"]).arg(&rigfile).assert().failure().code(3);
    let err = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(err.contains("rig-test-no-such-iface") || err.contains("tcpdump"));
}

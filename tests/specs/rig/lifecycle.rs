// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full deploy → trigger → archive lifecycle.

use std::time::Duration;

use serial_test::serial;

use crate::prelude::{append_watched, is_root, logs_noop_rigfile, TestEnv};

#[test]
#[serial]
fn log_match_triggers_and_archives() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let rigfile = logs_noop_rigfile(&env, "spec-a", "");

    let assert = env.rig().args(["create", "-f"]).arg(&rigfile).assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(out.contains("spec-a"));

    // Deployed: the control socket exists and list shows it polling.
    assert!(env.run_base().join("spec-a.sock").exists());
    let assert = env.rig().arg("list").assert().success();
    let listed = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(listed.contains("spec-a"));
    assert!(listed.contains("polling"));

    // A non-matching line keeps it armed, the matching one trips it.
    append_watched(&env, "preboom");
    append_watched(&env, "boom occurred");

    env.wait_for("archive", Duration::from_secs(15), |env| !env.archives().is_empty());
    env.wait_for("socket removal", Duration::from_secs(5), |env| {
        !env.run_base().join("spec-a.sock").exists()
    });

    // The working directory was rolled into the archive.
    assert!(!env.tmp_base().join("spec-a").exists());
    let archives = env.archives();
    assert_eq!(archives.len(), 1);
    assert!(archives[0].to_string_lossy().contains("spec-a-"));

    // The archive holds the noop marker.
    let listing = std::process::Command::new("tar")
        .arg("-tzf")
        .arg(&archives[0])
        .output()
        .unwrap();
    let names = String::from_utf8_lossy(&listing.stdout).into_owned();
    assert!(names.contains("spec-a/noop.out"));
    assert!(names.contains("spec-a/rig-metadata.json"));
}

#[test]
#[serial]
fn no_archive_keeps_working_directory() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let rigfile = logs_noop_rigfile(&env, "spec-b", "no_archive: true\n");

    env.rig().args(["create", "-f"]).arg(&rigfile).assert().success();
    append_watched(&env, "boom");

    env.wait_for("noop output", Duration::from_secs(15), |env| {
        env.tmp_base().join("spec-b/noop.out").exists()
    });
    env.wait_for("socket removal", Duration::from_secs(5), |env| {
        !env.run_base().join("spec-b.sock").exists()
    });

    assert!(env.tmp_base().join("spec-b").exists());
    assert!(env.archives().is_empty());
}

#[test]
#[serial]
fn generated_names_are_used_when_rigfile_has_none() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let log = env.path().join("watched.log");
    std::fs::write(&log, "").unwrap();
    let rigfile = env.write_rigfile(
        "anon.yaml",
        &format!(
            "monitors:\n  logs:\n    message: boom\n    files: [{}]\n    journals: null\nactions:\n  noop:\n",
            log.display()
        ),
    );

    let assert = env.rig().args(["create", "-f"]).arg(&rigfile).assert().success();
    let name = String::from_utf8_lossy(&assert.get_output().stdout).trim().to_string();
    assert!(name.starts_with("rig-"), "generated name, got {:?}", name);
    assert!(env.run_base().join(format!("{}.sock", name)).exists());

    // Clean up the detached rig.
    env.rig().args(["destroy", "-i", &name]).assert().success();
}

#[test]
#[serial]
fn duplicate_name_is_rejected() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let rigfile = logs_noop_rigfile(&env, "spec-dup", "");

    env.rig().args(["create", "-f"]).arg(&rigfile).assert().success();
    env.rig().args(["create", "-f"]).arg(&rigfile).assert().failure().code(3);

    env.rig().args(["destroy", "-i", "spec-dup"]).assert().success();
}

#[test]
#[serial]
fn list_is_empty_and_successful_without_rigs() {
    if !is_root() {
        return;
    }
    let env = TestEnv::new();
    let assert = env.rig().arg("list").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(out.contains("no rigs deployed"));
}

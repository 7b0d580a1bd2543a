// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn defaults_without_env() {
    std::env::remove_var(TMP_DIR_ENV);
    std::env::remove_var(RUN_DIR_ENV);
    assert_eq!(tmp_base(), PathBuf::from(DEFAULT_TMP_BASE));
    assert_eq!(run_base(), PathBuf::from(DEFAULT_RUN_BASE));
    assert_eq!(workdir("w"), PathBuf::from("/var/tmp/rig/w"));
    assert_eq!(socket_path("w"), PathBuf::from("/var/run/rig/w.sock"));
    assert_eq!(daemon_log_path("w"), PathBuf::from("/var/tmp/rig/w.log"));
    assert_eq!(archive_path("w", "20260101-000000"), PathBuf::from("/var/tmp/rig/w-20260101-000000.tar.gz"));
}

#[test]
#[serial]
fn env_overrides_bases() {
    std::env::set_var(TMP_DIR_ENV, "/scratch/tmp");
    std::env::set_var(RUN_DIR_ENV, "/scratch/run");
    assert_eq!(workdir("x"), PathBuf::from("/scratch/tmp/x"));
    assert_eq!(socket_path("x"), PathBuf::from("/scratch/run/x.sock"));
    std::env::remove_var(TMP_DIR_ENV);
    std::env::remove_var(RUN_DIR_ENV);
}

#[test]
#[serial]
fn empty_env_falls_back_to_default() {
    std::env::set_var(TMP_DIR_ENV, "");
    assert_eq!(tmp_base(), PathBuf::from(DEFAULT_TMP_BASE));
    std::env::remove_var(TMP_DIR_ENV);
}

#[test]
fn socket_name_extraction() {
    assert_eq!(name_from_socket("webfarm.sock"), Some("webfarm"));
    assert_eq!(name_from_socket("a.b.sock"), Some("a.b"));
    assert_eq!(name_from_socket(".sock"), None);
    assert_eq!(name_from_socket("notasocket"), None);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;

#[test]
fn file_size_is_its_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pad");
    fs::write(&path, vec![0u8; 4096]).unwrap();
    assert_eq!(tree_size(&path).unwrap(), 4096);
}

#[test]
fn directory_size_sums_recursively() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), vec![0u8; 1000]).unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/b"), vec![0u8; 500]).unwrap();
    assert_eq!(tree_size(dir.path()).unwrap(), 1500);
}

#[test]
fn empty_directory_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(tree_size(dir.path()).unwrap(), 0);
}

#[test]
fn missing_path_is_an_error() {
    assert!(tree_size(Path::new("/nonexistent/path/xyz")).is_err());
}

#[test]
fn fs_usage_reports_sane_percentages() {
    let usage = fs_usage(Path::new("/")).unwrap();
    assert!(usage.used_percent >= 0.0);
    assert!(usage.used_percent <= 100.0);
}

#[test]
fn fs_usage_of_tempdir_matches_its_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let usage = fs_usage(dir.path()).unwrap();
    assert!(usage.used_percent <= 100.0);
}

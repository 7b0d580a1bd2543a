// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Instant;

#[tokio::test]
async fn captures_output() {
    let mut cmd = Command::new("echo");
    cmd.arg("hello");
    let out = run_with_timeout(cmd, Duration::from_secs(5), "echo").await.unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "hello");
}

#[tokio::test]
async fn times_out_and_kills() {
    let mut cmd = Command::new("sleep");
    cmd.arg("30");
    let start = Instant::now();
    let err = run_with_timeout(cmd, Duration::from_millis(100), "sleeper").await.unwrap_err();
    assert!(err.contains("timed out"));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn missing_binary_is_failed() {
    let cmd = Command::new("/nonexistent/binary");
    let err = run_with_timeout(cmd, Duration::from_secs(1), "ghost").await.unwrap_err();
    assert!(err.contains("ghost failed"));
}

#[tokio::test]
async fn cancellation_wins_over_long_run() {
    let token = CancellationToken::new();
    let mut cmd = Command::new("sleep");
    cmd.arg("30");
    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });
    let start = Instant::now();
    match run_cancellable(cmd, Duration::from_secs(30), &token, "sleeper").await {
        Err(RunError::Cancelled) => {}
        other => panic!("expected Cancelled, got {:?}", other.map(|_| ())),
    }
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn supervised_child_stops_within_grace() {
    let mut cmd = Command::new("sleep");
    cmd.arg("30");
    let child = SupervisedChild::spawn(cmd, "sleeper").unwrap();
    let pid = child.id().unwrap();
    let start = Instant::now();
    child.stop(Duration::from_secs(5)).await;
    assert!(start.elapsed() < Duration::from_secs(5));
    // The PID is gone (kill(0) fails) once the child is reaped.
    assert!(nix::sys::signal::kill(Pid::from_raw(pid as i32), None).is_err());
}

#[tokio::test]
async fn send_signal_to_dead_pid_is_harmless() {
    send_signal(i32::MAX as u32, Signal::SIGTERM);
}

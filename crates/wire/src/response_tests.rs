// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rig_core::Phase;

fn sample_report() -> StatusReport {
    StatusReport {
        name: "webfarm".to_string(),
        pid: 4242,
        phase: Phase::Polling,
        uptime_s: 17,
        trigger_source: None,
        monitors: vec![MonitorStatus { name: "logs".into(), state: "watching".into() }],
        actions: vec![ActionStatus { name: "noop".into(), state: "idle".into() }],
    }
}

#[test]
fn ack_wire_form() {
    assert_eq!(serde_json::to_string(&Response::ok()).unwrap(), r#"{"ok":true}"#);
}

#[test]
fn err_wire_form() {
    let json = serde_json::to_string(&Response::err("unknown op")).unwrap();
    assert_eq!(json, r#"{"ok":false,"err":"unknown op"}"#);
}

#[test]
fn untagged_decoding_separates_variants() {
    let ack: Response = serde_json::from_str(r#"{"ok":true}"#).unwrap();
    assert_eq!(ack, Response::Ack { ok: true });

    let err: Response = serde_json::from_str(r#"{"ok":false,"err":"not found"}"#).unwrap();
    assert_eq!(err, Response::err("not found"));
}

#[test]
fn status_report_roundtrip() {
    let report = sample_report();
    let json = serde_json::to_string(&Response::Status(Box::new(report.clone()))).unwrap();
    let back: Response = serde_json::from_str(&json).unwrap();
    match back {
        Response::Status(b) => assert_eq!(*b, report),
        other => panic!("expected status, got {:?}", other),
    }
}

#[test]
fn absent_trigger_source_is_omitted() {
    let json = serde_json::to_string(&sample_report()).unwrap();
    assert!(!json.contains("trigger_source"));
}

#[test]
fn trigger_source_present_when_tripped() {
    let mut report = sample_report();
    report.phase = Phase::Collecting;
    report.trigger_source = Some(rig_core::TriggerRecord::new(
        "logs",
        "matched \"boom\" in /tmp/t.log (1 hit)",
        "2026-01-01T00:00:00Z",
    ));
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains(r#""trigger_source""#));
    assert!(json.contains(r#""phase":"collecting""#));
}

#[test]
fn is_ok_covers_status_and_ack() {
    assert!(Response::ok().is_ok());
    assert!(Response::Status(Box::new(sample_report())).is_ok());
    assert!(!Response::err("x").is_ok());
}

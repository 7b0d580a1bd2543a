// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn shared() -> Arc<Shared> {
    Shared::new("t".to_string(), &["logs", "process"], &["gcore", "noop"])
}

fn record(summary: &str) -> TriggerRecord {
    TriggerRecord::new("logs", summary, "2026-01-01T00:00:00Z")
}

#[test]
fn initial_report() {
    let shared = shared();
    let report = shared.report();
    assert_eq!(report.name, "t");
    assert_eq!(report.phase, Phase::Initializing);
    assert!(report.trigger_source.is_none());
    assert_eq!(report.monitors.len(), 2);
    assert_eq!(report.monitors[0].state, "watching");
    assert_eq!(report.actions[1].state, "idle");
}

#[test]
fn trigger_latches_once() {
    let shared = shared();
    assert!(shared.latch_trigger(record("first")));
    assert!(!shared.latch_trigger(record("second")));

    let trigger = shared.trigger().unwrap();
    assert!(trigger.summary.contains("first"));

    let evidence = shared.evidence();
    assert_eq!(evidence.len(), 1);
    assert!(evidence[0].summary.contains("second"));
}

#[test]
fn destroy_is_idempotent() {
    let shared = shared();
    assert!(shared.mark_destroyed());
    assert!(!shared.mark_destroyed());
    assert!(shared.is_destroyed());
}

#[test]
fn state_updates_by_index() {
    let shared = shared();
    shared.set_monitor_state(0, "tripped");
    shared.set_action_state(1, "done");
    // Out-of-range indexes are ignored.
    shared.set_action_state(99, "done");

    let report = shared.report();
    assert_eq!(report.monitors[0].state, "tripped");
    assert_eq!(report.actions[1].state, "done");
}

#[test]
fn phase_transitions_visible_in_report() {
    let shared = shared();
    shared.set_phase(Phase::Polling);
    assert_eq!(shared.phase(), Phase::Polling);
    assert_eq!(shared.report().phase, Phase::Polling);
}

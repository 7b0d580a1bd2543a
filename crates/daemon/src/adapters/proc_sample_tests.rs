// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn finds_own_process() {
    let sampler = ProcSampler::new();
    let me = std::process::id();
    assert!(sampler.exists(me));

    let sample = sampler.sample(me).unwrap();
    assert!(!sample.name.is_empty());
    assert!(sample.rss > 0);
    assert!(is_alive_state(sample.state));
}

#[test]
fn nonexistent_pid_yields_nothing() {
    let sampler = ProcSampler::new();
    assert!(!sampler.exists(i32::MAX as u32));
    assert!(sampler.sample(i32::MAX as u32).is_none());
}

#[test]
fn resolves_pid_selectors() {
    let sampler = ProcSampler::new();
    let me = std::process::id();
    let resolved = resolve_selectors(&sampler, &[ProcSelector::Pid(me as i32)]);
    assert_eq!(resolved, vec![(me, me.to_string())]);
}

#[test]
fn missing_selectors_are_benign() {
    let sampler = ProcSampler::new();
    let resolved = resolve_selectors(
        &sampler,
        &[
            ProcSelector::Pid(i32::MAX),
            ProcSelector::Name("no-such-process-name-xyz".to_string()),
        ],
    );
    assert!(resolved.is_empty());
}

#[test]
fn name_resolution_labels_pid() {
    let sampler = ProcSampler::new();
    let me = std::process::id();
    let name = sampler.sample(me).unwrap().name;
    let resolved = resolve_selectors(&sampler, &[ProcSelector::Name(name.clone())]);
    assert!(resolved.iter().any(|(pid, label)| *pid == me && label.contains(&name)));
}

#[test]
fn total_memory_is_nonzero() {
    assert!(ProcSampler::new().total_memory() > 0);
}

#[test]
fn alive_state_classification() {
    assert!(is_alive_state(ProcState::Running));
    assert!(is_alive_state(ProcState::Sleeping));
    assert!(is_alive_state(ProcState::DiskSleep));
    assert!(!is_alive_state(ProcState::Stopped));
    assert!(!is_alive_state(ProcState::Zombie));
    assert!(!is_alive_state(ProcState::Dead));
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `process` monitor: per-PID resource and state thresholds.

use async_trait::async_trait;
use rig_core::TriggerRecord;
use rig_rigfile::{ProcState, ProcessConfig, StateMatcher};
use tracing::warn;

use super::{now_stamp, Monitor, MonitorError};
use crate::adapters::proc_sample::{is_alive_state, resolve_selectors, ProcSample, ProcSampler};

struct WatchedProc {
    pid: u32,
    label: String,
}

pub struct ProcessMonitor {
    cfg: ProcessConfig,
    matcher: Option<StateMatcher>,
    sampler: ProcSampler,
    watched: Vec<WatchedProc>,
}

impl ProcessMonitor {
    pub fn new(cfg: &ProcessConfig) -> Result<Self, MonitorError> {
        let matcher =
            cfg.state_matcher().map_err(|e| MonitorError::Start(e.to_string()))?;
        Ok(Self {
            cfg: cfg.clone(),
            matcher,
            sampler: ProcSampler::new(),
            watched: Vec::new(),
        })
    }

    /// An exited PID trips `!running` (and a literal `dead` match).
    fn trips_on_exit(&self) -> bool {
        self.matcher.is_some_and(|m| {
            (m.negated && m.state == ProcState::Running)
                || (!m.negated && m.state == ProcState::Dead)
        })
    }

    fn check_thresholds(&self, label: &str, sample: &ProcSample) -> Option<String> {
        if let Some(limit) = self.cfg.cpu_percent {
            if sample.cpu_percent >= limit {
                return Some(format!(
                    "process {} cpu {:.1}% (limit {}%)",
                    label, sample.cpu_percent, limit
                ));
            }
        }
        if let Some(limit) = self.cfg.memory_percent {
            let total = self.sampler.total_memory();
            if total > 0 {
                let pct = sample.rss as f64 * 100.0 / total as f64;
                if pct >= limit {
                    return Some(format!(
                        "process {} using {:.1}% of system memory (limit {}%)",
                        label, pct, limit
                    ));
                }
            }
        }
        if let Some(limit) = self.cfg.rss {
            if sample.rss >= limit {
                return Some(format!(
                    "process {} rss {} (limit {})",
                    label,
                    rig_core::bytes::format_size(sample.rss),
                    rig_core::bytes::format_size(limit)
                ));
            }
        }
        if let Some(limit) = self.cfg.vms {
            if sample.vms >= limit {
                return Some(format!(
                    "process {} vms {} (limit {})",
                    label,
                    rig_core::bytes::format_size(sample.vms),
                    rig_core::bytes::format_size(limit)
                ));
            }
        }
        if let Some(matcher) = self.matcher {
            if state_matches(matcher, sample.state) {
                return Some(format!(
                    "process {} state {} (matches {})",
                    label,
                    sample.state.as_str(),
                    matcher
                ));
            }
        }
        None
    }
}

#[async_trait]
impl Monitor for ProcessMonitor {
    fn name(&self) -> &'static str {
        "process"
    }

    async fn start(&mut self) -> Result<(), MonitorError> {
        self.watched = resolve_selectors(&self.sampler, &self.cfg.procs)
            .into_iter()
            .map(|(pid, label)| WatchedProc { pid, label })
            .collect();
        Ok(())
    }

    async fn poll(&mut self) -> Result<Option<TriggerRecord>, MonitorError> {
        self.sampler.refresh();

        let mut tripped: Option<String> = None;
        let mut lost: Vec<usize> = Vec::new();

        for (i, watched) in self.watched.iter().enumerate() {
            match self.sampler.sample(watched.pid) {
                None => {
                    if self.trips_on_exit() {
                        tripped = Some(format!("process {} exited", watched.label));
                        break;
                    }
                    warn!(proc = %watched.label, "watched process disappeared");
                    lost.push(i);
                }
                Some(sample) => {
                    if let Some(summary) = self.check_thresholds(&watched.label, &sample) {
                        tripped = Some(summary);
                        break;
                    }
                }
            }
        }

        if let Some(summary) = tripped {
            return Ok(Some(TriggerRecord::new("process", summary, now_stamp())));
        }

        for i in lost.into_iter().rev() {
            self.watched.remove(i);
        }
        if self.watched.is_empty() && !self.cfg.procs.is_empty() {
            return Err(MonitorError::SourcesExhausted);
        }
        Ok(None)
    }
}

/// Evaluate a state predicate against an observed state.
///
/// `running` means alive-and-schedulable, so `!running` trips on stopped
/// and zombie processes but not on ordinary sleep.
fn state_matches(matcher: StateMatcher, observed: ProcState) -> bool {
    match (matcher.negated, matcher.state) {
        (false, ProcState::Running) => is_alive_state(observed),
        (true, ProcState::Running) => !is_alive_state(observed),
        (false, state) => observed == state,
        (true, state) => observed != state,
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

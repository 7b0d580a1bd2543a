// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logs` monitor: regex match over appended log lines and journal entries.

use async_trait::async_trait;
use regex::Regex;
use rig_core::TriggerRecord;
use rig_rigfile::LogsConfig;
use tracing::{debug, warn};

use super::{clip, now_stamp, Monitor, MonitorError};
use crate::adapters::journal::JournalCursor;
use crate::adapters::tail::LogTail;

pub struct LogsMonitor {
    pattern: Regex,
    needed: u64,
    hits: u64,
    files: Vec<LogTail>,
    journal: Option<JournalCursor>,
}

impl LogsMonitor {
    pub fn new(cfg: &LogsConfig) -> Result<Self, MonitorError> {
        let pattern = Regex::new(&cfg.message)
            .map_err(|e| MonitorError::Start(format!("bad message pattern: {}", e)))?;
        let files = cfg
            .files
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(LogTail::new)
            .collect();
        let journal = cfg.journals.clone().map(JournalCursor::new);
        Ok(Self { pattern, needed: cfg.count, hits: 0, files, journal })
    }
}

#[async_trait]
impl Monitor for LogsMonitor {
    fn name(&self) -> &'static str {
        "logs"
    }

    async fn start(&mut self) -> Result<(), MonitorError> {
        for tail in &mut self.files {
            tail.start();
        }
        if let Some(journal) = &mut self.journal {
            journal.start().await;
            if !journal.is_available() {
                self.journal = None;
            }
        }
        Ok(())
    }

    async fn poll(&mut self) -> Result<Option<TriggerRecord>, MonitorError> {
        // (source label, matched line) of the most recent hit this tick
        let mut last_hit: Option<(String, String)> = None;

        for tail in &mut self.files {
            let lines = match tail.poll_lines() {
                Ok(lines) => lines,
                Err(e) => {
                    warn!(file = %tail.path().display(), error = %e, "log read failed, will retry");
                    continue;
                }
            };
            for line in lines {
                if self.pattern.is_match(&line) {
                    self.hits += 1;
                    last_hit = Some((tail.path().display().to_string(), line));
                }
            }
        }

        if let Some(journal) = &mut self.journal {
            let label = journal.label();
            for line in journal.poll().await {
                if self.pattern.is_match(&line) {
                    self.hits += 1;
                    last_hit = Some((label.clone(), line));
                }
            }
        }

        if self.hits < self.needed {
            if last_hit.is_some() {
                debug!(hits = self.hits, needed = self.needed, "log matches accumulating");
            }
            return Ok(None);
        }

        let (source, line) = match last_hit {
            Some(hit) => hit,
            // Count was already satisfied on a previous tick; latching is
            // handled by the caller, so this poll cannot happen in practice.
            None => return Ok(None),
        };
        Ok(Some(TriggerRecord::new(
            "logs",
            format!(
                "matched \"{}\" in {} ({} hit{}): \"{}\"",
                self.pattern.as_str(),
                source,
                self.hits,
                if self.hits == 1 { "" } else { "s" },
                clip(&line, 120),
            ),
            now_stamp(),
        )))
    }
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;

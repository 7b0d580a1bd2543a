// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `watch` action: periodic file and command sampling at the rig interval.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rig_rigfile::WatchConfig;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{now_stamp, Action, ActionCtx, ActionError};
use crate::adapters::subprocess::{run_with_timeout, SAMPLE_TIMEOUT};

/// The fixed inventory behind `use_standard_set`.
pub const STANDARD_SET: &[&str] = &["ps aux", "free -m", "df -h", "ip addr", "ss -peaonmi"];

enum Source {
    File(PathBuf),
    Command(Vec<String>),
}

struct Target {
    source: Source,
    out: PathBuf,
}

pub struct WatchAction {
    cfg: WatchConfig,
    cancel: Option<CancellationToken>,
    sampler: Option<tokio::task::JoinHandle<()>>,
}

impl WatchAction {
    pub fn new(cfg: WatchConfig) -> Self {
        Self { cfg, cancel: None, sampler: None }
    }

    fn build_targets(&self, workdir: &Path) -> Vec<Target> {
        let mut targets = Vec::new();
        let mut used: Vec<String> = Vec::new();

        let mut out_name = |wanted: String| -> String {
            let mut name = wanted;
            let mut n = 1;
            while used.contains(&name) {
                n += 1;
                name = format!("{}.{}", name, n);
            }
            used.push(name.clone());
            name
        };

        for file in &self.cfg.files {
            let path = file.path().clone();
            let wanted = match file.dest() {
                Some(dest) => dest.to_string(),
                None => {
                    let base = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "file".to_string());
                    format!("watch-{}.log", base)
                }
            };
            targets.push(Target { source: Source::File(path), out: workdir.join(out_name(wanted)) });
        }

        let mut commands = self.cfg.commands.clone();
        if self.cfg.use_standard_set {
            commands.extend(STANDARD_SET.iter().copied().map(String::from));
        }
        for command in commands {
            let argv: Vec<String> = command.split_whitespace().map(String::from).collect();
            if argv.is_empty() {
                continue;
            }
            let wanted = format!("watch-{}.log", slug(&argv.join("-")));
            targets.push(Target { source: Source::Command(argv), out: workdir.join(out_name(wanted)) });
        }

        targets
    }
}

#[async_trait]
impl Action for WatchAction {
    fn name(&self) -> &'static str {
        "watch"
    }

    async fn pre_start(&mut self, ctx: &ActionCtx) -> Result<(), ActionError> {
        let targets = self.build_targets(&ctx.workdir);
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        self.sampler = Some(tokio::spawn(sample_loop(targets, ctx.interval.max(1), token)));
        Ok(())
    }

    // Collection happened before the trigger; nothing runs afterwards.
    async fn run(&mut self, _ctx: &ActionCtx) -> Result<(), ActionError> {
        Ok(())
    }

    async fn stop(&mut self, _ctx: &ActionCtx) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        if let Some(handle) = self.sampler.take() {
            let _ = handle.await;
        }
    }
}

async fn sample_loop(targets: Vec<Target>, interval_secs: u64, token: CancellationToken) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                for target in &targets {
                    sample_one(target).await;
                }
            }
        }
    }
    debug!("watch sampler stopped");
}

async fn sample_one(target: &Target) {
    let content = match &target.source {
        Source::File(path) => std::fs::read_to_string(path)
            .unwrap_or_else(|e| format!("<unreadable: {}>\n", e)),
        Source::Command(argv) => {
            let Some(program) = argv.first() else {
                return;
            };
            let mut cmd = Command::new(program);
            cmd.args(&argv[1..]);
            match run_with_timeout(cmd, SAMPLE_TIMEOUT, "watch command").await {
                Ok(output) => {
                    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                    if !output.status.success() {
                        text.push_str(&format!("<exited {}>\n", output.status));
                    }
                    text
                }
                Err(e) => format!("<failed: {}>\n", e),
            }
        }
    };

    if let Err(e) = append_record(&target.out, &content) {
        warn!(out = %target.out.display(), error = %e, "watch record write failed");
    }
}

fn append_record(out: &Path, content: &str) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(out)?;
    write!(file, "=== {} ===\n{}", now_stamp(), content)?;
    if !content.ends_with('\n') {
        writeln!(file)?;
    }
    Ok(())
}

fn slug(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;

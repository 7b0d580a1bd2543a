// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The rig supervisor: deploy sequence, polling loop, trigger pipeline,
//! archive assembly, and teardown.
//!
//! One task per monitor polls on a shared tick clock and reports trips
//! over a bounded channel; the first trip received is latched as the
//! trigger source. Post-trigger actions run strictly serially in registry
//! order. Destroy requests and termination signals converge on the same
//! teardown path.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rig_core::{Phase, TriggerRecord};
use thiserror::Error;
use tokio::net::UnixListener;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::{broadcast, mpsc, Notify};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::actions::{ActionCtx, ActionError};
use crate::listener::{ListenCtx, Listener};
use crate::monitors::MonitorError;
use crate::registry::{self, ActionInstance, MonitorInstance};
use crate::status::Shared;
use crate::{archive, metadata};

/// How a rig run ended, short of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A monitor tripped, all actions ran, the archive (if any) is on disk.
    Finished,
    /// An administrative destroy or a termination signal ended the rig.
    Destroyed,
}

/// Fatal supervisor errors.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("deployment failed: {0}")]
    Deploy(String),

    #[error("fatal runtime error: {0}")]
    Fatal(String),
}

impl SupervisorError {
    /// Process exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            SupervisorError::Deploy(_) => 3,
            SupervisorError::Fatal(_) => 5,
        }
    }
}

/// One detached rig process.
pub struct Supervisor {
    cfg: rig_rigfile::Rigfile,
    name: String,
    workdir: PathBuf,
    socket_path: PathBuf,
    archive_dir: PathBuf,
}

impl Supervisor {
    /// Standard paths from the well-known layout.
    pub fn new(cfg: rig_rigfile::Rigfile, name: String) -> Self {
        let workdir = rig_core::paths::workdir(&name);
        let socket_path = rig_core::paths::socket_path(&name);
        let archive_dir = rig_core::paths::tmp_base();
        Self { cfg, name, workdir, socket_path, archive_dir }
    }

    /// Explicit paths; used by tests to run inside a scratch directory.
    pub fn with_paths(
        cfg: rig_rigfile::Rigfile,
        name: String,
        workdir: PathBuf,
        socket_path: PathBuf,
        archive_dir: PathBuf,
    ) -> Self {
        Self { cfg, name, workdir, socket_path, archive_dir }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deploy and run the rig to completion.
    pub async fn run(self) -> Result<Outcome, SupervisorError> {
        let monitors =
            registry::build_monitors(&self.cfg).map_err(SupervisorError::Deploy)?;
        let mut actions = registry::build_actions(&self.cfg);

        let monitor_names: Vec<&'static str> = monitors.iter().map(|m| m.name).collect();
        let action_names: Vec<&'static str> = actions.iter().map(|a| a.name).collect();
        let shared = Shared::new(self.name.clone(), &monitor_names, &action_names);

        std::fs::create_dir_all(&self.workdir).map_err(|e| {
            SupervisorError::Deploy(format!(
                "creating working directory {}: {}",
                self.workdir.display(),
                e
            ))
        })?;

        if let Some(parent) = self.socket_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SupervisorError::Deploy(format!("creating socket directory: {}", e))
            })?;
        }
        self.claim_socket()?;
        let unix = UnixListener::bind(&self.socket_path).map_err(|e| {
            SupervisorError::Deploy(format!(
                "binding control socket {}: {}",
                self.socket_path.display(),
                e
            ))
        })?;

        let shutdown = Arc::new(Notify::new());
        let force = CancellationToken::new();
        spawn_signal_watcher(Arc::clone(&shared), Arc::clone(&shutdown), force.clone())
            .map_err(|e| SupervisorError::Fatal(format!("installing signal handlers: {}", e)))?;

        let listen_ctx = Arc::new(ListenCtx {
            shared: Arc::clone(&shared),
            shutdown: Arc::clone(&shutdown),
            force: force.clone(),
        });
        let listener_task = tokio::spawn(Listener::new(unix, listen_ctx).run());

        let result =
            self.supervise(Arc::clone(&shared), monitors, &mut actions, shutdown, force).await;

        listener_task.abort();
        if let Err(e) = std::fs::remove_file(&self.socket_path) {
            warn!(error = %e, "could not remove control socket");
        }
        match &result {
            Ok(Outcome::Finished) => {}
            Ok(Outcome::Destroyed) | Err(_) => {
                let _ = std::fs::remove_dir_all(&self.workdir);
            }
        }
        result
    }

    /// Claim the socket path: a stale file may be taken over, a live
    /// listener is a name collision.
    fn claim_socket(&self) -> Result<(), SupervisorError> {
        if !self.socket_path.exists() {
            return Ok(());
        }
        if std::os::unix::net::UnixStream::connect(&self.socket_path).is_ok() {
            return Err(SupervisorError::Deploy(format!(
                "name collision: a rig named '{}' is already running",
                self.name
            )));
        }
        debug!(socket = %self.socket_path.display(), "claiming stale socket");
        std::fs::remove_file(&self.socket_path).map_err(|e| {
            SupervisorError::Deploy(format!("removing stale socket: {}", e))
        })?;
        Ok(())
    }

    async fn supervise(
        &self,
        shared: Arc<Shared>,
        mut monitors: Vec<MonitorInstance>,
        actions: &mut [ActionInstance],
        shutdown: Arc<Notify>,
        force: CancellationToken,
    ) -> Result<Outcome, SupervisorError> {
        let ctx = ActionCtx {
            workdir: self.workdir.clone(),
            interval: self.cfg.interval.max(1),
            delay: self.cfg.delay,
            cancel: force.clone(),
        };

        // Feasibility probes, before anything irreversible.
        for instance in actions.iter() {
            if let Err(e) = instance.action.probe(&ctx).await {
                return Err(SupervisorError::Deploy(format!("{} probe: {}", instance.name, e)));
            }
        }

        for instance in &mut monitors {
            instance.monitor.start().await.map_err(|e| {
                SupervisorError::Deploy(format!("monitor {}: {}", instance.name, e))
            })?;
        }

        // Start pre-trigger collectors in priority order.
        shared.set_phase(Phase::PreTriggerRunning);
        let mut started: Vec<usize> = Vec::new();
        for i in 0..actions.len() {
            if !actions[i].pre_trigger {
                continue;
            }
            match actions[i].action.pre_start(&ctx).await {
                Ok(()) => {
                    shared.set_action_state(i, "pre_trigger_running");
                    started.push(i);
                }
                Err(e) => {
                    let name = actions[i].name;
                    stop_pre_trigger(actions, &mut started, &ctx, &shared).await;
                    return Err(SupervisorError::Deploy(format!("{} pre-start: {}", name, e)));
                }
            }
        }

        // Armed: the control plane now reports ready.
        shared.set_phase(Phase::Polling);
        info!(name = %self.name, interval = self.cfg.interval, "rig armed, polling");

        let poll_cancel = CancellationToken::new();
        let (tick_tx, _) = broadcast::channel::<u64>(16);
        let (trip_tx, mut trip_rx) = mpsc::channel::<TriggerRecord>(monitors.len().max(1));
        for (index, instance) in monitors.into_iter().enumerate() {
            tokio::spawn(monitor_task(
                index,
                instance,
                tick_tx.subscribe(),
                trip_tx.clone(),
                Arc::clone(&shared),
                poll_cancel.clone(),
            ));
        }
        drop(trip_tx);

        let mut interval =
            tokio::time::interval(Duration::from_secs(self.cfg.interval.max(1)));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut tick: u64 = 0;
        let mut monitors_active = true;

        let trigger = loop {
            tokio::select! {
                _ = interval.tick() => {
                    tick += 1;
                    let _ = tick_tx.send(tick);
                }
                received = trip_rx.recv(), if monitors_active => match received {
                    Some(record) => break record,
                    None => {
                        // Untrippable but not fatal: keep serving the
                        // control plane until someone destroys the rig.
                        warn!("every monitor has stopped; rig can no longer trip");
                        monitors_active = false;
                    }
                },
                _ = shutdown.notified() => {
                    return Ok(self
                        .teardown_destroyed(actions, &mut started, &ctx, &shared, &poll_cancel)
                        .await);
                }
            }
        };

        poll_cancel.cancel();
        shared.latch_trigger(trigger.clone());
        shared.set_phase(Phase::Triggered);
        info!(source = %trigger, "monitor tripped");

        // Later trips become evidence, not the source.
        let evidence_sink = Arc::clone(&shared);
        tokio::spawn(async move {
            while let Some(record) = trip_rx.recv().await {
                evidence_sink.push_evidence(record);
            }
        });

        // Pre-trigger collectors keep sampling through the delay window.
        if self.cfg.delay > 0 {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(self.cfg.delay)) => {}
                _ = shutdown.notified() => {
                    return Ok(self
                        .teardown_destroyed(actions, &mut started, &ctx, &shared, &poll_cancel)
                        .await);
                }
            }
        }

        // Stop pre-trigger collectors in reverse priority order.
        stop_pre_trigger(actions, &mut started, &ctx, &shared).await;

        shared.set_phase(Phase::Collecting);
        for i in 0..actions.len() {
            if shared.is_destroyed() {
                return Ok(self
                    .teardown_destroyed(actions, &mut started, &ctx, &shared, &poll_cancel)
                    .await);
            }
            if !actions[i].post_trigger {
                continue;
            }

            let iterations = if actions[i].repeatable {
                1 + actions[i].repeat_override.unwrap_or(self.cfg.repeat)
            } else {
                1
            };
            let name = actions[i].name;
            shared.set_action_state(i, "running");

            let mut failed = false;
            for iteration in 0..iterations {
                if iteration > 0 && self.cfg.repeat_delay > 0 {
                    tokio::select! {
                        _ = tokio::time::sleep(Duration::from_secs(self.cfg.repeat_delay)) => {}
                        _ = shutdown.notified() => break,
                    }
                }
                if shared.is_destroyed() {
                    break;
                }

                match actions[i].action.run(&ctx).await {
                    Ok(()) => {}
                    Err(ActionError::Cancelled) => {
                        info!(action = name, "action cancelled by destroy");
                        shared.set_action_state(i, "stopped");
                        return Ok(self
                            .teardown_destroyed(actions, &mut started, &ctx, &shared, &poll_cancel)
                            .await);
                    }
                    Err(ActionError::Fatal(message)) => {
                        error!(action = name, error = %message, "fatal action failure");
                        shared.set_action_state(i, "failed");
                        shared.set_phase(Phase::Failed);
                        return Err(SupervisorError::Fatal(format!("{}: {}", name, message)));
                    }
                    Err(ActionError::Failed(message)) => {
                        // Log, skip; later actions still run.
                        warn!(action = name, error = %message, "action failed, continuing");
                        failed = true;
                        break;
                    }
                }
            }
            shared.set_action_state(i, if failed { "failed" } else { "done" });
        }

        if shared.is_destroyed() {
            return Ok(self
                .teardown_destroyed(actions, &mut started, &ctx, &shared, &poll_cancel)
                .await);
        }

        let meta = metadata::RigMetadata {
            name: self.name.clone(),
            trigger: shared.trigger(),
            evidence: shared.evidence(),
            actions: shared.action_states(),
            generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        };
        if let Err(e) = metadata::write(&self.workdir, &meta) {
            warn!(error = %e, "could not write rig metadata");
        }

        shared.set_phase(Phase::Archiving);
        if !self.cfg.no_archive {
            let dest =
                self.archive_dir.join(format!("{}-{}.tar.gz", self.name, archive::stamp()));
            archive::create(&self.workdir, &dest).map_err(|e| {
                shared.set_phase(Phase::Failed);
                SupervisorError::Fatal(format!("assembling archive: {}", e))
            })?;
            archive::verify(&dest).map_err(|e| {
                shared.set_phase(Phase::Failed);
                SupervisorError::Fatal(format!("verifying archive: {}", e))
            })?;
            std::fs::remove_dir_all(&self.workdir).map_err(|e| {
                SupervisorError::Fatal(format!("removing working directory: {}", e))
            })?;
            info!(archive = %dest.display(), "archive written");
        } else {
            info!(workdir = %self.workdir.display(), "no_archive set, working directory kept");
        }

        shared.set_phase(Phase::Finished);
        Ok(Outcome::Finished)
    }

    async fn teardown_destroyed(
        &self,
        actions: &mut [ActionInstance],
        started: &mut Vec<usize>,
        ctx: &ActionCtx,
        shared: &Arc<Shared>,
        poll_cancel: &CancellationToken,
    ) -> Outcome {
        info!(name = %self.name, "rig destroyed, tearing down");
        poll_cancel.cancel();
        stop_pre_trigger(actions, started, ctx, shared).await;
        Outcome::Destroyed
    }
}

/// Stop started pre-trigger actions in reverse priority order.
async fn stop_pre_trigger(
    actions: &mut [ActionInstance],
    started: &mut Vec<usize>,
    ctx: &ActionCtx,
    shared: &Arc<Shared>,
) {
    while let Some(i) = started.pop() {
        actions[i].action.stop(ctx).await;
        shared.set_action_state(i, "stopped");
    }
}

/// Poll one monitor on the shared tick clock until it trips or is
/// cancelled. A tripped monitor latches: the task ends and the monitor
/// stays tripped.
async fn monitor_task(
    index: usize,
    mut instance: MonitorInstance,
    mut ticks: broadcast::Receiver<u64>,
    trips: mpsc::Sender<TriggerRecord>,
    shared: Arc<Shared>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            tick = ticks.recv() => match tick {
                Ok(_) => match instance.monitor.poll().await {
                    Ok(Some(record)) => {
                        shared.set_monitor_state(index, "tripped");
                        let _ = trips.send(record).await;
                        break;
                    }
                    Ok(None) => {}
                    Err(MonitorError::SourcesExhausted) => {
                        warn!(monitor = instance.name, "all sources lost; monitor can no longer trip");
                        shared.set_monitor_state(index, "lost");
                        break;
                    }
                    Err(e) => {
                        warn!(monitor = instance.name, error = %e, "poll failed, retrying next tick");
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(monitor = instance.name, skipped, "slow monitor skipped ticks");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
    instance.monitor.stop().await;
}

/// Map termination signals onto the destroy path. SIGHUP is ignored.
///
/// Signals behave like a force-destroy: pre-trigger collectors are
/// stopped and any in-flight action subprocess is killed.
fn spawn_signal_watcher(
    shared: Arc<Shared>,
    shutdown: Arc<Notify>,
    force: CancellationToken,
) -> std::io::Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = sigterm.recv() => info!("received SIGTERM"),
                _ = sigint.recv() => info!("received SIGINT"),
                _ = sighup.recv() => {
                    debug!("ignoring SIGHUP");
                    continue;
                }
            }
            shared.mark_destroyed();
            force.cancel();
            shutdown.notify_one();
        }
    });
    Ok(())
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;

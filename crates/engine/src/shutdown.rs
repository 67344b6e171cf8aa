// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shutdown orchestrator (component E, §4.5): a multi-phase teardown
//! that stops sessions in dependency order behind a filesystem-advisory
//! lock, with dry-run, verification, and respawn detection.
//!
//! Phases execute strictly in order; within a phase, per-rig operations may
//! run concurrently (§5). Every phase is best-effort: a failure logs and the
//! run moves to the next phase, but the final report reflects it.

use crate::env::{
    shutdown_lock_retry, shutdown_lock_timeout, shutdown_verify_delay, worker_graceful_deadline,
    NUKE_ACK_VAR,
};
use crate::error::{EngineError, EngineResult};
use fs2::FileExt;
use gt_adapters::{DaemonControl, SessionAdapter};
use gt_core::{compose_session_name, parse_session_role, CoreError};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Flags controlling a shutdown run (§6 "Shutdown CLI flags").
#[derive(Debug, Clone, Default)]
pub struct ShutdownOptions {
    pub dry_run: bool,
    pub force: bool,
    pub all: bool,
    pub nuke: bool,
}

/// Outcome of a single named phase.
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub phase: &'static str,
    pub ok: bool,
    pub detail: String,
}

impl PhaseReport {
    fn ok(phase: &'static str, detail: impl Into<String>) -> Self {
        Self {
            phase,
            ok: true,
            detail: detail.into(),
        }
    }

    fn failed(phase: &'static str, detail: impl Into<String>) -> Self {
        Self {
            phase,
            ok: false,
            detail: detail.into(),
        }
    }
}

/// Full report for a shutdown run.
#[derive(Debug, Clone, Default)]
pub struct ShutdownReport {
    pub phases: Vec<PhaseReport>,
    /// Processes or sessions still alive after phase 5's verification scan.
    pub respawned: Vec<String>,
}

impl ShutdownReport {
    /// Whether every phase reported success and nothing respawned (§4.5,
    /// "the final exit status reflects any per-step failure").
    pub fn succeeded(&self) -> bool {
        self.phases.iter().all(|p| p.ok) && self.respawned.is_empty()
    }

    fn push(&mut self, report: PhaseReport) {
        self.phases.push(report);
    }
}

/// Advisory, process-exclusive lock file serializing shutdown runs
/// (§4.5 phase 0). Released when dropped, on every exit path.
struct ShutdownLock {
    file: File,
}

impl ShutdownLock {
    async fn acquire(path: &Path, timeout: Duration, retry: Duration) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::Transient(e.to_string()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .map_err(|e| CoreError::Transient(e.to_string()))?;

        let deadline = Instant::now() + timeout;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(Self { file }),
                Err(_) if Instant::now() < deadline => {
                    tokio::time::sleep(retry).await;
                }
                Err(_) => return Err(CoreError::AnotherShutdownInProgress),
            }
        }
    }
}

impl Drop for ShutdownLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Runs the ordered teardown of §4.5 against one town's sessions and
/// auxiliary daemons.
#[derive(Clone)]
pub struct ShutdownOrchestrator<S: SessionAdapter, D: DaemonControl> {
    sessions: S,
    daemons: D,
    lock_path: PathBuf,
}

impl<S: SessionAdapter, D: DaemonControl> ShutdownOrchestrator<S, D> {
    pub fn new(sessions: S, daemons: D, lock_path: impl Into<PathBuf>) -> Self {
        Self {
            sessions,
            daemons,
            lock_path: lock_path.into(),
        }
    }

    /// Run the full ordered teardown against the given rigs.
    pub async fn run(&self, rigs: &[String], opts: &ShutdownOptions) -> EngineResult<ShutdownReport> {
        let _lock = ShutdownLock::acquire(
            &self.lock_path,
            shutdown_lock_timeout(),
            shutdown_lock_retry(),
        )
        .await
        .map_err(EngineError::from)?;

        let mut report = ShutdownReport::default();

        self.stop_role(rigs, "refinery", opts, &mut report, "stop_refineries")
            .await;
        self.stop_role(rigs, "witness", opts, &mut report, "stop_witnesses")
            .await;
        self.stop_workers(rigs, opts, &mut report).await;

        if opts.all {
            self.stop_daemons(opts, &mut report).await;
            self.verify(opts, &mut report).await;
        }

        if opts.nuke {
            self.nuke(opts, &mut report).await;
        }

        Ok(report)
    }

    /// Phases 1-2: kill the single reserved-role session per rig, if present.
    async fn stop_role(
        &self,
        rigs: &[String],
        role: &str,
        opts: &ShutdownOptions,
        report: &mut ShutdownReport,
        phase: &'static str,
    ) {
        for rig in rigs {
            let name = compose_session_name(rig, role);
            match self.sessions.is_alive(&name).await {
                Ok(true) => {
                    if opts.dry_run {
                        report.push(PhaseReport::ok(phase, format!("would kill {name}")));
                        continue;
                    }
                    match self.sessions.kill(&name).await {
                        Ok(()) => report.push(PhaseReport::ok(phase, format!("killed {name}"))),
                        Err(err) => {
                            tracing::warn!(session = %name, error = %err, "failed to kill role session");
                            report.push(PhaseReport::failed(phase, format!("{name}: {err}")));
                        }
                    }
                }
                Ok(false) => {} // already absent, nothing to do (§7 NotFound handling)
                Err(err) => {
                    tracing::warn!(session = %name, error = %err, "failed to check role session liveness");
                    report.push(PhaseReport::failed(phase, format!("{name}: {err}")));
                }
            }
        }
    }

    /// Phase 3: graceful-then-forced stop of every worker session.
    async fn stop_workers(&self, rigs: &[String], opts: &ShutdownOptions, report: &mut ShutdownReport) {
        let live = match self.sessions.list_sessions().await {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!(error = %err, "failed to list sessions for worker shutdown");
                report.push(PhaseReport::failed("stop_workers", err.to_string()));
                return;
            }
        };

        for name in live {
            let Some((rig, _rest, role)) = parse_session_role(&name) else {
                continue;
            };
            if !role.is_worker() || !rigs.iter().any(|r| r == rig) {
                continue;
            }

            if opts.dry_run {
                report.push(PhaseReport::ok("stop_workers", format!("would stop {name}")));
                continue;
            }

            if let Err(err) = self.sessions.send_literal(&name, "exit").await {
                tracing::warn!(session = %name, error = %err, "graceful stop signal failed");
            }
            let _ = self.sessions.send_enter(&name).await;

            tokio::time::sleep(worker_graceful_deadline()).await;

            match self.sessions.is_alive(&name).await {
                Ok(true) if opts.force => match self.sessions.kill(&name).await {
                    Ok(()) => report.push(PhaseReport::ok("stop_workers", format!("force-killed {name}"))),
                    Err(err) => {
                        tracing::warn!(session = %name, error = %err, "force-kill failed");
                        report.push(PhaseReport::failed("stop_workers", format!("{name}: {err}")));
                    }
                },
                Ok(true) => report.push(PhaseReport::ok(
                    "stop_workers",
                    format!("{name} did not exit gracefully; force not set"),
                )),
                Ok(false) => report.push(PhaseReport::ok("stop_workers", format!("stopped {name}"))),
                Err(err) => {
                    tracing::warn!(session = %name, error = %err, "failed to check worker liveness");
                    report.push(PhaseReport::failed("stop_workers", format!("{name}: {err}")));
                }
            }
        }
    }

    /// Phase 4: stop the store's auxiliary daemons (gated on `--all`).
    async fn stop_daemons(&self, opts: &ShutdownOptions, report: &mut ShutdownReport) {
        if opts.dry_run {
            report.push(PhaseReport::ok("stop_daemons", "would stop auxiliary daemons"));
            return;
        }

        if let Err(err) = self.daemons.stop_all().await {
            tracing::warn!(error = %err, "graceful daemon stop_all failed");
            report.push(PhaseReport::failed("stop_daemons", err.to_string()));
            return;
        }

        tokio::time::sleep(worker_graceful_deadline()).await;

        match self.daemons.list_running().await {
            Ok(survivors) if !survivors.is_empty() => {
                if let Err(err) = self.daemons.force_kill_all().await {
                    tracing::warn!(error = %err, "force_kill_all failed");
                    report.push(PhaseReport::failed("stop_daemons", err.to_string()));
                    return;
                }
                report.push(PhaseReport::ok(
                    "stop_daemons",
                    format!("force-killed {} surviving daemon(s)", survivors.len()),
                ));
            }
            Ok(_) => report.push(PhaseReport::ok("stop_daemons", "all daemons stopped")),
            Err(err) => {
                tracing::warn!(error = %err, "failed to list daemons after stop_all");
                report.push(PhaseReport::failed("stop_daemons", err.to_string()));
            }
        }
    }

    /// Phase 5: after a settle delay, check for anything that respawned.
    async fn verify(&self, opts: &ShutdownOptions, report: &mut ShutdownReport) {
        if opts.dry_run {
            report.push(PhaseReport::ok("verify", "dry run: skipping survivor scan"));
            return;
        }

        tokio::time::sleep(shutdown_verify_delay()).await;

        match self.daemons.list_running().await {
            Ok(survivors) => {
                for d in survivors {
                    tracing::warn!(daemon = %d.name, pid = d.pid, "daemon respawned after shutdown");
                    report.respawned.push(d.name);
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to verify daemon state");
                report.push(PhaseReport::failed("verify", err.to_string()));
            }
        }

        match self.sessions.list_sessions().await {
            Ok(sessions) => {
                for name in sessions {
                    if parse_session_role(&name).is_some() {
                        tracing::warn!(session = %name, "session respawned after shutdown");
                        report.respawned.push(name);
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to verify session state");
                report.push(PhaseReport::failed("verify", err.to_string()));
            }
        }

        if report.respawned.is_empty() {
            report.push(PhaseReport::ok("verify", "no survivors"));
        }
    }

    /// Phase 6: destroy the multiplexer server entirely (gated on `--nuke`).
    async fn nuke(&self, opts: &ShutdownOptions, report: &mut ShutdownReport) {
        if std::env::var(NUKE_ACK_VAR).is_err() {
            tracing::warn!(
                "destructive action: nuking the multiplexer server without {NUKE_ACK_VAR} set"
            );
        }

        if opts.dry_run {
            report.push(PhaseReport::ok("nuke", "would kill the multiplexer server"));
            return;
        }

        match self.sessions.kill_server().await {
            Ok(()) => report.push(PhaseReport::ok("nuke", "multiplexer server destroyed")),
            Err(err) => {
                tracing::warn!(error = %err, "server nuke failed");
                report.push(PhaseReport::failed("nuke", err.to_string()));
            }
        }
    }
}

#[cfg(test)]
#[path = "shutdown_tests.rs"]
mod tests;

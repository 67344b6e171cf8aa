// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Process wiring for `gtd`: configuration, rig discovery, and the concrete
//! adapter types the daemon runs the reconciler and activity watcher
//! against. No RPC surface — `gt-cli` talks to the same external stores
//! directly rather than through this process (SPEC_FULL.md §A).

pub mod env;

use fs2::FileExt;
use gt_adapters::{BdActivityStream, BdWorkItemClient, TmuxAdapter};
use gt_core::{SystemClock, Town};
use gt_engine::{Reconciler, RigContext, Watcher};
use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("could not determine a home directory for the GASTOWN_HOME fallback")]
    NoHomeDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed rigs.json: {0}")]
    RigsJson(#[from] serde_json::Error),

    #[error("gtd is already running (pid {0})")]
    AlreadyRunning(String),
}

/// Daemon configuration: one town per process.
#[derive(Debug, Clone)]
pub struct Config {
    pub town: Town,
    pub log_path: PathBuf,
    pub pid_path: PathBuf,
}

impl Config {
    /// Load configuration from `GASTOWN_HOME` (or `~/.gastown`). Paths are
    /// derived, not configurable independently — one town root governs
    /// everything (Design Notes §9, "Process-wide state").
    pub fn load() -> Result<Self, DaemonError> {
        let root = env::town_root()?;
        let town = Town::new(&root);
        let daemon_dir = town.daemon_dir();
        Ok(Self {
            log_path: daemon_dir.join("gtd.log"),
            pid_path: daemon_dir.join("gtd.pid"),
            town,
        })
    }
}

/// Advisory, process-exclusive lock over the daemon's pid file: at most one
/// `gtd` may run per town. Released when dropped.
pub struct DaemonLock {
    file: File,
}

impl DaemonLock {
    /// Acquire the lock or fail immediately with the holding pid, mirroring
    /// the teacher's "already running" startup check rather than retrying
    /// (a daemon, unlike a shutdown run, has no reason to wait its turn).
    pub fn acquire(config: &Config) -> Result<Self, DaemonError> {
        if let Some(parent) = config.pid_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&config.pid_path)?;

        if file.try_lock_exclusive().is_err() {
            let held_by = std::fs::read_to_string(&config.pid_path).unwrap_or_default();
            return Err(DaemonError::AlreadyRunning(held_by.trim().to_string()));
        }

        use std::io::{Seek, SeekFrom, Write};
        let mut file = file;
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        write!(file, "{}", std::process::id())?;
        file.sync_all()?;

        Ok(Self { file })
    }
}

impl Drop for DaemonLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RigEntry {
    name: String,
    #[serde(default)]
    remote_url: Option<String>,
}

/// Read `mayor/rigs.json` for rig discovery (§6 "File layout under town
/// root" — treated as opaque JSON; `gt-core::Town` enumerates no rigs of
/// its own). A missing file means no rigs yet, not an error.
pub fn discover_rigs(town: &Town) -> Result<Vec<RigContext>, DaemonError> {
    let bytes = match std::fs::read(town.rigs_json()) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    let entries: Vec<RigEntry> = serde_json::from_slice(&bytes)?;
    Ok(entries
        .into_iter()
        .map(|e| RigContext {
            name: e.name,
            remote_url: e.remote_url,
        })
        .collect())
}

/// The concrete reconciler type `gtd` runs: `bd` work items, tmux sessions.
pub type DaemonReconciler = Reconciler<BdWorkItemClient, TmuxAdapter>;

/// The concrete watcher type `gtd` runs: `bd activity --follow` merged with
/// the local event journal, system wall-clock time.
pub type DaemonWatcher = Watcher<BdActivityStream, SystemClock>;

/// Build the reconciler and watcher for one town, wired to the real
/// subprocess-backed adapters (§4.4, §4.7).
pub fn build(config: &Config) -> (DaemonReconciler, DaemonWatcher) {
    let reconciler = Reconciler::new(BdWorkItemClient::new(), TmuxAdapter::new());
    let watcher = Watcher::new(BdActivityStream::new(), SystemClock, config.town.events_journal());
    (reconciler, watcher)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

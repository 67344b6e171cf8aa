// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake daemon control for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DaemonControl, DaemonError, DaemonProcess};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded daemon-control call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaemonCall {
    StopAll,
    ForceKillAll,
    ListRunning,
}

struct FakeDaemonState {
    calls: Vec<DaemonCall>,
    running: Vec<DaemonProcess>,
    /// Simulates a daemon that respawns no matter how it's told to stop,
    /// surviving both `stop_all` and `force_kill_all`.
    respawns: bool,
}

/// Fake daemon control for testing. Defaults to reporting nothing running;
/// seed [`FakeDaemonControl::seed_running`] to simulate a live daemon.
#[derive(Clone)]
pub struct FakeDaemonControl {
    inner: Arc<Mutex<FakeDaemonState>>,
}

impl Default for FakeDaemonControl {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeDaemonState {
                calls: Vec::new(),
                running: Vec::new(),
                respawns: false,
            })),
        }
    }
}

impl FakeDaemonControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DaemonCall> {
        self.inner.lock().calls.clone()
    }

    /// Seed a daemon as currently running.
    pub fn seed_running(&self, name: &str, pid: u32) {
        self.inner.lock().running.push(DaemonProcess {
            name: name.to_string(),
            pid,
        });
    }

    /// Make the seeded daemon(s) respawn through both `stop_all` and
    /// `force_kill_all`, for testing phase 5's respawn verification.
    pub fn set_respawns(&self, respawns: bool) {
        self.inner.lock().respawns = respawns;
    }
}

#[async_trait]
impl DaemonControl for FakeDaemonControl {
    async fn stop_all(&self) -> Result<(), DaemonError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DaemonCall::StopAll);
        if !inner.respawns {
            inner.running.clear();
        }
        Ok(())
    }

    async fn force_kill_all(&self) -> Result<(), DaemonError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DaemonCall::ForceKillAll);
        if !inner.respawns {
            inner.running.clear();
        }
        Ok(())
    }

    async fn list_running(&self) -> Result<Vec<DaemonProcess>, DaemonError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DaemonCall::ListRunning);
        Ok(inner.running.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op daemon control for when auxiliary-daemon teardown is disabled.

use super::{DaemonControl, DaemonError, DaemonProcess};
use async_trait::async_trait;

/// Daemon control that does nothing and reports nothing running.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpDaemonControl;

impl NoOpDaemonControl {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DaemonControl for NoOpDaemonControl {
    async fn stop_all(&self) -> Result<(), DaemonError> {
        Ok(())
    }

    async fn force_kill_all(&self) -> Result<(), DaemonError> {
        Ok(())
    }

    async fn list_running(&self) -> Result<Vec<DaemonProcess>, DaemonError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;

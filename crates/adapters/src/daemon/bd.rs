// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon control backed by the external `bd` CLI's own bus hooks.

use super::{DaemonControl, DaemonError, DaemonProcess};
use crate::subprocess::{run_with_timeout, WORKITEM_TIMEOUT};
use async_trait::async_trait;
use tokio::process::Command;

/// Daemon control that shells out to `bd bus ...`.
#[derive(Clone, Default)]
pub struct BdDaemonControl;

impl BdDaemonControl {
    pub fn new() -> Self {
        Self
    }
}

async fn run_bd(args: &[&str]) -> Result<Vec<u8>, DaemonError> {
    let mut cmd = Command::new("bd");
    cmd.args(args);
    let output = run_with_timeout(cmd, WORKITEM_TIMEOUT, "bd bus")
        .await
        .map_err(DaemonError::CommandFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DaemonError::CommandFailed(stderr.to_string()));
    }

    Ok(output.stdout)
}

#[derive(serde::Deserialize)]
struct HandlerStatus {
    name: String,
    pid: u32,
}

#[async_trait]
impl DaemonControl for BdDaemonControl {
    async fn stop_all(&self) -> Result<(), DaemonError> {
        run_bd(&["bus", "stop", "--all"]).await?;
        Ok(())
    }

    async fn force_kill_all(&self) -> Result<(), DaemonError> {
        run_bd(&["bus", "stop", "--all", "--force"]).await?;
        Ok(())
    }

    async fn list_running(&self) -> Result<Vec<DaemonProcess>, DaemonError> {
        let stdout = run_bd(&["bus", "handlers", "--json"]).await?;
        let handlers: Vec<HandlerStatus> =
            serde_json::from_slice(&stdout).map_err(|e| DaemonError::CommandFailed(e.to_string()))?;
        Ok(handlers
            .into_iter()
            .map(|h| DaemonProcess {
                name: h.name,
                pid: h.pid,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "bd_tests.rs"]
mod tests;

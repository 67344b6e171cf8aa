// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activity stream backed by `bd activity --follow`.

use super::{ActivityStream, ActivityStreamError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Activity stream that shells out to `bd activity --follow` and forwards
/// its stdout a line at a time.
#[derive(Clone, Default)]
pub struct BdActivityStream;

impl BdActivityStream {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActivityStream for BdActivityStream {
    async fn follow(&self) -> Result<mpsc::Receiver<String>, ActivityStreamError> {
        let mut child = Command::new("bd")
            .args(["activity", "--follow"])
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ActivityStreamError::SpawnFailed(e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ActivityStreamError::SpawnFailed("no stdout pipe".to_string()))?;

        let (tx, rx) = mpsc::channel(100);
        tokio::spawn(async move {
            // Keep the child alive for as long as lines are being forwarded;
            // it is killed when dropped at the end of this task.
            let _child = child;
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }
}

#[cfg(test)]
#[path = "bd_tests.rs"]
mod tests;

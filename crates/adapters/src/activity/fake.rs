// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake activity stream for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ActivityStream, ActivityStreamError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Fake activity stream: seed lines up front, then `follow()` replays them
/// over a channel as though they arrived from the real subprocess.
#[derive(Clone, Default)]
pub struct FakeActivityStream {
    lines: Arc<Mutex<Vec<String>>>,
}

impl FakeActivityStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&self, line: impl Into<String>) {
        self.lines.lock().push(line.into());
    }
}

#[async_trait]
impl ActivityStream for FakeActivityStream {
    async fn follow(&self) -> Result<mpsc::Receiver<String>, ActivityStreamError> {
        let (tx, rx) = mpsc::channel(100);
        let lines = self.lines.lock().clone();
        tokio::spawn(async move {
            for line in lines {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
        });
        Ok(rx)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

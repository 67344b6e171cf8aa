// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op activity stream for when the external stream producer is disabled.

use super::{ActivityStream, ActivityStreamError};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Activity stream that immediately closes with no lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpActivityStream;

impl NoOpActivityStream {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActivityStream for NoOpActivityStream {
    async fn follow(&self) -> Result<mpsc::Receiver<String>, ActivityStreamError> {
        let (_tx, rx) = mpsc::channel(1);
        Ok(rx)
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The work-item store's streaming activity output, one of the activity
//! watcher's two producers (§4.7).

mod bd;
mod noop;

pub use bd::BdActivityStream;
pub use noop::NoOpActivityStream;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeActivityStream;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from subscribing to the activity stream.
#[derive(Debug, Error)]
pub enum ActivityStreamError {
    #[error("failed to start activity stream: {0}")]
    SpawnFailed(String),
}

/// Source of the store's raw, line-oriented activity output
/// (`bd activity --follow`, §6). Each line is handed to the watcher's
/// permissive parser; unparseable lines become a "raw" event.
#[async_trait]
pub trait ActivityStream: Clone + Send + Sync + 'static {
    /// Start following the stream, returning a channel of raw lines. The
    /// producer stops on its own once the receiver is dropped.
    async fn follow(&self) -> Result<mpsc::Receiver<String>, ActivityStreamError>;
}

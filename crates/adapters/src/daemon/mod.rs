// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control of the external agent-store's auxiliary daemons (§4.5 phase 4-5).

mod bd;
mod noop;

pub use bd::BdDaemonControl;
pub use noop::NoOpDaemonControl;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DaemonCall, FakeDaemonControl};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from daemon control operations.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("daemon command failed: {0}")]
    CommandFailed(String),
}

/// A running auxiliary daemon process, as reported by the store's own
/// status listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonProcess {
    pub name: String,
    pub pid: u32,
}

/// Control surface over the work-item store's auxiliary daemons: the
/// `bd bus` family of helper processes started alongside the store itself.
#[async_trait]
pub trait DaemonControl: Clone + Send + Sync + 'static {
    /// Ask the store's own "stop all" hook to terminate every auxiliary
    /// daemon gracefully (SIGTERM equivalent).
    async fn stop_all(&self) -> Result<(), DaemonError>;

    /// Force-terminate any daemon still reporting alive (SIGKILL equivalent).
    async fn force_kill_all(&self) -> Result<(), DaemonError>;

    /// List daemons the store currently reports as running, for respawn
    /// verification (§4.5 phase 5).
    async fn list_running(&self) -> Result<Vec<DaemonProcess>, DaemonError>;
}

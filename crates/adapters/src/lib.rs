// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the external processes Gas Town shells out to: tmux
//! sessions, the `bd` work-item store, forge PR/CI status, and desktop
//! notifications.

mod env;
pub mod activity;
pub mod cost;
pub mod daemon;
pub mod forge;
pub mod notify;
pub mod session;
pub mod subprocess;
pub mod traced;
pub mod workitem;

pub use activity::{ActivityStream, ActivityStreamError, BdActivityStream, NoOpActivityStream};
pub use cost::{CostSource, NoOpCostSource};
pub use daemon::{BdDaemonControl, DaemonControl, DaemonError, DaemonProcess, NoOpDaemonControl};
pub use forge::{CiState, ForgeClient, ForgeError, GhForgeClient, Mergeable, PullRequest};
pub use notify::{DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter};
pub use session::{NoOpSessionAdapter, SessionAdapter, SessionError, TmuxAdapter};
pub use traced::TracedSession;
pub use workitem::{BdWorkItemClient, WorkItemClient, WorkItemClientError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use activity::FakeActivityStream;
#[cfg(any(test, feature = "test-support"))]
pub use cost::FakeCostSource;
#[cfg(any(test, feature = "test-support"))]
pub use daemon::{DaemonCall, FakeDaemonControl};
#[cfg(any(test, feature = "test-support"))]
pub use forge::{FakeForgeClient, ForgeCall};
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use session::{FakeSession, FakeSessionAdapter, SessionCall};
#[cfg(any(test, feature = "test-support"))]
pub use workitem::{FakeWorkItemClient, WorkItemCall};

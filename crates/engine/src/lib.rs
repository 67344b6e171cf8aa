// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Gas Town's core engine: the long-lived components that sit above the
//! adapter boundary — the decision engine (§4.3), the reconciler (§4.4),
//! the shutdown orchestrator (§4.5), the dashboard aggregator (§4.6), and
//! the activity watcher (§4.7).

pub mod aggregator;
pub mod decision;
pub mod env;
pub mod error;
pub mod reconciler;
pub mod shutdown;
pub mod watcher;

pub use aggregator::{Aggregator, RigContext, Snapshot};
pub use decision::DecisionEngine;
pub use error::{EngineError, EngineResult};
pub use reconciler::Reconciler;
pub use shutdown::{ShutdownOptions, ShutdownOrchestrator, ShutdownReport};
pub use watcher::Watcher;

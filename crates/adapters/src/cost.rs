// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session cost enrichment for the aggregator's `polecats` panel (§4.6).
//! No concrete cost subcommand is named in §6, so this stays a thin,
//! optional adapter boundary: a real source can be wired in without
//! touching the aggregator.

use async_trait::async_trait;

/// Looks up a running cost estimate for a session, if a cost source is
/// configured at all.
#[async_trait]
pub trait CostSource: Clone + Send + Sync + 'static {
    /// USD cost attributed to this session so far, or `None` if unknown.
    async fn cost_usd(&self, session: &str) -> Option<f64>;
}

/// Cost source that never has an answer.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpCostSource;

impl NoOpCostSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CostSource for NoOpCostSource {
    async fn cost_usd(&self, _session: &str) -> Option<f64> {
        None
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::CostSource;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Fake cost source for testing: seed costs per session name.
    #[derive(Clone, Default)]
    pub struct FakeCostSource {
        costs: Arc<Mutex<HashMap<String, f64>>>,
    }

    impl FakeCostSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_cost(&self, session: &str, usd: f64) {
            self.costs.lock().insert(session.to_string(), usd);
        }
    }

    #[async_trait]
    impl CostSource for FakeCostSource {
        async fn cost_usd(&self, session: &str) -> Option<f64> {
            self.costs.lock().get(session).copied()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeCostSource;

#[cfg(test)]
#[path = "cost_tests.rs"]
mod tests;

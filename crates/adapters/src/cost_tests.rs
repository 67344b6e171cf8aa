// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn noop_cost_source_never_knows() {
    let source = NoOpCostSource::new();
    assert_eq!(source.cost_usd("gt-myrig-alice").await, None);
}

#[tokio::test]
async fn fake_cost_source_returns_seeded_values() {
    let source = FakeCostSource::new();
    source.set_cost("gt-myrig-alice", 1.23);
    assert_eq!(source.cost_usd("gt-myrig-alice").await, Some(1.23));
    assert_eq!(source.cost_usd("gt-myrig-bob").await, None);
}

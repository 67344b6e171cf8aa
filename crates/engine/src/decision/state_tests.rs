// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use gt_adapters::FakeWorkItemClient;
use gt_core::{DecisionId, DecisionOption, FakeClock};

fn pending_decision() -> Decision {
    Decision {
        id: DecisionId::new("wi-1"),
        prompt: "Pick one".to_string(),
        urgency: gt_core::Urgency::Medium,
        requested_by: "overseer".to_string(),
        requested_at_unix: 0,
        context: String::new(),
        options: vec![
            DecisionOption {
                id: 1,
                label: "A".to_string(),
                description: String::new(),
            },
            DecisionOption {
                id: 2,
                label: "B".to_string(),
                description: String::new(),
            },
        ],
        state: DecisionState::Pending,
    }
}

fn seeded_item() -> gt_core::WorkItem {
    gt_core::WorkItem {
        id: gt_core::WorkItemId::new("wi-1"),
        issue_type: gt_core::IssueType::Decision,
        status: Status::Open,
        priority: 1,
        title: "Pick one".to_string(),
        description: String::new(),
        labels: Default::default(),
        assignee: String::new(),
        created_at: String::new(),
        updated_at: String::new(),
        depends_on: Vec::new(),
        blocks: Vec::new(),
        created_by: String::new(),
    }
}

fn engine() -> DecisionEngine<FakeWorkItemClient, FakeClock> {
    let client = FakeWorkItemClient::new();
    client.seed(seeded_item());
    DecisionEngine::new(client, FakeClock::new(1_000))
}

#[tokio::test]
async fn responding_with_a_valid_choice_resolves_the_decision() {
    let engine = engine();
    let resolved = engine
        .respond(&pending_decision(), 2, Some("try B first".to_string()), "alice")
        .await
        .unwrap();

    match resolved.state {
        DecisionState::Resolved(r) => {
            assert_eq!(r.selected_option, 2);
            assert_eq!(r.rationale.as_deref(), Some("try B first"));
            assert_eq!(r.responded_by, "alice");
        }
        other => panic!("expected Resolved, got {other:?}"),
    }
}

#[tokio::test]
async fn responding_closes_the_underlying_work_item() {
    let client = FakeWorkItemClient::new();
    client.seed(seeded_item());
    let engine = DecisionEngine::new(client.clone(), FakeClock::new(0));
    engine
        .respond(&pending_decision(), 1, None, "alice")
        .await
        .unwrap();

    let item = client
        .get_raw(&gt_core::WorkItemId::new("wi-1"))
        .expect("item was seeded");
    assert_eq!(item.status, Status::Closed);
}

#[tokio::test]
async fn out_of_range_choice_fails_with_invalid_choice() {
    let err = engine()
        .respond(&pending_decision(), 3, None, "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Core(CoreError::InvalidChoice(3))));
}

#[tokio::test]
async fn zero_choice_fails_with_invalid_choice() {
    let err = engine()
        .respond(&pending_decision(), 0, None, "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Core(CoreError::InvalidChoice(0))));
}

#[tokio::test]
async fn responding_to_a_non_pending_decision_fails_with_not_pending() {
    let mut decision = pending_decision();
    decision.state = DecisionState::Cancelled(Cancellation {
        reason: "stale".to_string(),
    });
    let err = engine()
        .respond(&decision, 1, None, "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Core(CoreError::NotPending)));
}

#[tokio::test]
async fn cancel_transitions_to_cancelled_with_the_given_reason() {
    let cancelled = engine()
        .cancel(&pending_decision(), "no longer relevant")
        .await
        .unwrap();
    match cancelled.state {
        DecisionState::Cancelled(c) => assert_eq!(c.reason, "no longer relevant"),
        other => panic!("expected Cancelled, got {other:?}"),
    }
}

#[tokio::test]
async fn cancelling_a_resolved_decision_fails_with_not_pending() {
    let mut decision = pending_decision();
    decision.state = DecisionState::Resolved(Resolution {
        selected_option: 1,
        rationale: None,
        responded_by: "alice".to_string(),
        responded_at_unix: 0,
    });
    let err = engine().cancel(&decision, "too late").await.unwrap_err();
    assert!(matches!(err, EngineError::Core(CoreError::NotPending)));
}

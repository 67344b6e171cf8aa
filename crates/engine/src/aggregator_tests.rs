// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use gt_adapters::{CiState, FakeCostSource, FakeForgeClient, FakeSessionAdapter, FakeWorkItemClient, Mergeable, PullRequest};
use gt_core::{FakeClock, Label, Status, WorkItem, WorkItemId};
use std::time::Duration;

fn work_item(id: &str, issue_type: IssueType, status: Status) -> WorkItem {
    WorkItem {
        id: WorkItemId::new(id),
        issue_type,
        status,
        priority: 2,
        title: id.to_string(),
        description: String::new(),
        labels: Default::default(),
        assignee: String::new(),
        created_at: String::new(),
        updated_at: id.to_string(),
        depends_on: Vec::new(),
        blocks: Vec::new(),
        created_by: String::new(),
    }
}

type TestAggregator =
    Aggregator<FakeWorkItemClient, FakeSessionAdapter, FakeForgeClient, FakeCostSource, FakeClock>;

fn aggregator() -> (
    TestAggregator,
    FakeWorkItemClient,
    FakeSessionAdapter,
    FakeForgeClient,
    FakeCostSource,
) {
    let store = FakeWorkItemClient::new();
    let sessions = FakeSessionAdapter::new();
    let forge = FakeForgeClient::new();
    let cost = FakeCostSource::new();
    let clock = FakeClock::new(10_000);
    let aggregator = Aggregator::new(
        store.clone(),
        sessions.clone(),
        forge.clone(),
        cost.clone(),
        clock,
    );
    (aggregator, store, sessions, forge, cost)
}

#[tokio::test]
async fn convoys_report_progress_and_complete_status() {
    let (aggregator, store, _sessions, _forge, _cost) = aggregator();
    let mut convoy = work_item("wi-convoy", IssueType::Convoy, Status::Open);
    convoy.depends_on = vec![WorkItemId::new("wi-a"), WorkItemId::new("wi-b")];
    store.seed(convoy);
    store.seed(work_item("wi-a", IssueType::Task, Status::Closed));
    store.seed(work_item("wi-b", IssueType::Task, Status::Closed));

    let snapshot = aggregator.fetch(&[], Duration::from_secs(1)).await;

    assert_eq!(snapshot.convoys.len(), 1);
    let convoy = &snapshot.convoys[0];
    assert_eq!(convoy.progress, Progress { closed: 2, total: 2 });
    assert_eq!(convoy.work_status, WorkStatus::Complete);
    assert!(snapshot.errors.is_empty());
}

#[tokio::test]
async fn merge_queue_colors_rows_by_ci_and_mergeable() {
    let (aggregator, _store, _sessions, forge, _cost) = aggregator();
    let repo = parse_remote("git@github.com:acme/widgets.git").unwrap();
    forge.set_open_prs(
        &repo,
        vec![
            PullRequest {
                number: 1,
                title: "red: failing CI".to_string(),
                url: String::new(),
                head_ref: "feature-a".to_string(),
                draft: false,
                ci: CiState::Failure,
                mergeable: Mergeable::Ready,
            },
            PullRequest {
                number: 2,
                title: "green: clean".to_string(),
                url: String::new(),
                head_ref: "feature-b".to_string(),
                draft: false,
                ci: CiState::Success,
                mergeable: Mergeable::Ready,
            },
            PullRequest {
                number: 3,
                title: "yellow: pending CI".to_string(),
                url: String::new(),
                head_ref: "feature-c".to_string(),
                draft: false,
                ci: CiState::Pending,
                mergeable: Mergeable::Ready,
            },
        ],
    );

    let rigs = vec![RigContext {
        name: "widgets".to_string(),
        remote_url: Some("git@github.com:acme/widgets.git".to_string()),
    }];
    let snapshot = aggregator.fetch(&rigs, Duration::from_secs(1)).await;

    assert_eq!(snapshot.merge_queue.len(), 3);
    let color = |n: u64| {
        snapshot
            .merge_queue
            .iter()
            .find(|r| r.pr.number == n)
            .unwrap()
            .color
    };
    assert_eq!(color(1), RowColor::Red);
    assert_eq!(color(2), RowColor::Green);
    assert_eq!(color(3), RowColor::Yellow);
}

#[tokio::test]
async fn rigs_without_a_recognized_remote_are_skipped_in_merge_queue() {
    let (aggregator, _store, _sessions, _forge, _cost) = aggregator();
    let rigs = vec![RigContext {
        name: "no-remote".to_string(),
        remote_url: Some("file:///not/a/forge".to_string()),
    }];

    let snapshot = aggregator.fetch(&rigs, Duration::from_secs(1)).await;
    assert!(snapshot.merge_queue.is_empty());
    assert!(!snapshot.errors.contains_key("merge_queue"));
}

#[tokio::test]
async fn polecats_panel_lists_worker_sessions_with_cost() {
    let (aggregator, _store, sessions, _forge, cost) = aggregator();
    sessions.add_session("gt-widgets-alice", true);
    sessions.set_activity_age("gt-widgets-alice", 30);
    sessions.add_session("gt-widgets-witness", true);
    cost.set_cost("gt-widgets-alice", 4.5);

    let snapshot = aggregator.fetch(&[], Duration::from_secs(1)).await;

    assert_eq!(snapshot.polecats.len(), 1);
    assert_eq!(snapshot.polecats[0].name, "alice");
    assert_eq!(snapshot.polecats[0].cost_usd, Some(4.5));
}

#[tokio::test]
async fn health_panel_tracks_witness_and_refinery_liveness() {
    let (aggregator, _store, sessions, _forge, _cost) = aggregator();
    sessions.add_session("gt-widgets-witness", true);

    let rigs = vec![RigContext {
        name: "widgets".to_string(),
        remote_url: None,
    }];
    let snapshot = aggregator.fetch(&rigs, Duration::from_secs(1)).await;

    let health = &snapshot.health[0];
    assert!(health.witness_alive);
    assert!(!health.refinery_alive);
}

#[tokio::test]
async fn escalations_panel_only_surfaces_pending_high_urgency_decisions() {
    let (aggregator, store, _sessions, _forge, _cost) = aggregator();
    let mut urgent = work_item("wi-d1", IssueType::Decision, Status::Open);
    urgent.labels.insert(Label::new("gt", "decision"));
    urgent.labels.insert(Label::new("urgency", "high"));
    store.seed(urgent);

    let mut low = work_item("wi-d2", IssueType::Decision, Status::Open);
    low.labels.insert(Label::new("gt", "decision"));
    low.labels.insert(Label::new("urgency", "low"));
    store.seed(low);

    let snapshot = aggregator.fetch(&[], Duration::from_secs(1)).await;
    assert_eq!(snapshot.escalations.len(), 1);
    assert_eq!(snapshot.escalations[0].id, WorkItemId::new("wi-d1"));
}

#[tokio::test]
async fn summary_counts_unacked_escalations_and_p1_p2_issues() {
    let (aggregator, store, _sessions, _forge, _cost) = aggregator();
    let mut urgent = work_item("wi-d1", IssueType::Decision, Status::Open);
    urgent.labels.insert(Label::new("gt", "decision"));
    urgent.labels.insert(Label::new("urgency", "high"));
    store.seed(urgent);

    let mut p1 = work_item("wi-t1", IssueType::Task, Status::Open);
    p1.priority = 1;
    store.seed(p1);

    let snapshot = aggregator.fetch(&[], Duration::from_secs(1)).await;
    assert_eq!(snapshot.summary.unacked_escalations, 1);
    assert_eq!(snapshot.summary.p1_p2_issues, 1);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn base_item() -> WorkItem {
    WorkItem {
        id: WorkItemId::new("wi-1"),
        issue_type: IssueType::Agent,
        status: Status::InProgress,
        priority: 2,
        title: "do the thing".into(),
        description: String::new(),
        labels: BTreeSet::new(),
        assignee: String::new(),
        created_at: String::new(),
        updated_at: String::new(),
        depends_on: vec![],
        blocks: vec![],
        created_by: String::new(),
    }
}

#[test]
fn agent_work_item_requires_all_three_conditions() {
    let mut item = base_item();
    assert!(!item.is_agent_work_item(), "missing labels entirely");

    item.labels.insert(Label::new("gt", "agent"));
    assert!(!item.is_agent_work_item(), "missing execution_target");

    item.labels
        .insert(Label::new("execution_target", "remote"));
    assert!(item.is_agent_work_item());

    item.issue_type = IssueType::Task;
    assert!(!item.is_agent_work_item(), "wrong issue_type");
}

#[test]
fn decision_work_item_needs_only_the_gt_decision_label() {
    let mut item = base_item();
    item.issue_type = IssueType::Decision;
    assert!(!item.is_decision_work_item());
    item.labels.insert(Label::new("gt", "decision"));
    assert!(item.is_decision_work_item());
}

#[test]
fn urgency_defaults_to_medium_when_label_absent() {
    let item = base_item();
    assert_eq!(item.urgency(), "medium");
}

#[test]
fn urgency_reads_from_label() {
    let mut item = base_item();
    item.labels.insert(Label::new("urgency", "high"));
    assert_eq!(item.urgency(), "high");
}

#[test]
fn status_terminal_covers_closed_and_cancelled_only() {
    assert!(Status::Closed.is_terminal());
    assert!(Status::Cancelled.is_terminal());
    assert!(!Status::Open.is_terminal());
    assert!(!Status::InProgress.is_terminal());
    assert!(!Status::Hooked.is_terminal());
}

#[test]
fn label_key_and_value_split_on_first_colon() {
    let label = Label::new("rig", "my:rig");
    assert_eq!(label.key(), "rig");
    assert_eq!(label.value(), Some("my:rig"));
}

#[test]
fn unknown_issue_type_deserializes_to_other() {
    let v: IssueType = serde_json::from_str("\"webhook\"").expect("deserializes");
    assert_eq!(v, IssueType::Other);
}

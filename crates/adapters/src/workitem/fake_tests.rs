// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn new_item(title: &str) -> NewWorkItem {
    NewWorkItem {
        title: title.to_string(),
        description: String::new(),
        labels: vec![],
    }
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let client = FakeWorkItemClient::new();
    let id = client.create(new_item("fix the thing")).await.unwrap();

    let item = client.get(&id).await.unwrap();
    assert_eq!(item.title, "fix the thing");
    assert_eq!(item.status, Status::Open);
}

#[tokio::test]
async fn get_unknown_id_errors_not_found() {
    let client = FakeWorkItemClient::new();
    let result = client.get(&WorkItemId::new("wi-999")).await;
    assert!(matches!(result, Err(WorkItemClientError::NotFound(_))));
}

#[tokio::test]
async fn set_status_updates_the_item() {
    let client = FakeWorkItemClient::new();
    let id = client.create(new_item("task")).await.unwrap();

    client.set_status(&id, Status::InProgress).await.unwrap();

    assert_eq!(client.get(&id).await.unwrap().status, Status::InProgress);
}

#[tokio::test]
async fn add_label_is_visible_on_subsequent_get() {
    let client = FakeWorkItemClient::new();
    let id = client.create(new_item("task")).await.unwrap();

    client
        .add_label(&id, Label::new("urgency", "high"))
        .await
        .unwrap();

    let item = client.get(&id).await.unwrap();
    assert_eq!(item.urgency(), "high");
}

#[tokio::test]
async fn list_filters_by_status() {
    let client = FakeWorkItemClient::new();
    let open_id = client.create(new_item("open one")).await.unwrap();
    let closed_id = client.create(new_item("closed one")).await.unwrap();
    client.set_status(&closed_id, Status::Closed).await.unwrap();

    let filter = WorkItemFilter {
        status: Some(Status::Open),
        ..Default::default()
    };
    let items = client.list(&filter).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, open_id);
}

#[tokio::test]
async fn list_filters_by_label() {
    let client = FakeWorkItemClient::new();
    let id = client.create(new_item("agent work")).await.unwrap();
    client
        .add_label(&id, Label::new("gt", "agent"))
        .await
        .unwrap();
    client.create(new_item("plain task")).await.unwrap();

    let filter = WorkItemFilter {
        label: Some("gt:agent".to_string()),
        ..Default::default()
    };
    let items = client.list(&filter).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, id);
}

#[tokio::test]
async fn comment_on_unknown_id_errors() {
    let client = FakeWorkItemClient::new();
    let result = client.comment(&WorkItemId::new("wi-999"), "hi").await;
    assert!(matches!(result, Err(WorkItemClientError::NotFound(_))));
}

#[tokio::test]
async fn seed_makes_a_preexisting_item_visible() {
    let client = FakeWorkItemClient::new();
    client.seed(WorkItem {
        id: WorkItemId::new("wi-42"),
        issue_type: IssueType::Decision,
        status: Status::Open,
        priority: 1,
        title: "seeded".to_string(),
        description: String::new(),
        labels: Default::default(),
        assignee: String::new(),
        created_at: String::new(),
        updated_at: String::new(),
        depends_on: Vec::new(),
        blocks: Vec::new(),
        created_by: String::new(),
    });

    let item = client.get(&WorkItemId::new("wi-42")).await.unwrap();
    assert_eq!(item.title, "seeded");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake work-item client for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NewWorkItem, WorkItemClient, WorkItemClientError};
use async_trait::async_trait;
use gt_core::{IssueType, Label, Status, WorkItem, WorkItemFilter, WorkItemId};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Recorded work-item call
#[derive(Debug, Clone)]
pub enum WorkItemCall {
    List(WorkItemFilter),
    Get(WorkItemId),
    Create(NewWorkItem),
    SetStatus(WorkItemId, Status),
    AddLabel(WorkItemId, Label),
    Comment(WorkItemId, String),
}

struct FakeWorkItemState {
    items: BTreeMap<WorkItemId, WorkItem>,
    calls: Vec<WorkItemCall>,
}

/// In-memory work-item client for testing.
#[derive(Clone)]
pub struct FakeWorkItemClient {
    inner: Arc<Mutex<FakeWorkItemState>>,
    next_id: Arc<AtomicU64>,
}

impl Default for FakeWorkItemClient {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeWorkItemState {
                items: BTreeMap::new(),
                calls: Vec::new(),
            })),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl FakeWorkItemClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a work item directly, bypassing `create`.
    pub fn seed(&self, item: WorkItem) {
        self.inner.lock().items.insert(item.id.clone(), item);
    }

    pub fn calls(&self) -> Vec<WorkItemCall> {
        self.inner.lock().calls.clone()
    }

    pub fn get_raw(&self, id: &WorkItemId) -> Option<WorkItem> {
        self.inner.lock().items.get(id).cloned()
    }
}

#[async_trait]
impl WorkItemClient for FakeWorkItemClient {
    async fn list(&self, filter: &WorkItemFilter) -> Result<Vec<WorkItem>, WorkItemClientError> {
        let mut inner = self.inner.lock();
        inner.calls.push(WorkItemCall::List(filter.clone()));

        Ok(inner
            .items
            .values()
            .filter(|item| {
                filter.issue_type.map_or(true, |t| item.issue_type == t)
                    && filter.status.map_or(true, |s| item.status == s)
                    && filter.label.as_ref().map_or(true, |l| item.has_label(l))
                    && filter
                        .assignee
                        .as_ref()
                        .map_or(true, |a| &item.assignee == a)
            })
            .cloned()
            .collect())
    }

    async fn get(&self, id: &WorkItemId) -> Result<WorkItem, WorkItemClientError> {
        let mut inner = self.inner.lock();
        inner.calls.push(WorkItemCall::Get(id.clone()));
        inner
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| WorkItemClientError::NotFound(id.clone()))
    }

    async fn create(&self, item: NewWorkItem) -> Result<WorkItemId, WorkItemClientError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = WorkItemId::new(format!("wi-{n}"));

        let mut inner = self.inner.lock();
        inner.calls.push(WorkItemCall::Create(item.clone()));

        let work_item = WorkItem {
            id: id.clone(),
            issue_type: IssueType::Task,
            status: Status::Open,
            priority: 2,
            title: item.title,
            description: item.description,
            labels: item.labels.into_iter().collect(),
            assignee: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
            depends_on: Vec::new(),
            blocks: Vec::new(),
            created_by: String::new(),
        };
        inner.items.insert(id.clone(), work_item);

        Ok(id)
    }

    async fn set_status(&self, id: &WorkItemId, status: Status) -> Result<(), WorkItemClientError> {
        let mut inner = self.inner.lock();
        inner.calls.push(WorkItemCall::SetStatus(id.clone(), status));
        match inner.items.get_mut(id) {
            Some(item) => {
                item.status = status;
                Ok(())
            }
            None => Err(WorkItemClientError::NotFound(id.clone())),
        }
    }

    async fn add_label(&self, id: &WorkItemId, label: Label) -> Result<(), WorkItemClientError> {
        let mut inner = self.inner.lock();
        inner
            .calls
            .push(WorkItemCall::AddLabel(id.clone(), label.clone()));
        match inner.items.get_mut(id) {
            Some(item) => {
                item.labels.insert(label);
                Ok(())
            }
            None => Err(WorkItemClientError::NotFound(id.clone())),
        }
    }

    async fn comment(&self, id: &WorkItemId, body: &str) -> Result<(), WorkItemClientError> {
        let mut inner = self.inner.lock();
        inner
            .calls
            .push(WorkItemCall::Comment(id.clone(), body.to_string()));
        if !inner.items.contains_key(id) {
            return Err(WorkItemClientError::NotFound(id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work-item store adapters: Gas Town owns no durable state of its own for
//! work items (§Non-goals) and instead talks to the external `bd` store
//! through this adapter boundary.

mod bd;

pub use bd::BdWorkItemClient;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWorkItemClient, WorkItemCall};

use async_trait::async_trait;
use gt_core::{Label, Status, WorkItem, WorkItemFilter, WorkItemId};
use thiserror::Error;

/// Errors from work-item store operations
#[derive(Debug, Error)]
pub enum WorkItemClientError {
    #[error("work item not found: {0}")]
    NotFound(WorkItemId),
    #[error("bd command failed: {0}")]
    CommandFailed(String),
    #[error("could not parse bd output: {0}")]
    Parse(String),
}

/// A new work item to create, prior to the store assigning it an id.
#[derive(Debug, Clone)]
pub struct NewWorkItem {
    pub title: String,
    pub description: String,
    pub labels: Vec<Label>,
}

/// Client for the external work-item store (`bd`).
///
/// Decision id prefix normalization (stripping/adding the store's `wi-`
/// prefix as needed) happens once, at this boundary — callers above this
/// layer only ever see [`WorkItemId`] as returned by `bd`.
#[async_trait]
pub trait WorkItemClient: Clone + Send + Sync + 'static {
    /// List work items, optionally filtered.
    async fn list(&self, filter: &WorkItemFilter) -> Result<Vec<WorkItem>, WorkItemClientError>;

    /// Fetch a single work item by id.
    async fn get(&self, id: &WorkItemId) -> Result<WorkItem, WorkItemClientError>;

    /// Create a new work item, returning its assigned id.
    async fn create(&self, item: NewWorkItem) -> Result<WorkItemId, WorkItemClientError>;

    /// Transition a work item to a new status.
    async fn set_status(&self, id: &WorkItemId, status: Status) -> Result<(), WorkItemClientError>;

    /// Attach a label to a work item (idempotent).
    async fn add_label(&self, id: &WorkItemId, label: Label) -> Result<(), WorkItemClientError>;

    /// Append a comment/note to a work item's history.
    async fn comment(&self, id: &WorkItemId, body: &str) -> Result<(), WorkItemClientError>;
}

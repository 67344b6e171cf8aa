// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work-item (bead) types: the opaque record the external store hands back,
//! plus the derived predicates the reconciler and decision engine key off.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

crate::define_id! {
    /// Stable identifier for a work item, as assigned by the external store.
    pub struct WorkItemId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Task,
    Agent,
    Convoy,
    Decision,
    MergeRequest,
    Mail,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Hooked,
    Closed,
    Cancelled,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Closed | Status::Cancelled)
    }
}

/// A `key:value` label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label(pub String);

impl Label {
    pub fn new(key: &str, value: &str) -> Self {
        Label(format!("{key}:{value}"))
    }

    pub fn key(&self) -> &str {
        self.0.split_once(':').map(|(k, _)| k).unwrap_or(&self.0)
    }

    pub fn value(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, v)| v)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label(s.to_string())
    }
}

/// An opaque record from the external work-item store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub issue_type: IssueType,
    pub status: Status,
    pub priority: u8,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: BTreeSet<Label>,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub depends_on: Vec<WorkItemId>,
    #[serde(default)]
    pub blocks: Vec<WorkItemId>,
    #[serde(default)]
    pub created_by: String,
}

impl WorkItem {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.0 == label)
    }

    pub fn label_value(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.key() == key)
            .and_then(|l| l.value())
    }

    /// `issue_type == agent` ∧ `gt:agent` ∧ `execution_target:remote` (§3).
    pub fn is_agent_work_item(&self) -> bool {
        self.issue_type == IssueType::Agent
            && self.has_label("gt:agent")
            && self.has_label("execution_target:remote")
    }

    /// `gt:decision` present (§3).
    pub fn is_decision_work_item(&self) -> bool {
        self.has_label("gt:decision")
    }

    /// `urgency:{high,medium,low}`, defaulting to `medium` when absent.
    pub fn urgency(&self) -> &str {
        self.label_value("urgency").unwrap_or("medium")
    }
}

/// Filter parameters accepted by [`crate::workitem`]-consuming clients.
#[derive(Debug, Clone, Default)]
pub struct WorkItemFilter {
    pub issue_type: Option<IssueType>,
    pub status: Option<Status>,
    pub label: Option<String>,
    pub assignee: Option<String>,
}

#[cfg(test)]
#[path = "workitem_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convoy: a work item that tracks progress across a set of child work items
//! (§3, §4.6).

use crate::workitem::WorkItemId;
use serde::{Deserialize, Serialize};

/// `(closed_children, total_children)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub closed: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.closed == self.total
    }
}

/// Activity-derived health of a convoy (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Complete,
    Active,
    Stale,
    Stuck,
    Waiting,
}

/// The three-color activity signal the aggregator maps to `WorkStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityColor {
    Green,
    Yellow,
    Red,
    Unknown,
}

/// Map an activity color to a `WorkStatus`, given completion.
///
/// `complete` takes priority: a convoy with `closed == total && total > 0`
/// is `Complete` regardless of activity color (§4.6).
pub fn work_status(progress: Progress, color: ActivityColor) -> WorkStatus {
    if progress.is_complete() {
        return WorkStatus::Complete;
    }
    match color {
        ActivityColor::Green => WorkStatus::Active,
        ActivityColor::Yellow => WorkStatus::Stale,
        ActivityColor::Red => WorkStatus::Stuck,
        ActivityColor::Unknown => WorkStatus::Waiting,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Convoy {
    pub id: WorkItemId,
    pub title: String,
    pub tracked: Vec<WorkItemId>,
    pub progress: Progress,
    pub last_activity: String,
    pub work_status: WorkStatus,
}

#[cfg(test)]
#[path = "convoy_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Feed event: the merged activity-stream record produced by the activity
//! watcher (§3, §4.7) and consumed by the dashboard / TUI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedEventKind {
    Create,
    Update,
    Complete,
    Fail,
    Delete,
    Pin,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub id: String,
    pub time_unix: u64,
    pub kind: FeedEventKind,
    pub actor: String,
    pub target: String,
    pub message: String,
    pub rig: String,
    pub raw: String,
}

impl FeedEvent {
    /// The key deduplication is keyed on: `(kind, target, message)`.
    pub fn dedup_key(&self) -> (FeedEventKind, &str, &str) {
        (self.kind, self.target.as_str(), self.message.as_str())
    }
}

/// Local event journal visibility (`.events.jsonl` records, §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Feed,
    Both,
    Internal,
}

impl Visibility {
    /// Only `feed` and `both` records are emitted to subscribers.
    pub fn is_emitted(self) -> bool {
        matches!(self, Visibility::Feed | Visibility::Both)
    }
}

/// A raw record read from `<town>/.events.jsonl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub ts: u64,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub actor: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub visibility: Visibility,
}

impl JournalRecord {
    /// Rig is extracted from `payload.rig`, falling back to the first path
    /// segment of `actor` when the actor is not `mayor`/`deacon` (§4.7).
    pub fn rig(&self) -> String {
        if let Some(rig) = self.payload.get("rig").and_then(|v| v.as_str()) {
            return rig.to_string();
        }
        if self.actor != "mayor" && self.actor != "deacon" {
            if let Some((first, _)) = self.actor.split_once('/') {
                return first.to_string();
            }
        }
        String::new()
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;

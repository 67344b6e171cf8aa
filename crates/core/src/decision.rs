// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decision types: the parsed view of a decision work item (§3) and its
//! three-state lifecycle. Parsing and the state machine's transition logic
//! live in `gt-engine::decision` — this module only holds the shape.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Identifier of a decision, equal to its underlying work item's id.
    pub struct DecisionId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Medium
    }
}

impl std::str::FromStr for Urgency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Urgency::High),
            "medium" => Ok(Urgency::Medium),
            "low" => Ok(Urgency::Low),
            _ => Err(()),
        }
    }
}

/// A single selectable option, 1-based by appearance order (§4.3.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: usize,
    pub label: String,
    pub description: String,
}

/// Outcome of a resolved decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub selected_option: usize,
    pub rationale: Option<String>,
    pub responded_by: String,
    pub responded_at_unix: u64,
}

/// Outcome of a cancelled decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    pub reason: String,
}

/// Lifecycle state of a decision (§3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DecisionState {
    Pending,
    Resolved(Resolution),
    Cancelled(Cancellation),
}

impl DecisionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, DecisionState::Pending)
    }
}

/// The parsed view of a decision work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub prompt: String,
    pub urgency: Urgency,
    pub requested_by: String,
    pub requested_at_unix: u64,
    pub context: String,
    pub options: Vec<DecisionOption>,
    pub state: DecisionState,
}

impl Decision {
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, DecisionState::Resolved(_))
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;

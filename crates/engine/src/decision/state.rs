// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The decision state machine (§4.3.2): `pending → resolved | cancelled`,
//! driving the external store through a [`WorkItemClient`] rather than
//! owning any durable state itself.

use crate::error::{EngineError, EngineResult};
use gt_adapters::WorkItemClient;
use gt_core::{Cancellation, Clock, CoreError, Decision, DecisionState, Label, Resolution, Status};

/// Drives decision transitions against the external work-item store.
#[derive(Clone)]
pub struct DecisionEngine<W: WorkItemClient, C: Clock> {
    client: W,
    clock: C,
}

impl<W: WorkItemClient, C: Clock> DecisionEngine<W, C> {
    pub fn new(client: W, clock: C) -> Self {
        Self { client, clock }
    }

    /// `respond(choice, rationale, by)` (§4.3.2). `choice` is 1-based.
    /// Fails with `InvalidChoice` if out of range, `NotPending` if the
    /// decision isn't in the `pending` state.
    pub async fn respond(
        &self,
        decision: &Decision,
        choice: usize,
        rationale: Option<String>,
        by: &str,
    ) -> EngineResult<Decision> {
        if !decision.is_pending() {
            return Err(EngineError::Core(CoreError::NotPending));
        }
        if choice == 0 || choice > decision.options.len() {
            return Err(EngineError::Core(CoreError::InvalidChoice(choice)));
        }

        let responded_at_unix = self.clock.now_unix();
        self.client
            .set_status(&gt_core::WorkItemId::new(decision.id.as_str()), Status::Closed)
            .await?;
        self.client
            .add_label(
                &gt_core::WorkItemId::new(decision.id.as_str()),
                Label::new("decision", "resolved"),
            )
            .await?;
        let option = &decision.options[choice - 1];
        let note = match &rationale {
            Some(r) => format!("resolved: chose \"{}\" ({}) — {}", option.label, choice, r),
            None => format!("resolved: chose \"{}\" ({})", option.label, choice),
        };
        self.client
            .comment(&gt_core::WorkItemId::new(decision.id.as_str()), &note)
            .await?;

        let mut resolved = decision.clone();
        resolved.state = DecisionState::Resolved(Resolution {
            selected_option: choice,
            rationale,
            responded_by: by.to_string(),
            responded_at_unix,
        });
        Ok(resolved)
    }

    /// `cancel(reason)` (§4.3.2). Fails with `NotPending` unless the
    /// decision is currently pending.
    pub async fn cancel(&self, decision: &Decision, reason: &str) -> EngineResult<Decision> {
        if !decision.is_pending() {
            return Err(EngineError::Core(CoreError::NotPending));
        }

        self.client
            .set_status(&gt_core::WorkItemId::new(decision.id.as_str()), Status::Cancelled)
            .await?;
        self.client
            .add_label(
                &gt_core::WorkItemId::new(decision.id.as_str()),
                Label::new("decision", "cancelled"),
            )
            .await?;
        self.client
            .comment(
                &gt_core::WorkItemId::new(decision.id.as_str()),
                &format!("cancelled: {reason}"),
            )
            .await?;

        let mut cancelled = decision.clone();
        cancelled.state = DecisionState::Cancelled(Cancellation {
            reason: reason.to_string(),
        });
        Ok(cancelled)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

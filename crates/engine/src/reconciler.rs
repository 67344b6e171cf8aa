// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The reconciler (component D, §4.4): watches the work-item store for
//! agent work items and keeps tmux sessions in sync with their status.
//!
//! Fail-safe by construction: a store outage during a tick must never cause
//! a session deletion. `tick` only ever returns `Err` for bugs in this
//! process, never for a transient store failure — those are logged and
//! swallowed so the caller's ticker keeps running.

use gt_adapters::{SessionAdapter, WorkItemClient};
use gt_core::{compose_session_name, IssueType, Label, Status, WorkItemFilter};
use std::time::Duration;
use tokio::sync::watch;

/// Watches agent work items and reconciles tmux sessions against them
/// (§4.4). One reconciler per town; the reconciliation loop is
/// single-threaded, so actions for a single work-item id are serialized by
/// construction (§5).
#[derive(Clone)]
pub struct Reconciler<W: WorkItemClient, S: SessionAdapter> {
    store: W,
    sessions: S,
}

impl<W: WorkItemClient, S: SessionAdapter> Reconciler<W, S> {
    pub fn new(store: W, sessions: S) -> Self {
        Self { store, sessions }
    }

    /// Run one reconciliation pass. Never propagates a store error: on
    /// failure it logs the outage and returns having made no session
    /// deletions (§4.4 "Fail-safe").
    pub async fn tick(&self) {
        let filter = WorkItemFilter {
            issue_type: Some(IssueType::Agent),
            ..Default::default()
        };
        let items = match self.store.list(&filter).await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, "work-item store unavailable during reconciliation tick; skipping creates, no sessions touched");
                return;
            }
        };

        let live_sessions = match self.sessions.list_sessions().await {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!(error = %err, "session adapter unavailable during reconciliation tick");
                return;
            }
        };

        for item in items.iter().filter(|i| i.is_agent_work_item()) {
            let Some(session_name) = declared_session_name(item) else {
                continue;
            };
            let exists = live_sessions.contains(&session_name);

            match item.status {
                Status::InProgress if !exists => {
                    if let Err(err) = self.spawn_for(item, &session_name).await {
                        tracing::warn!(item = %item.id, session = %session_name, error = %err, "failed to spawn session for in-progress agent item");
                        continue;
                    }
                    // Idempotent on item id: re-recording the same label is a no-op.
                    if let Err(err) = self
                        .store
                        .add_label(&item.id, Label::new("session", &session_name))
                        .await
                    {
                        tracing::warn!(item = %item.id, error = %err, "failed to record session name on item");
                    }
                }
                Status::Closed if exists => {
                    if let Err(err) = self.sessions.kill(&session_name).await {
                        tracing::warn!(item = %item.id, session = %session_name, error = %err, "failed to kill session for closed item");
                    }
                }
                _ => {}
            }
        }
    }

    async fn spawn_for(
        &self,
        item: &gt_core::WorkItem,
        session_name: &str,
    ) -> Result<(), gt_adapters::SessionError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
        let env = [("GASTOWN_WORK_ITEM_ID".to_string(), item.id.to_string())];
        self.sessions
            .spawn(session_name, &cwd, "", &env)
            .await
            .map(|_| ())
    }

    /// Run the reconciler loop until cancelled: a ticker (default 60s) plus
    /// an optional wake channel fed by the activity watcher's push events
    /// (§4.4).
    pub async fn run(&self, tick_interval: Duration, mut wake: tokio::sync::mpsc::Receiver<()>, mut cancel: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                woken = wake.recv() => {
                    if woken.is_none() {
                        continue;
                    }
                    self.tick().await;
                }
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!("reconciler loop cancelled");
                        return;
                    }
                }
            }
        }
    }
}

/// Derive the session name a work item declares, from its `rig` and
/// `role`/`assignee` labels (§4.4). Returns `None` if the item is missing a
/// `rig` label.
fn declared_session_name(item: &gt_core::WorkItem) -> Option<String> {
    let rig = item.label_value("rig")?;
    let name = item
        .label_value("role")
        .filter(|r| !r.is_empty())
        .or_else(|| Some(item.assignee.as_str()).filter(|a| !a.is_empty()))
        .unwrap_or(item.id.as_str());
    Some(compose_session_name(rig, name))
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;

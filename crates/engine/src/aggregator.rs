// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The aggregator (component F, §4.6): parallel fan-out that assembles a
//! dashboard snapshot within a deadline, recording per-panel errors instead
//! of failing the whole fetch.
//!
//! Several of the "small query" panels (`mail`, `crew`, `escalations`,
//! `hooks`, `issues`, `activity`, `queues`) are pure filters over one bulk
//! work-item listing rather than independent store round-trips: issuing the
//! same `bd list` eight times over would only cost against the same
//! deadline for no benefit, so one listing is shared and a failure on it is
//! attributed to every panel that depends on it.

use gt_adapters::{CostSource, ForgeClient, SessionAdapter, WorkItemClient};
use gt_core::{
    parse_remote, parse_session_role, work_status, ActivityColor, Clock, Convoy, IssueType,
    Progress, Role, SessionInfo, Status, WorkItem, WorkItemFilter, WorkStatus,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// A rig known to the aggregator, as discovered by the caller (the
/// aggregator itself enumerates no rigs of its own — §Non-goals, config
/// discovery lives in `mayor/rigs.json`, read by a layer above this one).
#[derive(Debug, Clone)]
pub struct RigContext {
    pub name: String,
    pub remote_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowColor {
    Red,
    Green,
    Yellow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeQueueRow {
    pub rig: String,
    pub pr: gt_adapters::PullRequest,
    pub color: RowColor,
}

/// Row color per §4.6: red if failing CI or conflicting, green if passing
/// and ready, yellow otherwise (pending CI, or passing but not yet ready).
fn merge_row_color(pr: &gt_adapters::PullRequest) -> RowColor {
    use gt_adapters::{CiState, Mergeable};
    if pr.ci == CiState::Failure || pr.mergeable == Mergeable::Conflict {
        RowColor::Red
    } else if pr.ci == CiState::Success && pr.mergeable == Mergeable::Ready {
        RowColor::Green
    } else {
        RowColor::Yellow
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolecatRow {
    pub session: SessionInfo,
    pub rig: String,
    pub name: String,
    pub cost_usd: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RigHealthRow {
    pub rig: String,
    pub witness_alive: bool,
    pub refinery_alive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueRow {
    pub rig: String,
    pub open: usize,
    pub hooked: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub stuck_convoys: usize,
    pub stale_hooks: usize,
    pub unacked_escalations: usize,
    pub p1_p2_issues: usize,
    pub recent_session_deaths: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub convoys: Vec<Convoy>,
    pub merge_queue: Vec<MergeQueueRow>,
    pub polecats: Vec<PolecatRow>,
    pub mail: Vec<WorkItem>,
    pub rigs: Vec<String>,
    pub crew: Vec<WorkItem>,
    pub escalations: Vec<WorkItem>,
    pub hooks: Vec<WorkItem>,
    pub issues: Vec<WorkItem>,
    pub activity: Vec<WorkItem>,
    pub health: Vec<RigHealthRow>,
    pub queues: Vec<QueueRow>,
    pub mayor: Vec<SessionInfo>,
    pub sessions: Vec<SessionInfo>,
    pub dogs: Vec<SessionInfo>,
    pub summary: Summary,
    pub errors: HashMap<String, String>,
}

/// Parallel fan-out fetcher for the dashboard snapshot (§4.6).
#[derive(Clone)]
pub struct Aggregator<W: WorkItemClient, S: SessionAdapter, F: ForgeClient, C: CostSource, Clk: Clock>
{
    store: W,
    sessions: S,
    forge: F,
    cost: C,
    clock: Clk,
    previous_workers: Arc<Mutex<Option<HashSet<String>>>>,
}

impl<W: WorkItemClient, S: SessionAdapter, F: ForgeClient, C: CostSource, Clk: Clock>
    Aggregator<W, S, F, C, Clk>
{
    pub fn new(store: W, sessions: S, forge: F, cost: C, clock: Clk) -> Self {
        Self {
            store,
            sessions,
            forge,
            cost,
            clock,
            previous_workers: Arc::new(Mutex::new(None)),
        }
    }

    /// Assemble one dashboard snapshot, waiting for either every panel to
    /// finish or `deadline` to elapse (§4.6, §5).
    pub async fn fetch(&self, rigs: &[RigContext], deadline: Duration) -> Snapshot {
        let snapshot = Arc::new(Mutex::new(Snapshot::default()));
        snapshot.lock().rigs = rigs.iter().map(|r| r.name.clone()).collect();

        let _ = tokio::time::timeout(deadline, self.fan_out(rigs, deadline, &snapshot)).await;

        let mut snapshot = Arc::try_unwrap(snapshot)
            .map(Mutex::into_inner)
            .unwrap_or_else(|arc| arc.lock().clone());
        let deaths = if snapshot.errors.contains_key("sessions") {
            0
        } else {
            self.count_session_deaths(&snapshot.sessions)
        };
        snapshot.summary = summarize(&snapshot);
        snapshot.summary.recent_session_deaths = deaths;
        snapshot
    }

    /// Worker sessions present in the previous fetch but absent from this
    /// one. Requires at least one prior `fetch()` call on this instance;
    /// the very first call always reports zero deaths.
    fn count_session_deaths(&self, sessions: &[SessionInfo]) -> usize {
        let current: HashSet<String> = sessions
            .iter()
            .filter(|s| matches!(parse_session_role(&s.name), Some((_, _, Role::Worker))))
            .map(|s| s.name.clone())
            .collect();
        let mut previous = self.previous_workers.lock();
        let deaths = previous
            .as_ref()
            .map(|prev| prev.difference(&current).count())
            .unwrap_or(0);
        *previous = Some(current);
        deaths
    }

    async fn fan_out(&self, rigs: &[RigContext], deadline: Duration, snapshot: &Arc<Mutex<Snapshot>>) {
        let items_cache: Arc<Mutex<Vec<WorkItem>>> = Arc::new(Mutex::new(Vec::new()));
        let items_fut = {
            let this = self.clone();
            let snapshot = snapshot.clone();
            let items_cache = items_cache.clone();
            async move { this.fetch_items(deadline, &snapshot, &items_cache).await }
        };
        let sessions_fut = {
            let this = self.clone();
            let snapshot = snapshot.clone();
            async move { this.fetch_sessions(deadline, &snapshot).await }
        };
        let merge_fut = {
            let this = self.clone();
            let snapshot = snapshot.clone();
            let rigs = rigs.to_vec();
            async move { this.fetch_merge_queue(&rigs, deadline, &snapshot).await }
        };

        tokio::join!(items_fut, sessions_fut, merge_fut);

        // Panels derived from sessions + items together (convoy activity,
        // polecat cost enrichment) run once both inputs are in hand.
        self.enrich_polecats(snapshot).await;
        let items = items_cache.lock().clone();
        self.derive_convoy_activity(snapshot, &items).await;
    }

    async fn fetch_items(
        &self,
        deadline: Duration,
        snapshot: &Arc<Mutex<Snapshot>>,
        items_cache: &Arc<Mutex<Vec<WorkItem>>>,
    ) {
        let names = [
            "mail",
            "crew",
            "escalations",
            "hooks",
            "issues",
            "activity",
            "queues",
            "convoys",
        ];
        match tokio::time::timeout(deadline, self.store.list(&WorkItemFilter::default())).await {
            Ok(Ok(items)) => {
                let mut snapshot = snapshot.lock();
                snapshot.mail = filter_mail(&items);
                snapshot.crew = filter_crew(&items);
                snapshot.escalations = filter_escalations(&items);
                snapshot.hooks = filter_hooks(&items);
                snapshot.issues = filter_issues(&items);
                snapshot.activity = filter_recent_activity(&items);
                snapshot.queues = queue_rows(&items, &snapshot.rigs);
                snapshot.convoys = convoy_rows(&items);
                *items_cache.lock() = items;
            }
            Ok(Err(err)) => record_error(snapshot, &names, &err.to_string()),
            Err(_) => record_error(snapshot, &names, "panel fetch timed out"),
        }
    }

    async fn fetch_sessions(&self, deadline: Duration, snapshot: &Arc<Mutex<Snapshot>>) {
        let names = ["sessions", "polecats", "mayor", "dogs", "health"];
        match tokio::time::timeout(deadline, self.sessions.list_sessions()).await {
            Ok(Ok(names_list)) => {
                let infos = self.session_infos(&names_list).await;
                let mut snapshot = snapshot.lock();
                let rigs = snapshot.rigs.clone();
                snapshot.sessions = infos.clone();
                snapshot.mayor = infos
                    .iter()
                    .filter(|s| matches!(parse_session_role(&s.name), Some((_, _, Role::Mayor))))
                    .cloned()
                    .collect();
                snapshot.dogs = infos
                    .iter()
                    .filter(|s| {
                        matches!(parse_session_role(&s.name), Some((_, _, Role::Worker)))
                            && self.clock.now_unix().saturating_sub(s.last_activity_unix) > 600
                    })
                    .cloned()
                    .collect();
                snapshot.health = health_rows(&rigs, &names_list);
                // polecats themselves are filled in by enrich_polecats once
                // this slice is visible; stash the raw session list for it.
                snapshot.polecats = infos
                    .iter()
                    .filter_map(|s| {
                        let (rig, rest, role) = parse_session_role(&s.name)?;
                        role.is_worker().then(|| PolecatRow {
                            session: s.clone(),
                            rig: rig.to_string(),
                            name: rest.to_string(),
                            cost_usd: None,
                        })
                    })
                    .collect();
            }
            Ok(Err(err)) => record_error(snapshot, &names, &err.to_string()),
            Err(_) => record_error(snapshot, &names, "panel fetch timed out"),
        }
    }

    async fn fetch_merge_queue(
        &self,
        rigs: &[RigContext],
        deadline: Duration,
        snapshot: &Arc<Mutex<Snapshot>>,
    ) {
        let mut handles = Vec::new();
        for rig in rigs {
            let Some(remote) = rig.remote_url.as_deref().and_then(parse_remote) else {
                continue;
            };
            let forge = self.forge.clone();
            let rig_name = rig.name.clone();
            handles.push(tokio::spawn(async move {
                let result = tokio::time::timeout(deadline, forge.open_prs(&remote)).await;
                (rig_name, result)
            }));
        }

        let mut rows = Vec::new();
        let mut error = None;
        for handle in handles {
            let Ok((rig_name, result)) = handle.await else {
                continue;
            };
            match result {
                Ok(Ok(prs)) => rows.extend(prs.into_iter().map(|pr| MergeQueueRow {
                    rig: rig_name.clone(),
                    color: merge_row_color(&pr),
                    pr,
                })),
                Ok(Err(err)) => error = Some(err.to_string()),
                Err(_) => error = Some("panel fetch timed out".to_string()),
            }
        }

        let mut snapshot = snapshot.lock();
        snapshot.merge_queue = rows;
        if let Some(message) = error {
            snapshot.errors.insert("merge_queue".to_string(), message);
        }
    }

    async fn session_infos(&self, names: &[String]) -> Vec<SessionInfo> {
        let mut handles = Vec::with_capacity(names.len());
        for name in names {
            let sessions = self.sessions.clone();
            let name = name.clone();
            handles.push(tokio::spawn(async move {
                let age = sessions
                    .last_activity_secs(&name)
                    .await
                    .ok()
                    .flatten()
                    .unwrap_or(0);
                let attached = sessions.is_alive(&name).await.unwrap_or(false);
                (name, age, attached)
            }));
        }
        let now = self.clock.now_unix();
        let mut infos = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Ok((name, age, attached)) = handle.await {
                infos.push(SessionInfo {
                    name,
                    last_activity_unix: now.saturating_sub(age),
                    attached,
                });
            }
        }
        infos
    }

    async fn enrich_polecats(&self, snapshot: &Arc<Mutex<Snapshot>>) {
        let rows = snapshot.lock().polecats.clone();
        if rows.is_empty() {
            return;
        }
        let mut handles = Vec::with_capacity(rows.len());
        for row in rows {
            let cost = self.cost.clone();
            handles.push(tokio::spawn(async move {
                let cost_usd = cost.cost_usd(&row.session.name).await;
                PolecatRow { cost_usd, ..row }
            }));
        }
        let mut enriched = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Ok(row) = handle.await {
                enriched.push(row);
            }
        }
        snapshot.lock().polecats = enriched;
    }

    async fn derive_convoy_activity(&self, snapshot: &Arc<Mutex<Snapshot>>, items: &[WorkItem]) {
        let sessions = snapshot.lock().sessions.clone();
        let now = self.clock.now_unix();
        let mut snapshot = snapshot.lock();
        for convoy in &mut snapshot.convoys {
            let (activity, color) = activity_for_convoy(convoy, &sessions, items, now);
            convoy.last_activity = activity;
            convoy.work_status = work_status(convoy.progress, color);
        }
    }
}

fn record_error(snapshot: &Arc<Mutex<Snapshot>>, panels: &[&str], message: &str) {
    let mut snapshot = snapshot.lock();
    for panel in panels {
        snapshot.errors.insert((*panel).to_string(), message.to_string());
    }
}

fn filter_mail(items: &[WorkItem]) -> Vec<WorkItem> {
    items
        .iter()
        .filter(|i| i.issue_type == IssueType::Mail)
        .cloned()
        .collect()
}

/// Standing crew agents are tagged `kind:crew`, distinguishing them from the
/// reconciler's ad hoc `agent` work items (polecats).
fn filter_crew(items: &[WorkItem]) -> Vec<WorkItem> {
    items
        .iter()
        .filter(|i| i.has_label("kind:crew"))
        .cloned()
        .collect()
}

/// Unacknowledged high-urgency decisions (§4.3, §4.6).
fn filter_escalations(items: &[WorkItem]) -> Vec<WorkItem> {
    items
        .iter()
        .filter(|i| i.is_decision_work_item() && i.urgency() == "high" && !i.status.is_terminal())
        .cloned()
        .collect()
}

fn filter_hooks(items: &[WorkItem]) -> Vec<WorkItem> {
    items
        .iter()
        .filter(|i| i.status == Status::Hooked)
        .cloned()
        .collect()
}

/// P1/P2 issues: priority is lower-is-more-urgent (§3).
fn filter_issues(items: &[WorkItem]) -> Vec<WorkItem> {
    items
        .iter()
        .filter(|i| i.issue_type == IssueType::Task && i.priority <= 2 && !i.status.is_terminal())
        .cloned()
        .collect()
}

const RECENT_ACTIVITY_LIMIT: usize = 20;

fn filter_recent_activity(items: &[WorkItem]) -> Vec<WorkItem> {
    let mut sorted: Vec<WorkItem> = items.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(RECENT_ACTIVITY_LIMIT);
    sorted
}

fn queue_rows(items: &[WorkItem], rigs: &[String]) -> Vec<QueueRow> {
    rigs.iter()
        .map(|rig| {
            let mut row = QueueRow {
                rig: rig.clone(),
                ..Default::default()
            };
            for item in items {
                if item.label_value("rig") != Some(rig.as_str()) {
                    continue;
                }
                match item.status {
                    Status::Open | Status::InProgress => row.open += 1,
                    Status::Hooked => row.hooked += 1,
                    _ => {}
                }
            }
            row
        })
        .collect()
}

fn health_rows(rigs: &[String], live_sessions: &[String]) -> Vec<RigHealthRow> {
    rigs.iter()
        .map(|rig| RigHealthRow {
            rig: rig.clone(),
            witness_alive: live_sessions.contains(&gt_core::compose_session_name(rig, "witness")),
            refinery_alive: live_sessions
                .contains(&gt_core::compose_session_name(rig, "refinery")),
        })
        .collect()
}

/// Build the convoy rows with progress computed from tracked children, but
/// activity left at the "idle" placeholder until session data is merged in
/// by [`Aggregator::derive_convoy_activity`].
fn convoy_rows(items: &[WorkItem]) -> Vec<Convoy> {
    let by_id: HashMap<_, _> = items.iter().map(|i| (i.id.clone(), i)).collect();
    items
        .iter()
        .filter(|i| i.issue_type == IssueType::Convoy && !i.status.is_terminal())
        .map(|convoy| {
            let tracked = convoy.depends_on.clone();
            let closed = tracked
                .iter()
                .filter(|id| by_id.get(*id).map(|i| i.status.is_terminal()).unwrap_or(false))
                .count();
            let progress = Progress {
                closed,
                total: tracked.len(),
            };
            Convoy {
                id: convoy.id.clone(),
                title: convoy.title.clone(),
                tracked,
                progress,
                last_activity: "idle".to_string(),
                work_status: work_status(progress, ActivityColor::Unknown),
            }
        })
        .collect()
}

/// §4.6 `last_activity` fallback chain: tracked-assignee session activity,
/// then any active polecat session, then the newest `updated_at` among
/// tracked items labeled `unassigned`, then `"idle"`.
fn activity_for_convoy(
    convoy: &Convoy,
    sessions: &[SessionInfo],
    items: &[WorkItem],
    now: u64,
) -> (String, ActivityColor) {
    let tracked_assignee_sessions: Vec<&SessionInfo> = sessions
        .iter()
        .filter(|s| {
            parse_session_role(&s.name)
                .map(|(_, rest, _)| convoy.tracked.iter().any(|t| t.as_str() == rest))
                .unwrap_or(false)
        })
        .collect();
    if let Some(session) = tracked_assignee_sessions
        .iter()
        .min_by_key(|s| s.last_activity_unix.abs_diff(now))
    {
        let age = now.saturating_sub(session.last_activity_unix);
        return (
            format!("{} active {}s ago", session.name, age),
            activity_color_for_age(age),
        );
    }

    if let Some(polecat) = sessions
        .iter()
        .filter(|s| matches!(parse_session_role(&s.name), Some((_, _, Role::Worker))))
        .min_by_key(|s| s.last_activity_unix.abs_diff(now))
    {
        let age = now.saturating_sub(polecat.last_activity_unix);
        return ("polecat active".to_string(), activity_color_for_age(age));
    }

    if let Some(newest) = items
        .iter()
        .filter(|i| convoy.tracked.contains(&i.id) && i.has_label("assignee:unassigned"))
        .max_by_key(|i| i.updated_at.clone())
    {
        return (
            format!("updated {}", newest.updated_at),
            ActivityColor::Unknown,
        );
    }

    ("idle".to_string(), ActivityColor::Unknown)
}

fn activity_color_for_age(age_secs: u64) -> ActivityColor {
    if age_secs <= 300 {
        ActivityColor::Green
    } else if age_secs <= 1800 {
        ActivityColor::Yellow
    } else {
        ActivityColor::Red
    }
}

/// §4.6: computed locally from already-fetched slices, no additional
/// queries.
fn summarize(snapshot: &Snapshot) -> Summary {
    Summary {
        stuck_convoys: snapshot
            .convoys
            .iter()
            .filter(|c| c.work_status == WorkStatus::Stuck)
            .count(),
        stale_hooks: snapshot
            .hooks
            .iter()
            .filter(|h| h.status == Status::Hooked)
            .count(),
        unacked_escalations: snapshot.escalations.len(),
        p1_p2_issues: snapshot.issues.len(),
        recent_session_deaths: 0,
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;

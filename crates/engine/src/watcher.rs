// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The activity watcher (component G, §4.7): merges the local event journal
//! and the work-item store's streaming activity output into one bounded,
//! deduplicated feed.
//!
//! The local journal already carries a typed `type` field (one of the
//! [`gt_core::FeedEventKind`] variants); the external stream does not, so its
//! lines are parsed by a permissive leading-symbol regex instead.

use crate::env::{dedup_gc_interval, dedup_window, journal_poll};
use gt_adapters::ActivityStream;
use gt_core::{Clock, FeedEvent, FeedEventKind, JournalRecord};
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::{mpsc, watch};

const CHANNEL_CAPACITY: usize = 100;
const DEDUP_GC_MAX_AGE_SECS: u64 = 30;

type DedupIndex = Arc<Mutex<HashMap<(FeedEventKind, String, String), u64>>>;

/// Merges the local journal tail and the external activity stream into one
/// feed channel (§4.7).
#[derive(Clone)]
pub struct Watcher<A: ActivityStream, Clk: Clock> {
    activity: A,
    clock: Clk,
    journal_path: PathBuf,
}

impl<A: ActivityStream, Clk: Clock> Watcher<A, Clk> {
    pub fn new(activity: A, clock: Clk, journal_path: impl Into<PathBuf>) -> Self {
        Self {
            activity,
            clock,
            journal_path: journal_path.into(),
        }
    }

    /// Start the three producer tasks (journal tail, stream tail, dedup GC)
    /// and return the merged event channel. The channel closes once both
    /// tailing tasks have exited, which happens once `cancel` fires.
    pub fn start(&self, cancel: watch::Receiver<bool>) -> mpsc::Receiver<FeedEvent> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let index: DedupIndex = Arc::new(Mutex::new(HashMap::new()));

        let journal = self.clone();
        let (journal_tx, journal_index, journal_cancel) = (tx.clone(), index.clone(), cancel.clone());
        tokio::spawn(async move { journal.tail_journal(journal_tx, journal_index, journal_cancel).await });

        let stream = self.clone();
        let (stream_tx, stream_index, stream_cancel) = (tx.clone(), index.clone(), cancel.clone());
        tokio::spawn(async move { stream.tail_stream(stream_tx, stream_index, stream_cancel).await });

        let gc = self.clone();
        tokio::spawn(async move { gc.run_gc(index, cancel).await });

        drop(tx);
        rx
    }

    async fn tail_journal(
        &self,
        tx: mpsc::Sender<FeedEvent>,
        index: DedupIndex,
        mut cancel: watch::Receiver<bool>,
    ) {
        let mut offset = tokio::fs::metadata(&self.journal_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        let mut leftover = String::new();
        let mut ticker = tokio::time::interval(journal_poll());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match read_new_lines(&self.journal_path, &mut offset, &mut leftover).await {
                        Ok(lines) => {
                            for line in lines {
                                if let Some(event) = self.journal_line_to_event(&line, &index) {
                                    if tx.send(event).await.is_err() {
                                        return;
                                    }
                                }
                            }
                        }
                        Err(err) => tracing::warn!(error = %err, "failed to tail event journal"),
                    }
                }
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        return;
                    }
                }
            }
        }
    }

    fn journal_line_to_event(&self, line: &str, index: &DedupIndex) -> Option<FeedEvent> {
        let record: JournalRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(error = %err, "unparseable journal line, skipping");
                return None;
            }
        };
        if !record.visibility.is_emitted() {
            return None;
        }
        let kind = journal_kind(&record.kind);
        let target = record
            .payload
            .get("target")
            .and_then(|v| v.as_str())
            .unwrap_or(&record.actor)
            .to_string();
        let message = record
            .payload
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let rig = record.rig();
        self.build_event(kind, &record.actor, target, message, rig, line, index)
    }

    async fn tail_stream(
        &self,
        tx: mpsc::Sender<FeedEvent>,
        index: DedupIndex,
        mut cancel: watch::Receiver<bool>,
    ) {
        let mut lines = match self.activity.follow().await {
            Ok(lines) => lines,
            Err(err) => {
                tracing::warn!(error = %err, "failed to start activity stream");
                return;
            }
        };

        loop {
            tokio::select! {
                line = lines.recv() => {
                    match line {
                        Some(line) => {
                            if let Some(event) = self.stream_line_to_event(&line, &index) {
                                if tx.send(event).await.is_err() {
                                    return;
                                }
                            }
                        }
                        None => return,
                    }
                }
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        return;
                    }
                }
            }
        }
    }

    /// Parse one line of the external stream. Target/rig for this producer
    /// have no structured payload to read from, so the rig is pulled from
    /// the first path segment of the target, mirroring how the local
    /// journal derives rig from `actor` (§4.7).
    fn stream_line_to_event(&self, line: &str, index: &DedupIndex) -> Option<FeedEvent> {
        let (kind, target, message) = match symbol_re().captures(line) {
            Some(caps) => (
                symbol_kind(&caps["symbol"]),
                caps["target"].to_string(),
                caps["message"].trim().to_string(),
            ),
            None => (FeedEventKind::Raw, line.to_string(), String::new()),
        };
        let rig = target.split_once('/').map(|(rig, _)| rig.to_string()).unwrap_or_default();
        self.build_event(kind, "bd", target, message, rig, line, index)
    }

    /// Stamp, dedup-check, and index one event. Returns `None` if the same
    /// `(kind, target, message)` was seen within the dedup window (§4.7).
    fn build_event(
        &self,
        kind: FeedEventKind,
        actor: &str,
        target: String,
        message: String,
        rig: String,
        raw: &str,
        index: &DedupIndex,
    ) -> Option<FeedEvent> {
        let now = self.clock.now_unix();
        let key = (kind, target.clone(), message.clone());
        {
            let mut index = index.lock();
            if let Some(&last_seen) = index.get(&key) {
                if now.saturating_sub(last_seen) < dedup_window().as_secs() {
                    return None;
                }
            }
            index.insert(key, now);
        }
        Some(FeedEvent {
            id: uuid::Uuid::new_v4().to_string(),
            time_unix: now,
            kind,
            actor: actor.to_string(),
            target,
            message,
            rig,
            raw: raw.to_string(),
        })
    }

    async fn run_gc(&self, index: DedupIndex, mut cancel: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(dedup_gc_interval());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = self.clock.now_unix();
                    index
                        .lock()
                        .retain(|_, last_seen| now.saturating_sub(*last_seen) <= DEDUP_GC_MAX_AGE_SECS);
                }
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        return;
                    }
                }
            }
        }
    }
}

fn journal_kind(raw: &str) -> FeedEventKind {
    match raw {
        "create" => FeedEventKind::Create,
        "update" => FeedEventKind::Update,
        "complete" => FeedEventKind::Complete,
        "fail" => FeedEventKind::Fail,
        "delete" => FeedEventKind::Delete,
        "pin" => FeedEventKind::Pin,
        _ => FeedEventKind::Raw,
    }
}

fn symbol_kind(symbol: &str) -> FeedEventKind {
    match symbol {
        "+" => FeedEventKind::Create,
        "\u{2192}" => FeedEventKind::Update,  // →
        "\u{2713}" => FeedEventKind::Complete, // ✓
        "\u{2717}" => FeedEventKind::Fail,     // ✗
        "\u{2298}" => FeedEventKind::Delete,   // ⊘
        "\u{1F4CC}" => FeedEventKind::Pin,     // 📌
        _ => FeedEventKind::Raw,
    }
}

fn symbol_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<symbol>\+|\u{2192}|\u{2713}|\u{2717}|\u{2298}|\u{1F4CC})\s*(?P<target>\S+)\s*(?P<message>.*)$")
            .expect("valid regex")
    })
}

/// Read and consume any bytes appended to `path` since `offset`, returning
/// complete lines and leaving a trailing partial line in `leftover` for the
/// next call. A file that shrank (rotated out from under us) restarts from
/// the beginning.
async fn read_new_lines(
    path: &Path,
    offset: &mut u64,
    leftover: &mut String,
) -> std::io::Result<Vec<String>> {
    let mut file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let len = file.metadata().await?.len();
    if len < *offset {
        *offset = 0;
        leftover.clear();
    }
    if len == *offset {
        return Ok(Vec::new());
    }

    file.seek(std::io::SeekFrom::Start(*offset)).await?;
    let mut chunk = Vec::new();
    (&mut file).take(len - *offset).read_to_end(&mut chunk).await?;
    *offset = len;

    leftover.push_str(&String::from_utf8_lossy(&chunk));
    let mut lines = Vec::new();
    while let Some(idx) = leftover.find('\n') {
        lines.push(leftover[..idx].trim_end_matches('\r').to_string());
        *leftover = leftover[idx + 1..].to_string();
    }
    Ok(lines)
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;

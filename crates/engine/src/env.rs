// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::time::Duration;

fn secs(var: &str, default: u64) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(default))
}

fn millis(var: &str, default: u64) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(default))
}

/// Reconciler ticker interval (default: 60s, §4.4).
pub fn reconciler_tick() -> Duration {
    secs("GASTOWN_RECONCILER_TICK_SECS", 60)
}

/// Aggregator overall fetch deadline (default: 8s, §4.6).
pub fn aggregator_deadline() -> Duration {
    secs("GASTOWN_AGGREGATOR_DEADLINE_SECS", 8)
}

/// Shutdown lock acquisition timeout (default: 5s, §4.5 phase 0).
pub fn shutdown_lock_timeout() -> Duration {
    secs("GASTOWN_SHUTDOWN_LOCK_TIMEOUT_SECS", 5)
}

/// Shutdown lock acquisition retry interval (default: 100ms, §4.5 phase 0).
pub fn shutdown_lock_retry() -> Duration {
    millis("GASTOWN_SHUTDOWN_LOCK_RETRY_MS", 100)
}

/// Delay before shutdown's post-verification survivor scan (default: 500ms, §4.5 phase 5).
pub fn shutdown_verify_delay() -> Duration {
    millis("GASTOWN_SHUTDOWN_VERIFY_DELAY_MS", 500)
}

/// Grace period a worker session gets between the graceful stop signal and
/// a force-kill, when `force` is set (default: 5s, §4.5 phase 3).
pub fn worker_graceful_deadline() -> Duration {
    secs("GASTOWN_WORKER_GRACEFUL_DEADLINE_SECS", 5)
}

/// Local event journal poll interval (default: 100ms, §4.7).
pub fn journal_poll() -> Duration {
    millis("GASTOWN_JOURNAL_POLL_MS", 100)
}

/// Activity watcher dedup window (default: 2s, §4.7).
pub fn dedup_window() -> Duration {
    secs("GASTOWN_DEDUP_WINDOW_SECS", 2)
}

/// Activity watcher dedup GC interval (default: 30s, §4.7).
pub fn dedup_gc_interval() -> Duration {
    secs("GASTOWN_DEDUP_GC_INTERVAL_SECS", 30)
}

/// TUI decision-list poll interval (default: 5s, §4.8).
pub fn decision_poll() -> Duration {
    secs("GASTOWN_DECISION_POLL_SECS", 5)
}

/// Nuke acknowledgement environment variable name (§6 "Shutdown CLI flags").
pub const NUKE_ACK_VAR: &str = "GASTOWN_CONFIRM_NUKE";

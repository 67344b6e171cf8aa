// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

/// Random prefix for this test run to avoid conflicts with parallel test runs.
static TEST_PREFIX: LazyLock<String> = LazyLock::new(|| {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    format!("t{:04x}", nanos & 0xFFFF)
});

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

fn unique_name(suffix: &str) -> String {
    let id = SESSION_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("gt-{}-{}-{}", *TEST_PREFIX, suffix, id)
}

fn tmux_available() -> bool {
    std::process::Command::new("tmux")
        .arg("-V")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

macro_rules! fail_if_no_tmux {
    () => {
        if !tmux_available() {
            panic!("tmux is required but not available");
        }
    };
}

// All tmux tests are serialized because some tests modify PATH which affects all others.

#[tokio::test]
#[serial(tmux)]
async fn spawn_creates_session_named_after_the_request() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("spawn");

    let id = adapter
        .spawn(&name, Path::new("/tmp"), "sleep 60", &[])
        .await
        .unwrap();

    assert_eq!(id, name);
    assert!(adapter.is_alive(&id).await.unwrap());

    let _ = adapter.kill(&id).await;
}

#[tokio::test]
#[serial(tmux)]
async fn spawn_with_env_passes_environment() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("env");
    let env = vec![("TEST_VAR".to_string(), "test_value".to_string())];

    let id = adapter
        .spawn(&name, Path::new("/tmp"), "echo $TEST_VAR && sleep 60", &env)
        .await
        .unwrap();

    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let output = adapter.capture_output(&id, 10).await.unwrap();
    assert!(output.contains("test_value"));

    let _ = adapter.kill(&id).await;
}

#[tokio::test]
#[serial(tmux)]
async fn spawn_fails_for_nonexistent_cwd() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("badcwd");

    let result = adapter
        .spawn(&name, Path::new("/nonexistent/path/xyz"), "true", &[])
        .await;

    assert!(matches!(result, Err(SessionError::SpawnFailed(_))));
}

#[tokio::test]
#[serial(tmux)]
async fn spawn_twice_with_same_name_kills_and_replaces() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("dup");

    let id1 = adapter
        .spawn(&name, Path::new("/tmp"), "sleep 60", &[])
        .await
        .unwrap();
    let id2 = adapter
        .spawn(&name, Path::new("/tmp"), "sleep 60", &[])
        .await
        .unwrap();

    assert_eq!(id1, id2);
    assert!(adapter.is_alive(&id2).await.unwrap());

    let _ = adapter.kill(&id2).await;
}

#[tokio::test]
#[serial(tmux)]
async fn kill_on_unknown_session_is_not_an_error() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    assert!(adapter.kill("gt-does-not-exist").await.is_ok());
}

#[tokio::test]
#[serial(tmux)]
async fn is_alive_false_for_unknown_session() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    assert!(!adapter.is_alive("gt-does-not-exist").await.unwrap());
}

#[tokio::test]
#[serial(tmux)]
async fn send_and_send_enter_deliver_keystrokes() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("send");

    let id = adapter
        .spawn(&name, Path::new("/tmp"), "cat", &[])
        .await
        .unwrap();

    adapter.send_literal(&id, "hello-from-test").await.unwrap();
    adapter.send_enter(&id).await.unwrap();
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let output = adapter.capture_output(&id, 10).await.unwrap();
    assert!(output.contains("hello-from-test"));

    let _ = adapter.kill(&id).await;
}

#[tokio::test]
#[serial(tmux)]
async fn capture_output_on_unknown_session_errors() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let result = adapter.capture_output("gt-does-not-exist", 10).await;
    assert!(matches!(result, Err(SessionError::NotFound(_))));
}

#[tokio::test]
#[serial(tmux)]
async fn list_sessions_only_returns_gt_prefixed_names() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("list");

    let id = adapter
        .spawn(&name, Path::new("/tmp"), "sleep 60", &[])
        .await
        .unwrap();

    let sessions = adapter.list_sessions().await.unwrap();
    assert!(sessions.contains(&id));
    assert!(sessions.iter().all(|s| s.starts_with("gt-")));

    let _ = adapter.kill(&id).await;
}

#[tokio::test]
#[serial(tmux)]
async fn last_activity_secs_is_small_just_after_spawn() {
    fail_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("activity");

    let id = adapter
        .spawn(&name, Path::new("/tmp"), "sleep 60", &[])
        .await
        .unwrap();

    let age = adapter.last_activity_secs(&id).await.unwrap();
    assert!(age.is_some());
    assert!(age.unwrap() < 10);

    let _ = adapter.kill(&id).await;
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn spawn_records_call_and_tracks_session() {
    let adapter = FakeSessionAdapter::new();
    let id = adapter
        .spawn("gt-myrig-alice", Path::new("/tmp"), "claude", &[])
        .await
        .unwrap();

    assert_eq!(id, "gt-myrig-alice");
    assert!(adapter.is_alive(&id).await.unwrap());

    let calls = adapter.calls();
    assert_eq!(calls.len(), 2); // spawn + is_alive
}

#[tokio::test]
async fn send_to_unknown_session_errors() {
    let adapter = FakeSessionAdapter::new();
    let result = adapter.send("ghost", "hi").await;
    assert!(matches!(result, Err(SessionError::NotFound(_))));
}

#[tokio::test]
async fn kill_removes_the_session() {
    let adapter = FakeSessionAdapter::new();
    let id = adapter
        .spawn("gt-myrig-alice", Path::new("/tmp"), "claude", &[])
        .await
        .unwrap();
    adapter.kill(&id).await.unwrap();
    assert!(!adapter.is_alive(&id).await.unwrap());
}

#[tokio::test]
async fn set_dead_marks_session_alive_false_without_removing() {
    let adapter = FakeSessionAdapter::new();
    let id = adapter
        .spawn("gt-myrig-alice", Path::new("/tmp"), "claude", &[])
        .await
        .unwrap();
    adapter.set_dead(&id);
    assert!(!adapter.is_alive(&id).await.unwrap());
    assert!(adapter.get_session(&id).is_some());
}

#[tokio::test]
async fn capture_output_returns_last_n_lines() {
    let adapter = FakeSessionAdapter::new();
    let id = adapter
        .spawn("gt-myrig-alice", Path::new("/tmp"), "claude", &[])
        .await
        .unwrap();
    adapter.set_output(&id, vec!["a".into(), "b".into(), "c".into()]);

    let out = adapter.capture_output(&id, 2).await.unwrap();
    assert_eq!(out, "b\nc");
}

#[tokio::test]
async fn list_sessions_reflects_preloaded_and_spawned_sessions() {
    let adapter = FakeSessionAdapter::new();
    adapter.add_session("gt-myrig-witness", true);
    adapter
        .spawn("gt-myrig-alice", Path::new("/tmp"), "claude", &[])
        .await
        .unwrap();

    let mut sessions = adapter.list_sessions().await.unwrap();
    sessions.sort();
    assert_eq!(sessions, vec!["gt-myrig-alice", "gt-myrig-witness"]);
}

#[tokio::test]
async fn last_activity_secs_reflects_set_activity_age() {
    let adapter = FakeSessionAdapter::new();
    let id = adapter
        .spawn("gt-myrig-alice", Path::new("/tmp"), "claude", &[])
        .await
        .unwrap();
    adapter.set_activity_age(&id, 900);
    assert_eq!(adapter.last_activity_secs(&id).await.unwrap(), Some(900));
}

#[tokio::test]
async fn kill_server_clears_every_session() {
    let adapter = FakeSessionAdapter::new();
    adapter.add_session("gt-myrig-witness", true);
    adapter
        .spawn("gt-myrig-alice", Path::new("/tmp"), "claude", &[])
        .await
        .unwrap();

    adapter.kill_server().await.unwrap();
    assert!(adapter.list_sessions().await.unwrap().is_empty());
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::Path;

#[tokio::test]
async fn spawn_returns_fixed_id() {
    let adapter = NoOpSessionAdapter::new();
    let id = adapter
        .spawn("gt-x-a", Path::new("/tmp"), "true", &[])
        .await
        .unwrap();
    assert_eq!(id, "noop");
}

#[tokio::test]
async fn is_alive_is_always_false() {
    let adapter = NoOpSessionAdapter::new();
    assert!(!adapter.is_alive("anything").await.unwrap());
}

#[tokio::test]
async fn list_sessions_is_always_empty() {
    let adapter = NoOpSessionAdapter::new();
    assert!(adapter.list_sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn all_mutating_calls_succeed_silently() {
    let adapter = NoOpSessionAdapter::new();
    adapter.send("x", "input").await.unwrap();
    adapter.send_literal("x", "text").await.unwrap();
    adapter.send_enter("x").await.unwrap();
    adapter.kill("x").await.unwrap();
    assert_eq!(adapter.capture_output("x", 10).await.unwrap(), "");
    assert_eq!(adapter.last_activity_secs("x").await.unwrap(), None);
    adapter.kill_server().await.unwrap();
}

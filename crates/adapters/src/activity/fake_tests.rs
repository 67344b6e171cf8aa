// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn follow_replays_seeded_lines_in_order() {
    let stream = FakeActivityStream::new();
    stream.push_line("+ create wi-1");
    stream.push_line("-> update wi-1");

    let mut rx = stream.follow().await.unwrap();
    assert_eq!(rx.recv().await, Some("+ create wi-1".to_string()));
    assert_eq!(rx.recv().await, Some("-> update wi-1".to_string()));
    assert_eq!(rx.recv().await, None);
}

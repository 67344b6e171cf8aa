// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn stop_all_clears_a_cooperative_daemon() {
    let control = FakeDaemonControl::new();
    control.seed_running("beads-bus", 4242);

    control.stop_all().await.unwrap();

    assert!(control.list_running().await.unwrap().is_empty());
    assert_eq!(
        control.calls(),
        vec![DaemonCall::StopAll, DaemonCall::ListRunning]
    );
}

#[tokio::test]
async fn a_respawning_daemon_survives_both_stop_all_and_force_kill() {
    let control = FakeDaemonControl::new();
    control.seed_running("beads-bus", 4242);
    control.set_respawns(true);

    control.stop_all().await.unwrap();
    assert_eq!(control.list_running().await.unwrap().len(), 1);

    control.force_kill_all().await.unwrap();
    assert_eq!(control.list_running().await.unwrap().len(), 1);
}

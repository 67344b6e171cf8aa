// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn stop_all_surfaces_an_error_rather_than_panicking_without_bd() {
    let control = BdDaemonControl::new();
    let result = control.stop_all().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn list_running_surfaces_an_error_rather_than_panicking_without_bd() {
    let control = BdDaemonControl::new();
    let result = control.list_running().await;
    assert!(result.is_err());
}

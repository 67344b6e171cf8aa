// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    completed_success = { "COMPLETED", Some("SUCCESS"), CiState::Success },
    completed_neutral = { "COMPLETED", Some("NEUTRAL"), CiState::Success },
    completed_failure = { "COMPLETED", Some("FAILURE"), CiState::Failure },
    completed_cancelled = { "COMPLETED", Some("CANCELLED"), CiState::Failure },
    completed_unknown_conclusion = { "COMPLETED", Some("STALE"), CiState::Unknown },
    in_progress = { "IN_PROGRESS", None, CiState::Pending },
    queued = { "QUEUED", None, CiState::Pending },
)]
fn check_to_state_maps_gh_status_conclusion_pairs(
    status: &str,
    conclusion: Option<&str>,
    expected: CiState,
) {
    let check = GhCheck {
        status: status.to_string(),
        conclusion: conclusion.map(str::to_string),
    };
    assert_eq!(check_to_state(&check), expected);
}

#[parameterized(
    mergeable = { "MERGEABLE", Mergeable::Ready },
    conflicting = { "CONFLICTING", Mergeable::Conflict },
    unknown = { "UNKNOWN", Mergeable::Pending },
)]
fn mergeable_state_maps_gh_values(raw: &str, expected: Mergeable) {
    assert_eq!(mergeable_state(raw), expected);
}

#[tokio::test]
async fn open_prs_surfaces_an_error_rather_than_panicking_without_gh() {
    let client = GhForgeClient::new();
    let repo = RepoRef {
        host: "github.com".to_string(),
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
    };
    let result = client.open_prs(&repo).await;
    assert!(result.is_err());
}

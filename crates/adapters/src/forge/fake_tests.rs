// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn repo() -> RepoRef {
    RepoRef {
        host: "github.com".to_string(),
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
    }
}

#[tokio::test]
async fn open_prs_defaults_to_empty_for_unseeded_repo() {
    let client = FakeForgeClient::new();
    assert!(client.open_prs(&repo()).await.unwrap().is_empty());
}

#[tokio::test]
async fn set_open_prs_is_returned_verbatim() {
    let client = FakeForgeClient::new();
    let pr = PullRequest {
        number: 1,
        title: "add widget".to_string(),
        url: "https://github.com/acme/widgets/pull/1".to_string(),
        head_ref: "feature/widget".to_string(),
        draft: false,
        ci: CiState::Success,
    };
    client.set_open_prs(&repo(), vec![pr.clone()]);

    let prs = client.open_prs(&repo()).await.unwrap();
    assert_eq!(prs, vec![pr]);
}

#[tokio::test]
async fn ci_status_defaults_to_unknown() {
    let client = FakeForgeClient::new();
    assert_eq!(
        client.ci_status(&repo(), "feature/widget").await.unwrap(),
        CiState::Unknown
    );
}

#[tokio::test]
async fn ci_status_reflects_set_value() {
    let client = FakeForgeClient::new();
    client.set_ci_status(&repo(), "feature/widget", CiState::Failure);
    assert_eq!(
        client.ci_status(&repo(), "feature/widget").await.unwrap(),
        CiState::Failure
    );
}

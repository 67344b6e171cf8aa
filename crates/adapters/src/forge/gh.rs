// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forge client backed by the `gh` CLI.

use super::{CiState, ForgeClient, ForgeError, Mergeable, PullRequest};
use crate::subprocess::{run_with_timeout, FORGE_TIMEOUT};
use async_trait::async_trait;
use gt_core::RepoRef;
use serde::Deserialize;
use tokio::process::Command;

/// Forge client that shells out to the GitHub CLI (`gh`).
#[derive(Clone, Default)]
pub struct GhForgeClient;

impl GhForgeClient {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Deserialize)]
struct GhPr {
    number: u64,
    title: String,
    url: String,
    #[serde(rename = "headRefName")]
    head_ref_name: String,
    #[serde(rename = "isDraft")]
    is_draft: bool,
    mergeable: String,
}

fn mergeable_state(raw: &str) -> Mergeable {
    match raw {
        "MERGEABLE" => Mergeable::Ready,
        "CONFLICTING" => Mergeable::Conflict,
        _ => Mergeable::Pending,
    }
}

#[derive(Deserialize)]
struct GhCheck {
    conclusion: Option<String>,
    status: String,
}

fn check_to_state(check: &GhCheck) -> CiState {
    if check.status != "COMPLETED" {
        return CiState::Pending;
    }
    match check.conclusion.as_deref() {
        Some("SUCCESS") | Some("NEUTRAL") | Some("SKIPPED") => CiState::Success,
        Some("FAILURE") | Some("CANCELLED") | Some("TIMED_OUT") | Some("ACTION_REQUIRED") => {
            CiState::Failure
        }
        _ => CiState::Unknown,
    }
}

#[async_trait]
impl ForgeClient for GhForgeClient {
    async fn open_prs(&self, repo: &RepoRef) -> Result<Vec<PullRequest>, ForgeError> {
        let repo_arg = repo.owner_repo();
        let mut cmd = Command::new("gh");
        cmd.args([
            "pr",
            "list",
            "--repo",
            &repo_arg,
            "--json",
            "number,title,url,headRefName,isDraft,mergeable",
        ]);

        let output = run_with_timeout(cmd, FORGE_TIMEOUT, "gh pr list")
            .await
            .map_err(ForgeError::CommandFailed)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ForgeError::CommandFailed(stderr.to_string()));
        }

        let raw: Vec<GhPr> =
            serde_json::from_slice(&output.stdout).map_err(|e| ForgeError::Parse(e.to_string()))?;

        let mut prs = Vec::with_capacity(raw.len());
        for pr in raw {
            let ci = self.ci_status(repo, &pr.head_ref_name).await?;
            prs.push(PullRequest {
                number: pr.number,
                title: pr.title,
                url: pr.url,
                head_ref: pr.head_ref_name,
                draft: pr.is_draft,
                ci,
                mergeable: mergeable_state(&pr.mergeable),
            });
        }
        Ok(prs)
    }

    async fn ci_status(&self, repo: &RepoRef, head_ref: &str) -> Result<CiState, ForgeError> {
        let repo_arg = repo.owner_repo();
        let mut cmd = Command::new("gh");
        cmd.args([
            "pr",
            "checks",
            head_ref,
            "--repo",
            &repo_arg,
            "--json",
            "status,conclusion",
        ]);

        let output = run_with_timeout(cmd, FORGE_TIMEOUT, "gh pr checks")
            .await
            .map_err(ForgeError::CommandFailed)?;
        if !output.status.success() {
            // gh exits non-zero when checks are failing; the JSON body is
            // still valid and must still be parsed.
            if output.stdout.is_empty() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(ForgeError::CommandFailed(stderr.to_string()));
            }
        }

        let checks: Vec<GhCheck> =
            serde_json::from_slice(&output.stdout).map_err(|e| ForgeError::Parse(e.to_string()))?;

        let states: Vec<CiState> = checks.iter().map(check_to_state).collect();
        Ok(CiState::rollup(&states))
    }
}

#[cfg(test)]
#[path = "gh_tests.rs"]
mod tests;

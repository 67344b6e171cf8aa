// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forge adapters: pull-request and CI status, read through the `gh` CLI
//! for the aggregator's merge-queue and CI-rollup panels (§4.6).

mod gh;

pub use gh::GhForgeClient;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeForgeClient, ForgeCall};

use async_trait::async_trait;
use gt_core::RepoRef;
use thiserror::Error;

/// Errors from forge operations
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("gh command failed: {0}")]
    CommandFailed(String),
    #[error("could not parse gh output: {0}")]
    Parse(String),
}

/// The aggregate CI state for a commit, rolled up across all checks (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CiState {
    Success,
    Failure,
    Pending,
    Unknown,
}

impl CiState {
    /// Roll up a set of per-check conclusions into one state. Any failure
    /// dominates; any pending (with no failures) is pending; all-success is
    /// success; an empty set is unknown.
    pub fn rollup(checks: &[CiState]) -> CiState {
        if checks.is_empty() {
            return CiState::Unknown;
        }
        if checks.iter().any(|c| *c == CiState::Failure) {
            return CiState::Failure;
        }
        if checks.iter().any(|c| *c == CiState::Pending) {
            return CiState::Pending;
        }
        if checks.iter().all(|c| *c == CiState::Success) {
            return CiState::Success;
        }
        CiState::Unknown
    }
}

/// Forge merge-readiness for a pull request (§4.6 merge_queue panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mergeable {
    Ready,
    Conflict,
    Pending,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub head_ref: String,
    pub draft: bool,
    pub ci: CiState,
    pub mergeable: Mergeable,
}

/// Client for a forge's pull-request and CI surface.
#[async_trait]
pub trait ForgeClient: Clone + Send + Sync + 'static {
    /// List open pull requests for a repository.
    async fn open_prs(&self, repo: &RepoRef) -> Result<Vec<PullRequest>, ForgeError>;

    /// Roll up CI status for a specific head ref.
    async fn ci_status(&self, repo: &RepoRef, head_ref: &str) -> Result<CiState, ForgeError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake forge client for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CiState, ForgeClient, ForgeError, PullRequest};
use async_trait::async_trait;
use gt_core::RepoRef;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Recorded forge call
#[derive(Debug, Clone)]
pub enum ForgeCall {
    OpenPrs(RepoRef),
    CiStatus(RepoRef, String),
}

struct FakeForgeState {
    prs: HashMap<String, Vec<PullRequest>>,
    ci: HashMap<(String, String), CiState>,
    calls: Vec<ForgeCall>,
}

/// In-memory forge client for testing.
#[derive(Clone)]
pub struct FakeForgeClient {
    inner: Arc<Mutex<FakeForgeState>>,
}

impl Default for FakeForgeClient {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeForgeState {
                prs: HashMap::new(),
                ci: HashMap::new(),
                calls: Vec::new(),
            })),
        }
    }
}

impl FakeForgeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ForgeCall> {
        self.inner.lock().calls.clone()
    }

    pub fn set_open_prs(&self, repo: &RepoRef, prs: Vec<PullRequest>) {
        self.inner.lock().prs.insert(repo.owner_repo(), prs);
    }

    pub fn set_ci_status(&self, repo: &RepoRef, head_ref: &str, state: CiState) {
        self.inner
            .lock()
            .ci
            .insert((repo.owner_repo(), head_ref.to_string()), state);
    }
}

#[async_trait]
impl ForgeClient for FakeForgeClient {
    async fn open_prs(&self, repo: &RepoRef) -> Result<Vec<PullRequest>, ForgeError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ForgeCall::OpenPrs(repo.clone()));
        Ok(inner.prs.get(&repo.owner_repo()).cloned().unwrap_or_default())
    }

    async fn ci_status(&self, repo: &RepoRef, head_ref: &str) -> Result<CiState, ForgeError> {
        let mut inner = self.inner.lock();
        inner
            .calls
            .push(ForgeCall::CiStatus(repo.clone(), head_ref.to_string()));
        Ok(inner
            .ci
            .get(&(repo.owner_repo(), head_ref.to_string()))
            .copied()
            .unwrap_or(CiState::Unknown))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

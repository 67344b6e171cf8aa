// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Git remote URL parsing, recognizing the three forge-URL shapes in §4.6/§6.

use regex::Regex;
use std::sync::OnceLock;

/// A parsed `owner/repo` pulled from a recognized remote URL form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn owner_repo(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

fn scp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^git@([^:]+):([^/]+)/(.+?)(\.git)?$").expect("valid regex")
    })
}

fn https_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https://([^/]+)/([^/]+)/(.+?)(\.git)?/?$").expect("valid regex")
    })
}

fn ssh_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^ssh://git@([^/]+)/([^/]+)/(.+?)(\.git)?/?$").expect("valid regex")
    })
}

/// Recognize the three required remote forms (§4.6, §6, and testable
/// property #6). Any other form (e.g. `file://`) returns `None`.
pub fn parse_remote(url: &str) -> Option<RepoRef> {
    if let Some(caps) = scp_re().captures(url) {
        return Some(RepoRef {
            host: caps[1].to_string(),
            owner: caps[2].to_string(),
            repo: caps[3].to_string(),
        });
    }
    if let Some(caps) = https_re().captures(url) {
        return Some(RepoRef {
            host: caps[1].to_string(),
            owner: caps[2].to_string(),
            repo: caps[3].to_string(),
        });
    }
    if let Some(caps) = ssh_re().captures(url) {
        return Some(RepoRef {
            host: caps[1].to_string(),
            owner: caps[2].to_string(),
            repo: caps[3].to_string(),
        });
    }
    None
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    scp = {"git@github.com:owner/repo.git", "github.com", "owner", "repo"},
    scp_no_suffix = {"git@github.com:owner/repo", "github.com", "owner", "repo"},
    https = {"https://github.com/owner/repo.git", "github.com", "owner", "repo"},
    https_no_suffix = {"https://github.com/owner/repo", "github.com", "owner", "repo"},
    https_trailing_slash = {"https://github.com/owner/repo/", "github.com", "owner", "repo"},
    ssh = {"ssh://git@github.com/owner/repo.git", "github.com", "owner", "repo"},
    ssh_no_suffix = {"ssh://git@github.com/owner/repo", "github.com", "owner", "repo"},
    enterprise_host = {"git@git.corp.example.com:owner/repo.git", "git.corp.example.com", "owner", "repo"},
)]
fn parses_recognized_remote_forms(url: &str, host: &str, owner: &str, repo: &str) {
    let parsed = parse_remote(url).expect("should parse");
    assert_eq!(parsed.host, host);
    assert_eq!(parsed.owner, owner);
    assert_eq!(parsed.repo, repo);
}

#[test]
fn owner_repo_joins_with_slash() {
    let parsed = parse_remote("https://github.com/owner/repo.git").unwrap();
    assert_eq!(parsed.owner_repo(), "owner/repo");
}

#[parameterized(
    file_scheme = {"file:///home/alice/repo"},
    bare_path = {"/home/alice/repo"},
    empty = {""},
    http_not_https = {"http://github.com/owner/repo"},
)]
fn rejects_unrecognized_forms(url: &str) {
    assert!(parse_remote(url).is_none());
}

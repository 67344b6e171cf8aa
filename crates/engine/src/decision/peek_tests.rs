// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    crew = { "townA/crew/alice", "gt-townA-alice" },
    polecats = { "townA/polecats/bob", "gt-townA-bob" },
    name_with_dash = { "townA/crew/alice-2", "gt-townA-alice-2" },
)]
fn resolves_requester_to_session_name(requested_by: &str, expected: &str) {
    assert_eq!(peek_target(requested_by).unwrap(), expected);
}

#[parameterized(
    overseer = { "overseer" },
    human = { "human" },
    missing_category = { "townA/alice" },
    empty = { "" },
)]
fn rejects_unpeekable_requesters(requested_by: &str) {
    assert!(matches!(
        peek_target(requested_by),
        Err(CoreError::NotPeekable(_))
    ));
}

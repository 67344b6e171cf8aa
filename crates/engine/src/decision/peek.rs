// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session peeking (§4.3.4): resolves a decision's `requested_by` into the
//! session name an operator can capture output from.

use gt_core::{compose_session_name, CoreError, CoreResult};

/// Requesters that never name a peekable session (§4.3.4).
const UNPEEKABLE: &[&str] = &["overseer", "human"];

/// Resolve `requested_by` (`<rig>/<category>/<name>`) into the session name
/// `gt-<rig>-<name>`. Rejects `overseer`/`human` with `NotPeekable`.
pub fn peek_target(requested_by: &str) -> CoreResult<String> {
    if UNPEEKABLE.contains(&requested_by) {
        return Err(CoreError::NotPeekable(requested_by.to_string()));
    }

    let mut parts = requested_by.splitn(3, '/');
    let rig = parts.next().filter(|s| !s.is_empty());
    let category = parts.next().filter(|s| !s.is_empty());
    let name = parts.next().filter(|s| !s.is_empty());

    match (rig, category, name) {
        (Some(rig), Some("crew"), Some(name)) | (Some(rig), Some("polecats"), Some(name)) => {
            Ok(compose_session_name(rig, name))
        }
        _ => Err(CoreError::NotPeekable(requested_by.to_string())),
    }
}

#[cfg(test)]
#[path = "peek_tests.rs"]
mod tests;

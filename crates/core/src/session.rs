// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session naming grammar and the derived agent descriptor.
//!
//! Session names are `gt-<rig>-<rest>`. Splitting on the first two `-` is
//! wrong: `rest` (the agent or role name) may itself contain `-`. Always
//! split on the first `-` to get `rig`, then take everything after the next
//! `-` as `rest` — never assume exactly three `-`-separated parts (Design
//! Notes §9, "Open questions").

use serde::{Deserialize, Serialize};

/// Reserved non-worker role names. Any `rest` outside this set names a
/// worker (a polecat/crew agent).
pub const RESERVED_ROLES: &[&str] = &["witness", "refinery", "mayor", "deacon", "boot"];

/// The role a session plays within a rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Worker,
    Witness,
    Refinery,
    Mayor,
    Deacon,
    Boot,
}

impl Role {
    fn from_rest(rest: &str) -> Role {
        match rest {
            "witness" => Role::Witness,
            "refinery" => Role::Refinery,
            "mayor" => Role::Mayor,
            "deacon" => Role::Deacon,
            "boot" => Role::Boot,
            _ => Role::Worker,
        }
    }

    pub fn is_worker(self) -> bool {
        matches!(self, Role::Worker)
    }
}

/// Build a session name `gt-<rig>-<agent_or_role>`.
pub fn compose_session_name(rig: &str, agent_or_role: &str) -> String {
    format!("gt-{rig}-{agent_or_role}")
}

/// Parse a session name into `(rig, rest)`.
///
/// `rest` is everything after the second `-`, so agent names containing `-`
/// round-trip correctly. Returns `None` if the name doesn't start with `gt-`
/// or has no second `-`.
pub fn parse_session_name(name: &str) -> Option<(&str, &str)> {
    let tail = name.strip_prefix("gt-")?;
    tail.split_once('-')
}

/// Parse a session name into its full descriptor: rig, rest, and role.
pub fn parse_session_role(name: &str) -> Option<(&str, &str, Role)> {
    let (rig, rest) = parse_session_name(name)?;
    Some((rig, rest, Role::from_rest(rest)))
}

/// A session as reported by the multiplexer (§4.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub name: String,
    pub last_activity_unix: u64,
    pub attached: bool,
}

/// A derived view over a session: never stored, always computed from a
/// `SessionInfo` plus the session-name grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub name: String,
    pub rig: String,
    pub session_name: String,
    pub role: Role,
    pub activity_age_secs: u64,
    pub status_hint: String,
}

impl AgentDescriptor {
    /// Derive a descriptor from a session, given the current time.
    ///
    /// Returns `None` if the session name doesn't match the `gt-<rig>-<rest>`
    /// grammar.
    pub fn from_session(session: &SessionInfo, now_unix: u64) -> Option<Self> {
        let (rig, rest, role) = parse_session_role(&session.name)?;
        let activity_age_secs = now_unix.saturating_sub(session.last_activity_unix);
        let status_hint = if session.attached {
            "attached".to_string()
        } else if activity_age_secs > 600 {
            "idle".to_string()
        } else {
            "active".to_string()
        };
        Some(AgentDescriptor {
            name: rest.to_string(),
            rig: rig.to_string(),
            session_name: session.name.clone(),
            role,
            activity_age_secs,
            status_hint,
        })
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized process-wide paths.
//!
//! Session naming, the shutdown lock path, and the event journal path used
//! to be rediscovered ad hoc from a "town root" scattered across call sites.
//! [`Town`] centralizes them: constructed once per process and passed
//! explicitly from there on — no module-level globals (Design Notes §9).

use std::path::{Path, PathBuf};

/// The root workspace: one town, many rigs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Town {
    root: PathBuf,
}

impl Town {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mayor_dir(&self) -> PathBuf {
        self.root.join("mayor")
    }

    pub fn town_json(&self) -> PathBuf {
        self.mayor_dir().join("town.json")
    }

    pub fn rigs_json(&self) -> PathBuf {
        self.mayor_dir().join("rigs.json")
    }

    pub fn config_json(&self) -> PathBuf {
        self.mayor_dir().join("config.json")
    }

    pub fn accounts_json(&self) -> PathBuf {
        self.mayor_dir().join("accounts.json")
    }

    pub fn quota_json(&self) -> PathBuf {
        self.mayor_dir().join("quota.json")
    }

    pub fn beads_dir(&self) -> PathBuf {
        self.mayor_dir().join("rig").join(".beads")
    }

    pub fn events_journal(&self) -> PathBuf {
        self.root.join(".events.jsonl")
    }

    pub fn daemon_dir(&self) -> PathBuf {
        self.root.join("daemon")
    }

    pub fn shutdown_lock(&self) -> PathBuf {
        self.daemon_dir().join("shutdown.lock")
    }

    pub fn runtime_dir(&self) -> PathBuf {
        self.root.join(".runtime")
    }

    pub fn rig(&self, name: &str) -> Rig {
        Rig {
            town_root: self.root.clone(),
            name: name.to_string(),
        }
    }
}

/// A named rig beneath a [`Town`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rig {
    town_root: PathBuf,
    name: String,
}

impl Rig {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> PathBuf {
        self.town_root.join(&self.name)
    }

    pub fn beads_dir(&self) -> PathBuf {
        self.root().join(".beads")
    }

    pub fn polecats_dir(&self) -> PathBuf {
        self.root().join("polecats")
    }

    pub fn crew_dir(&self) -> PathBuf {
        self.root().join("crew")
    }

    pub fn settings_dir(&self) -> PathBuf {
        self.root().join("settings")
    }

    /// Session name for a worker agent in this rig.
    pub fn worker_session(&self, agent: &str) -> String {
        crate::session::compose_session_name(&self.name, agent)
    }

    /// Session name for a reserved role in this rig (`witness`, `refinery`, ...).
    pub fn role_session(&self, role: &str) -> String {
        crate::session::compose_session_name(&self.name, role)
    }
}

/// Rig name grammar: `[A-Za-z0-9][A-Za-z0-9._-]*` (§3).
pub fn is_valid_rig_name(name: &str) -> bool {
    crate::validate::validate_identifier(name).is_ok()
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;

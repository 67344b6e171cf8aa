// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use crate::DaemonError;
use std::path::PathBuf;

/// Resolve the town root: `GASTOWN_HOME` env var, falling back to
/// `~/.gastown` (SPEC_FULL.md §B).
pub fn town_root() -> Result<PathBuf, DaemonError> {
    if let Ok(dir) = std::env::var("GASTOWN_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").map_err(|_| DaemonError::NoHomeDir)?;
    Ok(PathBuf::from(home).join(".gastown"))
}

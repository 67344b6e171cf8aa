// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate. Mirrors
//! `gt-daemon::env` rather than depending on it, matching the teacher's
//! convention of a separate `env.rs` per binary crate.

use std::path::PathBuf;

/// Resolve the town root: `GASTOWN_HOME` env var, falling back to
/// `~/.gastown` (SPEC_FULL.md §B).
pub fn town_root() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("GASTOWN_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("could not determine a home directory for the GASTOWN_HOME fallback"))?;
    Ok(PathBuf::from(home).join(".gastown"))
}

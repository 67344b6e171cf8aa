// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by every component of the orchestration core.
//!
//! One sum type per §7 of the spec. Callers match on variants, never on
//! message text — the work-item client normalizes "not found" into a real
//! `NotFound`, not a detected substring in stderr.

use thiserror::Error;

/// Errors surfaced by the orchestration core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Requested session, work item, or lock target does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Identifier failed the whitelist, or a payload exceeded its size cap.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The shutdown lock is already held by another run.
    #[error("another shutdown is already in progress")]
    AnotherShutdownInProgress,

    /// The work-item store subprocess failed or timed out.
    #[error("work-item store unavailable: {0}")]
    StoreUnavailable(String),

    /// `respond` was given a choice outside `1..=options.len()`.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// `respond`/`cancel` was attempted on a decision that is not pending.
    #[error("decision is not pending")]
    NotPending,

    /// A peek was requested for a requester that has no session.
    #[error("not peekable: {0}")]
    NotPeekable(String),

    /// An external call exceeded its deadline.
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Unclassified subprocess failure; `0` holds stderr verbatim.
    #[error("{0}")]
    Transient(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

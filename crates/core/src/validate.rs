// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whitelisting for strings that become subprocess arguments.
//!
//! Every identifier that reaches `bd` or `tmux` on the argv is validated here
//! first (§4.2, §5 "Subprocess discipline"). Never pass an unvalidated string
//! into an argument vector.

use crate::error::CoreError;
use regex::Regex;
use std::sync::OnceLock;

const MAX_IDENTIFIER_LEN: usize = 200;
const MAX_TITLE_LEN: usize = 500;
const MAX_SUBJECT_LEN: usize = 500;
const MAX_DESCRIPTION_LEN: usize = 100_000;
const MAX_MAIL_BODY_LEN: usize = 100_000;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"))
}

fn repo_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*/[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex")
    })
}

/// Validate a bare identifier (work-item id, rig name, label key, etc.)
/// against `^[A-Za-z0-9][A-Za-z0-9._-]*$`, length <= 200.
pub fn validate_identifier(s: &str) -> Result<(), CoreError> {
    if s.len() > MAX_IDENTIFIER_LEN {
        return Err(CoreError::InvalidInput(format!(
            "identifier exceeds {} bytes",
            MAX_IDENTIFIER_LEN
        )));
    }
    if !identifier_re().is_match(s) {
        return Err(CoreError::InvalidInput(format!("invalid identifier: {s}")));
    }
    Ok(())
}

/// Validate a `owner/repo`-shaped reference.
pub fn validate_repo_ref(s: &str) -> Result<(), CoreError> {
    if !repo_ref_re().is_match(s) {
        return Err(CoreError::InvalidInput(format!("invalid repo ref: {s}")));
    }
    Ok(())
}

/// Reject control characters (other than none — titles/subjects are single line).
pub fn validate_no_control_chars(s: &str, field: &str) -> Result<(), CoreError> {
    if s.chars().any(|c| c.is_control()) {
        return Err(CoreError::InvalidInput(format!(
            "{field} contains control characters"
        )));
    }
    Ok(())
}

pub fn validate_title(s: &str) -> Result<(), CoreError> {
    validate_no_control_chars(s, "title")?;
    if s.len() > MAX_TITLE_LEN {
        return Err(CoreError::InvalidInput(format!(
            "title exceeds {} bytes",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

pub fn validate_subject(s: &str) -> Result<(), CoreError> {
    validate_no_control_chars(s, "subject")?;
    if s.len() > MAX_SUBJECT_LEN {
        return Err(CoreError::InvalidInput(format!(
            "subject exceeds {} bytes",
            MAX_SUBJECT_LEN
        )));
    }
    Ok(())
}

pub fn validate_description(s: &str) -> Result<(), CoreError> {
    if s.len() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::InvalidInput(format!(
            "description exceeds {} bytes",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

pub fn validate_mail_body(s: &str) -> Result<(), CoreError> {
    if s.len() > MAX_MAIL_BODY_LEN {
        return Err(CoreError::InvalidInput(format!(
            "mail body exceeds {} bytes",
            MAX_MAIL_BODY_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses a decision work item's markdown `description` into a [`Decision`]
//! (§4.3.1). The parser is total: a malformed description yields zero
//! options and empty context rather than an error, so the UI can still show
//! the item with selection disabled.

use gt_core::{Decision, DecisionId, DecisionOption, DecisionState, Urgency, WorkItem};
use std::sync::OnceLock;

fn option_heading_re() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"^### [0-9]+\. (.+)$").expect("valid regex"))
}

fn requested_by_re() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"^_Requested by: (.+)_$").expect("valid regex"))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Option(usize),
    Context,
}

struct Scan {
    options: Vec<DecisionOption>,
    context_lines: Vec<String>,
    requested_by: Option<String>,
}

/// Scan a decision description into its options, context block, and
/// `requested_by` override, per the line-by-line grammar of §4.3.1.
fn scan(description: &str) -> Scan {
    let mut options: Vec<DecisionOption> = Vec::new();
    let mut context_lines: Vec<String> = Vec::new();
    let mut requested_by = None;
    let mut section = Section::None;

    for line in description.lines() {
        let trimmed = line.trim();

        if let Some(caps) = requested_by_re().captures(trimmed) {
            requested_by = Some(caps[1].to_string());
            continue;
        }

        if line.starts_with("---") {
            section = Section::None;
            continue;
        }

        if let Some(caps) = option_heading_re().captures(line) {
            options.push(DecisionOption {
                id: options.len() + 1,
                label: caps[1].to_string(),
                description: String::new(),
            });
            section = Section::Option(options.len() - 1);
            continue;
        }

        if line.starts_with("###") {
            // A ### heading that isn't a numbered option still ends the
            // current section without opening a new one.
            section = Section::None;
            continue;
        }

        if line.starts_with("## ") {
            section = if trimmed == "## Context" {
                Section::Context
            } else {
                Section::None
            };
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        match section {
            Section::Option(idx) => {
                let opt = &mut options[idx];
                if opt.description.is_empty() {
                    opt.description = trimmed.to_string();
                } else {
                    opt.description.push('\n');
                    opt.description.push_str(trimmed);
                }
            }
            Section::Context => context_lines.push(trimmed.to_string()),
            Section::None => {}
        }
    }

    Scan {
        options,
        context_lines,
        requested_by,
    }
}

/// Parse an RFC3339 timestamp into seconds since the Unix epoch, falling
/// back to `0` on any malformed input (the parser is total, §4.3.1).
fn parse_rfc3339_secs(s: &str) -> u64 {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp().max(0) as u64)
        .unwrap_or(0)
}

/// Parse a decision work item into its [`Decision`] view. Always succeeds:
/// a malformed description degrades to zero options and empty context.
pub fn parse(item: &WorkItem) -> Decision {
    let scan = scan(&item.description);
    let urgency = item.urgency().parse::<Urgency>().unwrap_or_default();
    let requested_by = scan
        .requested_by
        .unwrap_or_else(|| item.created_by.clone());

    // A decision's resolution/cancellation detail (selected option, rationale,
    // responder) lives in the engine's in-memory transition, not recoverable
    // from the bare work item once closed externally — `parse` only ever
    // reconstructs a faithful view for items still open.
    let state = match item.status {
        gt_core::Status::Cancelled => DecisionState::Cancelled(gt_core::Cancellation {
            reason: String::new(),
        }),
        gt_core::Status::Closed => DecisionState::Resolved(gt_core::Resolution {
            selected_option: 0,
            rationale: None,
            responded_by: String::new(),
            responded_at_unix: 0,
        }),
        _ => DecisionState::Pending,
    };

    Decision {
        id: DecisionId::new(item.id.as_str()),
        prompt: item.title.clone(),
        urgency,
        requested_by,
        requested_at_unix: parse_rfc3339_secs(&item.created_at),
        context: scan.context_lines.join("\n"),
        options: scan.options,
        state,
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

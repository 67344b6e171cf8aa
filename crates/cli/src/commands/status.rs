// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gt status` — one-shot or `--watch`ed render of an aggregator snapshot
//! (§4.6, SPEC_FULL.md §C item 2). Plain ANSI, no TUI crate: the
//! cursor-home-then-clear-to-end redraw avoids polluting scrollback the way
//! a full clear-screen would.

use std::fmt::Write as _;
use std::io::IsTerminal;
use std::time::Duration;

use anyhow::Result;
use gt_adapters::{BdWorkItemClient, GhForgeClient, NoOpCostSource, TmuxAdapter};
use gt_core::{SystemClock, Town};
use gt_engine::{Aggregator, Snapshot};

const CURSOR_HOME: &str = "\x1B[H";
const CLEAR_TO_END: &str = "\x1B[J";
const CLEAR_TO_EOL: &str = "\x1B[K";

pub async fn run(town: &Town, watch: bool, interval: &str) -> Result<()> {
    let rigs = gt_daemon::discover_rigs(town)?;
    let aggregator = Aggregator::new(
        BdWorkItemClient::new(),
        TmuxAdapter::new(),
        GhForgeClient::new(),
        NoOpCostSource::new(),
        SystemClock,
    );

    if !watch {
        let snapshot = aggregator.fetch(&rigs, gt_engine::env::aggregator_deadline()).await;
        print!("{}", render(&snapshot));
        return Ok(());
    }

    let interval = parse_interval(interval)?;
    let is_tty = std::io::stdout().is_terminal();
    loop {
        let snapshot = aggregator.fetch(&rigs, gt_engine::env::aggregator_deadline()).await;
        print!("{}", frame(&render(&snapshot), is_tty));
        std::io::Write::flush(&mut std::io::stdout())?;
        tokio::time::sleep(interval).await;
    }
}

fn parse_interval(s: &str) -> Result<Duration> {
    let digits = s.trim().trim_end_matches('s');
    let secs: u64 = digits
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid --interval {s:?}, expected e.g. \"2\" or \"2s\""))?;
    if secs == 0 {
        anyhow::bail!("--interval must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

/// Wrap a rendered frame for in-place redraw on a real terminal; piped
/// output is left untouched.
fn frame(content: &str, is_tty: bool) -> String {
    if !is_tty {
        return content.to_string();
    }
    let cleared = content.replace('\n', &format!("{CLEAR_TO_EOL}\n"));
    format!("{CURSOR_HOME}{cleared}{CLEAR_TO_END}")
}

fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    let s = &snapshot.summary;
    let _ = writeln!(
        out,
        "stuck_convoys={} stale_hooks={} unacked_escalations={} p1_p2_issues={} recent_session_deaths={}",
        s.stuck_convoys, s.stale_hooks, s.unacked_escalations, s.p1_p2_issues, s.recent_session_deaths
    );

    let _ = writeln!(out, "\nconvoys:");
    for c in &snapshot.convoys {
        let _ = writeln!(
            out,
            "  {:<24} {}/{:<4} {:<10?} {}",
            c.id.as_str(),
            c.progress.closed,
            c.progress.total,
            c.work_status,
            c.last_activity
        );
    }

    let _ = writeln!(out, "\nmerge_queue:");
    for row in &snapshot.merge_queue {
        let _ = writeln!(
            out,
            "  {:<10} #{:<6} {:<10?} {:<10?} {}",
            row.rig, row.pr.number, row.pr.ci, row.pr.mergeable, row.pr.title
        );
    }

    let _ = writeln!(out, "\npolecats:");
    for row in &snapshot.polecats {
        let cost = row
            .cost_usd
            .map(|c| format!("${c:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "  {:<10} {:<20} {}", row.rig, row.name, cost);
    }

    let _ = writeln!(out, "\nhealth:");
    for row in &snapshot.health {
        let _ = writeln!(
            out,
            "  {:<10} witness={} refinery={}",
            row.rig, row.witness_alive, row.refinery_alive
        );
    }

    let _ = writeln!(out, "\nescalations: {}", snapshot.escalations.len());
    let _ = writeln!(out, "hooks: {}", snapshot.hooks.len());
    let _ = writeln!(out, "issues: {}", snapshot.issues.len());
    let _ = writeln!(out, "mail: {}", snapshot.mail.len());

    if !snapshot.errors.is_empty() {
        let _ = writeln!(out, "\npanel errors:");
        for (panel, err) in &snapshot.errors {
            let _ = writeln!(out, "  {panel}: {err}");
        }
    }

    out
}

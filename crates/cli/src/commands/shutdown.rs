// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gt shutdown`: drives the shutdown orchestrator (§4.5) against the
//! town's own tmux sessions and `bd` daemons, and reports per-phase status
//! lines (§7 "user-visible failure behavior").

use anyhow::Result;
use gt_adapters::{BdDaemonControl, TmuxAdapter};
use gt_core::Town;
use gt_engine::{ShutdownOptions, ShutdownOrchestrator};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    town: &Town,
    rigs: Vec<String>,
    quiet: bool,
    force: bool,
    all: bool,
    nuke: bool,
    dry_run: bool,
) -> Result<()> {
    let rigs = if rigs.is_empty() {
        gt_daemon::discover_rigs(town)?
            .into_iter()
            .map(|r| r.name)
            .collect()
    } else {
        rigs
    };

    let orchestrator = ShutdownOrchestrator::new(TmuxAdapter::new(), BdDaemonControl::new(), town.shutdown_lock());
    let opts = ShutdownOptions {
        dry_run,
        force,
        all,
        nuke,
    };

    let report = orchestrator.run(&rigs, &opts).await?;

    for phase in &report.phases {
        if quiet && phase.ok {
            continue;
        }
        let symbol = if phase.ok { "ok" } else { "FAILED" };
        println!("[{symbol}] {}: {}", phase.phase, phase.detail);
    }
    for survivor in &report.respawned {
        println!("[WARNING] still alive after verification: {survivor}");
    }

    if !report.succeeded() {
        std::process::exit(1);
    }
    Ok(())
}

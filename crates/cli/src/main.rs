// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gt` — the Gas Town operator CLI: shutdown, status, and the decision
//! queue (§4.5, §4.6, §4.8). Talks to the same external stores the daemon
//! does; there is no RPC surface between them (SPEC_FULL.md §A).

mod commands;
mod env;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gt_core::Town;

#[derive(Parser)]
#[command(name = "gt", version, about = "Gas Town operator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stop sessions and daemons for a town, in dependency order
    Shutdown {
        /// Only these rigs (default: every rig under mayor/rigs.json)
        rigs: Vec<String>,
        /// Only print failed phases
        #[arg(long)]
        quiet: bool,
        /// Force-kill workers that don't exit gracefully
        #[arg(long)]
        force: bool,
        /// Also stop daemons and verify nothing respawned
        #[arg(long)]
        all: bool,
        /// Kill the tmux server outright (requires GASTOWN_CONFIRM_NUKE)
        #[arg(long)]
        nuke: bool,
        /// Report what would happen without doing it
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Render a snapshot of convoys, merge queue, polecats, and health
    Status {
        /// Redraw in place on an interval instead of printing once
        #[arg(long)]
        watch: bool,
        /// Redraw interval, e.g. "2" or "2s" (only with --watch)
        #[arg(long, default_value = "2s")]
        interval: String,
    },
    /// Interactively triage the pending decision queue
    Decide,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {msg}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let town = Town::new(env::town_root()?);

    match cli.command {
        Commands::Shutdown {
            rigs,
            quiet,
            force,
            all,
            nuke,
            dry_run,
        } => commands::shutdown::run(&town, rigs, quiet, force, all, nuke, dry_run).await,
        Commands::Status { watch, interval } => commands::status::run(&town, watch, &interval).await,
        Commands::Decide => commands::decide::run().await,
    }
}

/// Format an anyhow error, deduplicating the chain: if every cause's message
/// already appears in the top-level Display, the chain is redundant (common
/// with thiserror `#[from]` variants).
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err.chain().skip(1).all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {i}: {cause}"));
    }
    buf
}

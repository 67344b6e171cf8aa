// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gtd` — the Gas Town daemon.
//!
//! One long-lived process per town: owns the reconciler (component D) and
//! the activity watcher (component G), wired so that a watcher event wakes
//! the reconciler early instead of waiting for its next tick (§4.4, §5).
//! `gt-cli`'s `shutdown`/`status`/`decide` commands talk to the same
//! external stores directly and never go through this process — there is
//! no RPC surface here.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use gt_daemon::{Config, DaemonError, DaemonLock};
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("gtd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                eprintln!("Usage: gtd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;

    rotate_log_if_needed(&config.log_path);
    write_startup_marker(&config)?;
    let log_guard = setup_logging(&config)?;

    info!(town = %config.town.root().display(), "starting gtd");

    let _lock = match DaemonLock::acquire(&config) {
        Ok(lock) => lock,
        Err(DaemonError::AlreadyRunning(pid)) => {
            eprintln!("gtd is already running");
            if !pid.is_empty() {
                eprintln!("  pid: {pid}");
            }
            std::process::exit(1);
        }
        Err(err) => {
            write_startup_error(&config, &err);
            error!(error = %err, "failed to start gtd");
            drop(log_guard);
            return Err(err.into());
        }
    };

    let rigs = gt_daemon::discover_rigs(&config.town)?;
    info!(rig_count = rigs.len(), "discovered rigs");

    let (reconciler, watcher) = gt_daemon::build(&config);

    let (cancel_tx, cancel_rx) = tokio::sync::watch::channel(false);
    let (wake_tx, wake_rx) = tokio::sync::mpsc::channel(16);

    // The watcher's merged feed wakes the reconciler early; a full replay of
    // every event's contents is unnecessary, only that something changed.
    let mut events = watcher.start(cancel_rx.clone());
    let bridge = tokio::spawn(async move {
        while events.recv().await.is_some() {
            if wake_tx.send(()).await.is_err() {
                return;
            }
        }
    });

    let reconciler_task = {
        let reconciler = reconciler.clone();
        let cancel_rx = cancel_rx.clone();
        tokio::spawn(async move {
            reconciler
                .run(gt_engine::env::reconciler_tick(), wake_rx, cancel_rx)
                .await;
        })
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    let _ = cancel_tx.send(true);

    let drain = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = reconciler_task.await;
        let _ = bridge.await;
    });
    if drain.await.is_err() {
        warn!("gtd did not drain within 5s, exiting anyway");
    }

    info!("gtd stopped");
    Ok(())
}

fn print_help() {
    println!("gtd {}", env!("CARGO_PKG_VERSION"));
    println!("Gas Town daemon - runs the reconciler and activity watcher for one town");
    println!();
    println!("USAGE:");
    println!("    gtd");
    println!();
    println!("Town root is resolved from GASTOWN_HOME, falling back to ~/.gastown.");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
}

/// Maximum log file size before rotation (10 MB), matching the daemon's
/// house convention for long-lived file logging.
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;
const MAX_ROTATED_LOGS: u32 = 3;

/// Rotate `daemon.log` → `.1` → `.2` → `.3`, deleting the oldest. Best
/// effort: rotation failures are silently ignored so the daemon still
/// starts.
fn rotate_log_if_needed(log_path: &std::path::Path) {
    let size = match std::fs::metadata(log_path) {
        Ok(m) => m.len(),
        Err(_) => return,
    };
    if size < MAX_LOG_SIZE {
        return;
    }

    let log_str = log_path.display().to_string();
    for i in (1..MAX_ROTATED_LOGS).rev() {
        let from = format!("{log_str}.{i}");
        let to = format!("{log_str}.{}", i + 1);
        let _ = std::fs::rename(&from, &to);
    }
    let _ = std::fs::rename(log_path, format!("{log_str}.1"));
}

const STARTUP_MARKER_PREFIX: &str = "--- gtd: starting (pid: ";

/// Write a startup marker to the log before tracing is initialized, so an
/// operator tailing the log can find where the current run begins.
fn write_startup_marker(config: &Config) -> Result<(), DaemonError> {
    use std::io::Write;
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    writeln!(file, "{}{}) ---\n", STARTUP_MARKER_PREFIX, std::process::id())?;
    Ok(())
}

/// Write a startup error synchronously, since the non-blocking tracing
/// writer may not flush before a fast exit.
fn write_startup_error(config: &Config, error: &DaemonError) {
    use std::io::Write;
    let Ok(mut file) = std::fs::OpenOptions::new().create(true).append(true).open(&config.log_path) else {
        return;
    };
    let _ = writeln!(file, "ERROR failed to start gtd: {error}");
}

fn setup_logging(config: &Config) -> Result<tracing_appender::non_blocking::WorkerGuard, DaemonError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(DaemonError::NoHomeDir)?,
        config.log_path.file_name().ok_or(DaemonError::NoHomeDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the engine crate: wraps the core error sum type plus
//! the adapter errors each component can surface.

use gt_adapters::{ForgeError, SessionError, WorkItemClientError};
use gt_core::CoreError;
use thiserror::Error;

/// Errors surfaced by engine components (decision engine, reconciler,
/// shutdown orchestrator, aggregator, activity watcher).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("session adapter error: {0}")]
    Session(#[from] SessionError),

    #[error("work-item client error: {0}")]
    WorkItem(#[from] WorkItemClientError),

    #[error("forge client error: {0}")]
    Forge(#[from] ForgeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("shutdown lock busy: {0}")]
    LockBusy(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

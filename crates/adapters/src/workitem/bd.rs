// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work-item client backed by the external `bd` CLI.

use super::{NewWorkItem, WorkItemClient, WorkItemClientError};
use crate::subprocess::{run_with_timeout, WORKITEM_TIMEOUT};
use async_trait::async_trait;
use gt_core::{IssueType, Label, Status, WorkItem, WorkItemFilter, WorkItemId};
use tokio::process::Command;

/// Work-item client that shells out to `bd`, the beads-style work-item CLI.
#[derive(Clone, Default)]
pub struct BdWorkItemClient;

impl BdWorkItemClient {
    pub fn new() -> Self {
        Self
    }
}

fn status_flag(status: Status) -> &'static str {
    match status {
        Status::Open => "open",
        Status::InProgress => "in_progress",
        Status::Hooked => "hooked",
        Status::Closed => "closed",
        Status::Cancelled => "cancelled",
    }
}

fn issue_type_flag(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Task => "task",
        IssueType::Agent => "agent",
        IssueType::Convoy => "convoy",
        IssueType::Decision => "decision",
        IssueType::MergeRequest => "merge_request",
        IssueType::Mail => "mail",
        IssueType::Other => "task",
    }
}

async fn run_bd(args: &[&str]) -> Result<Vec<u8>, WorkItemClientError> {
    let mut cmd = Command::new("bd");
    cmd.args(args);
    let output = run_with_timeout(cmd, WORKITEM_TIMEOUT, "bd")
        .await
        .map_err(WorkItemClientError::CommandFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WorkItemClientError::CommandFailed(stderr.to_string()));
    }

    Ok(output.stdout)
}

#[async_trait]
impl WorkItemClient for BdWorkItemClient {
    async fn list(&self, filter: &WorkItemFilter) -> Result<Vec<WorkItem>, WorkItemClientError> {
        let mut args = vec!["list".to_string(), "--json".to_string()];
        if let Some(issue_type) = filter.issue_type {
            args.push("--type".to_string());
            args.push(issue_type_flag(issue_type).to_string());
        }
        if let Some(status) = filter.status {
            args.push("--status".to_string());
            args.push(status_flag(status).to_string());
        }
        if let Some(ref label) = filter.label {
            args.push("--label".to_string());
            args.push(label.clone());
        }
        if let Some(ref assignee) = filter.assignee {
            args.push("--assignee".to_string());
            args.push(assignee.clone());
        }

        let args_ref: Vec<&str> = args.iter().map(String::as_str).collect();
        let stdout = run_bd(&args_ref).await?;

        serde_json::from_slice(&stdout).map_err(|e| WorkItemClientError::Parse(e.to_string()))
    }

    async fn get(&self, id: &WorkItemId) -> Result<WorkItem, WorkItemClientError> {
        let stdout = run_bd(&["show", id.as_str(), "--json"]).await?;
        serde_json::from_slice(&stdout).map_err(|e| WorkItemClientError::Parse(e.to_string()))
    }

    async fn create(&self, item: NewWorkItem) -> Result<WorkItemId, WorkItemClientError> {
        let mut args = vec![
            "create".to_string(),
            "--title".to_string(),
            item.title,
            "--description".to_string(),
            item.description,
            "--json".to_string(),
        ];
        for label in &item.labels {
            args.push("--label".to_string());
            args.push(label.0.clone());
        }

        let args_ref: Vec<&str> = args.iter().map(String::as_str).collect();
        let stdout = run_bd(&args_ref).await?;

        #[derive(serde::Deserialize)]
        struct CreateResponse {
            id: WorkItemId,
        }
        let resp: CreateResponse =
            serde_json::from_slice(&stdout).map_err(|e| WorkItemClientError::Parse(e.to_string()))?;
        Ok(resp.id)
    }

    async fn set_status(&self, id: &WorkItemId, status: Status) -> Result<(), WorkItemClientError> {
        run_bd(&["update", id.as_str(), "--status", status_flag(status)]).await?;
        Ok(())
    }

    async fn add_label(&self, id: &WorkItemId, label: Label) -> Result<(), WorkItemClientError> {
        run_bd(&["label", id.as_str(), "--add", &label.0]).await?;
        Ok(())
    }

    async fn comment(&self, id: &WorkItemId, body: &str) -> Result<(), WorkItemClientError> {
        run_bd(&["comment", id.as_str(), "--body", body]).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "bd_tests.rs"]
mod tests;

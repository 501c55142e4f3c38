//! Message types for workspace persistence operations.

use bevy::prelude::*;

use super::gateway::WorkspaceId;

/// Open a workspace, replacing the current history
#[derive(Message)]
pub struct LoadWorkspaceRequest {
    pub workspace_id: WorkspaceId,
    /// Shown to the user once the workspace is open (e.g. why a fallback was chosen)
    pub notice: Option<String>,
}

impl LoadWorkspaceRequest {
    pub fn new(workspace_id: WorkspaceId) -> Self {
        Self {
            workspace_id,
            notice: None,
        }
    }
}

/// Persist the current snapshot of the open workspace
#[derive(Message)]
pub struct SaveWorkspaceRequest;

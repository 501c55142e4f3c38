//! Result types for async workspace operations.

use crate::workspace::Snapshot;

use super::gateway::WorkspaceId;

/// Result of an async save operation
pub struct SaveResult {
    pub workspace_id: WorkspaceId,
    /// The snapshot that was written (or attempted)
    pub snapshot: Snapshot,
    pub error: Option<String>,
}

/// Result of an async load operation
pub struct LoadResult {
    pub workspace_id: WorkspaceId,
    /// `None` when nothing was persisted yet or loading failed
    pub snapshot: Option<Snapshot>,
    pub error: Option<String>,
    /// Carried over from the request
    pub notice: Option<String>,
}

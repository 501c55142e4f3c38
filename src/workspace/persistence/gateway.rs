//! Storage boundary for workspaces.

use std::fmt;
use std::path::PathBuf;

use crate::workspace::{BudgetSummary, Snapshot};

/// Name of a stored workspace.
///
/// Only ASCII alphanumerics, `-` and `_` are accepted since ids become file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    pub fn new(id: impl Into<String>) -> Result<Self, PersistenceError> {
        let id = id.into();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(id))
        } else {
            Err(PersistenceError::InvalidWorkspaceId(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("invalid workspace id {0:?}")]
    InvalidWorkspaceId(String),
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse workspace file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize workspace: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Loads and saves workspace snapshots.
///
/// Implementations are called from the IO task pool, never from a system.
pub trait PersistenceGateway: Send + Sync + 'static {
    /// Last persisted snapshot, or `None` when the workspace was never saved
    fn load(&self, workspace_id: &WorkspaceId) -> Result<Option<Snapshot>, PersistenceError>;

    fn save(
        &self,
        workspace_id: &WorkspaceId,
        snapshot: &Snapshot,
        budget: &BudgetSummary,
    ) -> Result<(), PersistenceError>;
}

//! File-backed gateway: one pretty-printed JSON document per workspace.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::WORKSPACE_FILE_EXTENSION;
use crate::workspace::{BudgetSummary, PlacedComponent, Snapshot};

use super::gateway::{PersistenceError, PersistenceGateway, WorkspaceId};

/// On-disk layout of a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkspace {
    pub workspace_id: String,
    /// RFC 3339 timestamp of the save
    #[serde(default)]
    pub saved_at: Option<String>,
    pub components: Vec<PlacedComponent>,
    /// Written for external readers; recomputed on load rather than trusted
    #[serde(default)]
    pub budget: BudgetSummary,
}

pub struct JsonWorkspaceStore {
    root: PathBuf,
}

impl JsonWorkspaceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, workspace_id: &WorkspaceId) -> PathBuf {
        self.root
            .join(workspace_id.as_str())
            .with_extension(WORKSPACE_FILE_EXTENSION)
    }

    fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl PersistenceGateway for JsonWorkspaceStore {
    fn load(&self, workspace_id: &WorkspaceId) -> Result<Option<Snapshot>, PersistenceError> {
        let path = self.path_for(workspace_id);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(&path, e)),
        };

        let saved: SavedWorkspace = serde_json::from_str(&json)
            .map_err(|source| PersistenceError::Parse { path, source })?;
        Ok(Some(Snapshot::from(saved.components)))
    }

    fn save(
        &self,
        workspace_id: &WorkspaceId,
        snapshot: &Snapshot,
        budget: &BudgetSummary,
    ) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.root).map_err(|e| Self::io_error(&self.root, e))?;

        let saved = SavedWorkspace {
            workspace_id: workspace_id.to_string(),
            saved_at: Some(chrono::Local::now().to_rfc3339()),
            components: snapshot.to_vec(),
            budget: budget.clone(),
        };
        let json = serde_json::to_string_pretty(&saved).map_err(PersistenceError::Serialize)?;

        // Write beside the target and swap it in so readers never see a partial file
        let path = self.path_for(workspace_id);
        let tmp_path = path.with_extension(format!("{}.tmp", WORKSPACE_FILE_EXTENSION));
        std::fs::write(&tmp_path, json).map_err(|e| Self::io_error(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| Self::io_error(&path, e))?;
        Ok(())
    }
}

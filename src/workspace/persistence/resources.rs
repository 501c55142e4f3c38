//! Resource types for workspace persistence state tracking.

use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::Task;

use super::gateway::{PersistenceGateway, WorkspaceId};
use super::results::{LoadResult, SaveResult};

/// Gateway used by the load and save systems
#[derive(Resource, Clone)]
pub struct WorkspaceStore(pub Arc<dyn PersistenceGateway>);

impl WorkspaceStore {
    pub fn new(gateway: impl PersistenceGateway) -> Self {
        Self(Arc::new(gateway))
    }
}

/// Resource tracking load errors for display to user.
#[derive(Resource, Default)]
pub struct WorkspaceLoadError {
    pub message: Option<String>,
}

/// Resource tracking save operation errors for display to user.
#[derive(Resource, Default)]
pub struct WorkspaceSaveError {
    pub message: Option<String>,
}

/// Resource tracking async workspace I/O operations
#[derive(Resource, Default)]
pub struct AsyncWorkspaceOperation {
    /// Whether a save operation is in progress
    pub is_saving: bool,
    /// Whether a load operation is in progress
    pub is_loading: bool,
    /// Description of the current operation
    pub operation_description: Option<String>,
}

impl AsyncWorkspaceOperation {
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_loading
    }
}

/// Component for save task
#[derive(Component)]
pub struct SaveWorkspaceTask(pub Task<SaveResult>);

/// Component for load task
#[derive(Component)]
pub struct LoadWorkspaceTask(pub Task<LoadResult>);

/// Resource tracking the workspace saves go to
#[derive(Resource, Default)]
pub struct CurrentWorkspace {
    pub id: Option<WorkspaceId>,
}

/// Resource tracking if the current workspace has unsaved changes
#[derive(Resource, Default)]
pub struct WorkspaceDirtyState {
    pub is_dirty: bool,
}

//! Workspace save system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::editor::EditorSession;
use crate::workspace::Snapshot;

use super::messages::SaveWorkspaceRequest;
use super::resources::{
    AsyncWorkspaceOperation, CurrentWorkspace, SaveWorkspaceTask, WorkspaceDirtyState,
    WorkspaceSaveError, WorkspaceStore,
};
use super::results::SaveResult;

/// Starts an async save of the current snapshot.
///
/// The snapshot and budget are captured when the request is handled; history
/// is only read.
pub fn save_workspace_system(
    mut commands: Commands,
    mut events: MessageReader<SaveWorkspaceRequest>,
    session: Res<EditorSession>,
    store: Res<WorkspaceStore>,
    current_workspace: Res<CurrentWorkspace>,
    mut async_op: ResMut<AsyncWorkspaceOperation>,
    mut save_error: ResMut<WorkspaceSaveError>,
) {
    for _ in events.read() {
        // Don't start a new save if one is already in progress
        if async_op.is_busy() {
            warn!("Workspace operation already in progress, ignoring save");
            continue;
        }

        let Some(workspace_id) = current_workspace.id.clone() else {
            warn!("Save requested with no workspace open");
            save_error.message = Some("No workspace is open".to_string());
            continue;
        };

        let snapshot = session.current_snapshot();
        let budget = session.budget();

        async_op.is_saving = true;
        async_op.operation_description = Some(format!("Saving {}...", workspace_id));

        let gateway = store.0.clone();
        let task = IoTaskPool::get().spawn(async move {
            let error = gateway
                .save(&workspace_id, &snapshot, &budget)
                .err()
                .map(|e| format!("Failed to save workspace: {}", e));
            SaveResult {
                workspace_id,
                snapshot,
                error,
            }
        });

        commands.spawn(SaveWorkspaceTask(task));
    }
}

/// Polls save tasks and handles completion
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveWorkspaceTask)>,
    mut async_op: ResMut<AsyncWorkspaceOperation>,
    session: Res<EditorSession>,
    mut dirty_state: ResMut<WorkspaceDirtyState>,
    mut save_error: ResMut<WorkspaceSaveError>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };

        // Clear async state
        async_op.is_saving = false;
        async_op.operation_description = None;

        apply_save_result(
            result,
            &session.current_snapshot(),
            &mut dirty_state,
            &mut save_error,
        );

        commands.entity(entity).despawn();
    }
}

/// Record the outcome of a save.
///
/// The workspace only becomes clean when `current` is still the snapshot that
/// was written; edits committed while the save ran keep it dirty. A failure
/// leaves the workspace dirty so the user can simply retry.
pub(super) fn apply_save_result(
    result: SaveResult,
    current: &Snapshot,
    dirty_state: &mut WorkspaceDirtyState,
    save_error: &mut WorkspaceSaveError,
) {
    match result.error {
        None => {
            info!("Workspace {} saved", result.workspace_id);
            save_error.message = None;
            if current.shares_storage_with(&result.snapshot) || *current == result.snapshot {
                dirty_state.is_dirty = false;
            } else {
                debug!("Workspace changed while saving, keeping it dirty");
            }
        }
        Some(error) => {
            error!("{}", error);
            save_error.message = Some(error);
        }
    }
}

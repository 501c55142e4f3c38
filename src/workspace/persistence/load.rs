//! Workspace load system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::UpdateLastWorkspaceRequest;
use crate::editor::{ChangeSource, EditorSession, SnapshotChanged};

use super::messages::LoadWorkspaceRequest;
use super::resources::{
    AsyncWorkspaceOperation, CurrentWorkspace, LoadWorkspaceTask, WorkspaceDirtyState,
    WorkspaceLoadError, WorkspaceStore,
};
use super::results::LoadResult;

/// Starts an async load operation
pub fn load_workspace_system(
    mut commands: Commands,
    mut events: MessageReader<LoadWorkspaceRequest>,
    store: Res<WorkspaceStore>,
    mut async_op: ResMut<AsyncWorkspaceOperation>,
) {
    for event in events.read() {
        // Don't start a new load if another operation is in progress
        if async_op.is_busy() {
            warn!(
                "Workspace operation already in progress, ignoring load of {}",
                event.workspace_id
            );
            continue;
        }

        let workspace_id = event.workspace_id.clone();
        let notice = event.notice.clone();
        async_op.is_loading = true;
        async_op.operation_description = Some(format!("Loading {}...", workspace_id));

        let gateway = store.0.clone();
        let task = IoTaskPool::get().spawn(async move {
            match gateway.load(&workspace_id) {
                Ok(snapshot) => LoadResult {
                    workspace_id,
                    snapshot,
                    error: None,
                    notice,
                },
                Err(e) => LoadResult {
                    workspace_id,
                    snapshot: None,
                    error: Some(format!("Failed to load workspace: {}", e)),
                    notice,
                },
            }
        });

        commands.spawn(LoadWorkspaceTask(task));
    }
}

/// Polls load tasks and seeds the editor history on completion
#[allow(clippy::too_many_arguments)]
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadWorkspaceTask)>,
    mut async_op: ResMut<AsyncWorkspaceOperation>,
    mut session: ResMut<EditorSession>,
    mut current_workspace: ResMut<CurrentWorkspace>,
    mut dirty_state: ResMut<WorkspaceDirtyState>,
    mut load_error: ResMut<WorkspaceLoadError>,
    mut config_events: MessageWriter<UpdateLastWorkspaceRequest>,
    mut changed: MessageWriter<SnapshotChanged>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };

        // Clear async state
        async_op.is_loading = false;
        async_op.operation_description = None;

        apply_load_result(
            result,
            &mut session,
            &mut current_workspace,
            &mut dirty_state,
            &mut load_error,
        );

        if let Some(id) = &current_workspace.id {
            config_events.write(UpdateLastWorkspaceRequest {
                workspace_id: id.to_string(),
            });
        }
        changed.write(SnapshotChanged::from_session(&session, ChangeSource::Load));

        commands.entity(entity).despawn();
    }
}

/// Seed history from a finished load.
///
/// A failed load is not fatal: the workspace opens empty and the error is kept
/// for the user to see. A successful load shows the request's notice, if any.
pub(super) fn apply_load_result(
    result: LoadResult,
    session: &mut EditorSession,
    current_workspace: &mut CurrentWorkspace,
    dirty_state: &mut WorkspaceDirtyState,
    load_error: &mut WorkspaceLoadError,
) {
    match result.error {
        Some(error) => {
            error!("{}", error);
            load_error.message = Some(error);
        }
        None => {
            load_error.message = result.notice;
            match &result.snapshot {
                Some(snapshot) => info!(
                    "Workspace {} loaded with {} placement(s)",
                    result.workspace_id,
                    snapshot.len()
                ),
                None => info!("Workspace {} is new, starting empty", result.workspace_id),
            }
        }
    }

    session.load(result.snapshot.unwrap_or_default());
    current_workspace.id = Some(result.workspace_id);
    dirty_state.is_dirty = false;
}

mod budget;
mod component;
mod mutations;
pub mod persistence;
mod snapshot;

pub use budget::{coerce_price, project_budget, BudgetLine, BudgetSummary};
pub use component::{CatalogItem, ComponentSpecs, InstanceId, PlacedComponent};
pub use mutations::{apply_add, apply_move, apply_remove, apply_set_quantity};
pub use persistence::{
    AsyncWorkspaceOperation, CurrentWorkspace, JsonWorkspaceStore, LoadWorkspaceRequest,
    PersistenceError, PersistenceGateway, SaveWorkspaceRequest, WorkspaceDirtyState, WorkspaceId,
    WorkspaceLoadError, WorkspaceSaveError, WorkspaceStore,
};
pub use snapshot::Snapshot;

use bevy::prelude::*;

use crate::config::{AppConfig, ConfigLoaded, UpdateLastWorkspaceRequest};
use crate::constants::DEFAULT_WORKSPACE_ID;

/// Persistence and lifecycle of the open workspace.
///
/// Without an explicit store the plugin opens a [`JsonWorkspaceStore`] in the
/// configured workspaces directory at startup.
#[derive(Default)]
pub struct WorkspacePlugin {
    store: Option<WorkspaceStore>,
}

impl WorkspacePlugin {
    pub fn with_store(gateway: impl PersistenceGateway) -> Self {
        Self {
            store: Some(WorkspaceStore::new(gateway)),
        }
    }
}

/// Startup system creating the default store when none was provided
fn init_workspace_store(
    mut commands: Commands,
    config: Option<Res<AppConfig>>,
    store: Option<Res<WorkspaceStore>>,
) {
    if store.is_some() {
        return;
    }

    let root = config
        .map(|c| c.data.workspaces_dir())
        .unwrap_or_else(crate::paths::default_workspaces_dir);
    info!("Workspaces stored in {:?}", root);
    commands.insert_resource(WorkspaceStore::new(JsonWorkspaceStore::new(root)));
}

/// Startup system opening the last used workspace (or the default one)
fn open_initial_workspace(
    config: Option<Res<AppConfig>>,
    mut load_events: MessageWriter<LoadWorkspaceRequest>,
) {
    let remembered = config.and_then(|c| c.data.last_workspace_id.clone());
    let requested = remembered.unwrap_or_else(|| DEFAULT_WORKSPACE_ID.to_string());

    let request = match WorkspaceId::new(requested) {
        Ok(id) => LoadWorkspaceRequest::new(id),
        Err(e) => {
            warn!("{}, opening the default workspace instead", e);
            let Ok(id) = WorkspaceId::new(DEFAULT_WORKSPACE_ID) else {
                return;
            };
            LoadWorkspaceRequest {
                workspace_id: id,
                notice: Some(format!("{}, opened the default workspace instead", e)),
            }
        }
    };

    load_events.write(request);
}

impl Plugin for WorkspacePlugin {
    fn build(&self, app: &mut App) {
        if let Some(store) = &self.store {
            app.insert_resource(store.clone());
        }

        app.init_resource::<CurrentWorkspace>()
            .init_resource::<AsyncWorkspaceOperation>()
            .init_resource::<WorkspaceLoadError>()
            .init_resource::<WorkspaceSaveError>()
            .init_resource::<WorkspaceDirtyState>()
            .add_message::<LoadWorkspaceRequest>()
            .add_message::<SaveWorkspaceRequest>()
            .add_message::<UpdateLastWorkspaceRequest>()
            .add_systems(
                Startup,
                (init_workspace_store, open_initial_workspace)
                    .chain()
                    .after(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    persistence::load_workspace_system.run_if(on_message::<LoadWorkspaceRequest>),
                    persistence::save_workspace_system.run_if(on_message::<SaveWorkspaceRequest>),
                    persistence::poll_load_tasks,
                    persistence::poll_save_tasks,
                    persistence::detect_snapshot_edits,
                ),
            );
    }
}

//! Workspace persistence: loading and saving snapshots through a gateway.
//!
//! Handles async I/O for workspace data, including:
//! - Load/save on the IO task pool
//! - Dirty state tracking
//! - User-visible load and save errors
//!
//! ## Module Structure
//!
//! - [`gateway`] - PersistenceGateway trait, WorkspaceId and errors
//! - [`json_store`] - File-backed gateway writing one JSON file per workspace
//! - [`messages`] - Message types for workspace operations
//! - [`resources`] - Resource types for state tracking
//! - [`results`] - Result types for async operations
//! - [`save`] - Save system and task polling
//! - [`load`] - Load system and task polling
//! - [`dirty`] - Dirty state detection

mod dirty;
mod gateway;
mod json_store;
mod load;
mod messages;
mod resources;
mod results;
mod save;


// Re-exports - Gateway
pub use gateway::{PersistenceError, PersistenceGateway, WorkspaceId};
pub use json_store::{JsonWorkspaceStore, SavedWorkspace};

// Re-exports - Messages
pub use messages::{LoadWorkspaceRequest, SaveWorkspaceRequest};

// Re-exports - Resources
pub use resources::{
    AsyncWorkspaceOperation, CurrentWorkspace, WorkspaceDirtyState, WorkspaceLoadError,
    WorkspaceSaveError, WorkspaceStore,
};

// Re-exports - Systems
pub use dirty::detect_snapshot_edits;
pub use load::{load_workspace_system, poll_load_tasks};
pub use save::{poll_save_tasks, save_workspace_system};

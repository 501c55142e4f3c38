//! Circuit layout planner core.
//!
//! The editor keeps a linear undo/redo history of the placed-component
//! collection. Presentation layers drive it through [`editor::EditorIntent`]
//! messages and re-render from [`editor::SnapshotChanged`]; the workspace
//! plugin loads and saves the current snapshot with its budget summary.

pub mod config;
pub mod constants;
pub mod editor;
pub mod paths;
pub mod workspace;

//! Undo/Redo history for the placed-component collection.
//!
//! Every mutation of the canvas is committed as a full snapshot. Undo and redo
//! only move a pointer over the committed snapshots; a new commit after an undo
//! abandons the redo branch.
//!
//! ## Module Structure
//!
//! - [`action`] - ActionKind enum naming what produced a step
//! - [`entry`] - HistoryEntry, one committed step
//! - [`history_log`] - HistoryLog, the snapshot log and step pointer

mod action;
mod entry;
mod history_log;


// Re-exports
pub use action::ActionKind;
pub use entry::HistoryEntry;
pub use history_log::HistoryLog;

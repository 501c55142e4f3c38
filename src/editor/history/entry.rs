//! A single committed step.

use chrono::{DateTime, Local};

use crate::workspace::{InstanceId, Snapshot};

use super::action::ActionKind;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub action: ActionKind,
    /// Becomes the current state while this entry is active
    pub resulting_snapshot: Snapshot,
    /// State just before this step, kept for inspection only
    pub prior_snapshot: Snapshot,
    /// Absent for bulk changes and the initial load
    pub affected_instance_id: Option<InstanceId>,
    pub committed_at: DateTime<Local>,
}

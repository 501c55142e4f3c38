//! Dirty state detection.

use bevy::prelude::*;

use crate::editor::{ChangeSource, SnapshotChanged};

use super::resources::WorkspaceDirtyState;

/// Marks the workspace dirty whenever an edit moves the current snapshot
pub fn detect_snapshot_edits(
    mut changes: MessageReader<SnapshotChanged>,
    mut dirty_state: ResMut<WorkspaceDirtyState>,
) {
    let edits = changes
        .read()
        .filter(|change| change.source == ChangeSource::Edit)
        .count();
    if edits > 0 && !dirty_state.is_dirty {
        dirty_state.is_dirty = true;
    }
}

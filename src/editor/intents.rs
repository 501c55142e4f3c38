//! Messages exchanged with the presentation layer and the system that applies them.

use bevy::prelude::*;

use crate::config::AppConfig;
use crate::workspace::{CatalogItem, InstanceId, Snapshot};

use super::session::EditorSession;

/// A user request coming from the presentation layer
#[derive(Message, Debug, Clone)]
pub enum EditorIntent {
    /// A catalog item was dropped on the canvas
    Add { item: CatalogItem, x: f64, y: f64 },
    /// The user deleted an item (all placements of the catalog item go)
    Remove { catalog_id: String },
    /// A placement was dragged to a new position
    Move { instance_id: InstanceId, x: f64, y: f64 },
    /// The user edited a quantity in the budget list
    SetQuantity { item: CatalogItem, quantity: usize },
    Undo,
    Redo,
}

/// What moved the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// A mutation, undo or redo requested by the user
    Edit,
    /// A workspace was (re)loaded and history started over
    Load,
}

/// Emitted whenever the current snapshot changes, so views can re-render
#[derive(Message, Debug, Clone)]
pub struct SnapshotChanged {
    pub source: ChangeSource,
    pub step: Option<usize>,
    pub snapshot: Snapshot,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl SnapshotChanged {
    pub fn from_session(session: &EditorSession, source: ChangeSource) -> Self {
        Self {
            source,
            step: session.current_step(),
            snapshot: session.current_snapshot(),
            can_undo: session.can_undo(),
            can_redo: session.can_redo(),
        }
    }
}

/// Apply intents in the order they were written
pub fn apply_editor_intents(
    mut intents: MessageReader<EditorIntent>,
    mut session: ResMut<EditorSession>,
    mut changed: MessageWriter<SnapshotChanged>,
) {
    for intent in intents.read() {
        let moved = match intent {
            EditorIntent::Add { item, x, y } => {
                session.add_component(item, *x, *y);
                true
            }
            EditorIntent::Remove { catalog_id } => {
                session.remove_component(catalog_id);
                true
            }
            EditorIntent::Move { instance_id, x, y } => {
                session.move_component(instance_id, *x, *y);
                true
            }
            EditorIntent::SetQuantity { item, quantity } => {
                session.set_quantity(item, *quantity);
                true
            }
            EditorIntent::Undo => session.undo(),
            EditorIntent::Redo => session.redo(),
        };

        if moved {
            changed.write(SnapshotChanged::from_session(&session, ChangeSource::Edit));
        } else {
            debug!("Ignored {:?}: nothing to step to", intent);
        }
    }
}

/// Startup system applying the configured history limit
pub fn apply_history_limit(config: Option<Res<AppConfig>>, mut session: ResMut<EditorSession>) {
    let Some(config) = config else {
        return;
    };
    if let Some(limit) = config.data.history_limit {
        info!("Keeping at most {} history entries", limit);
    }
    session.set_history_limit(config.data.history_limit);
}

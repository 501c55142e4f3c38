pub mod history;
mod intents;
mod session;

pub use intents::{ChangeSource, EditorIntent, SnapshotChanged};
pub use session::EditorSession;

use bevy::prelude::*;

use crate::config::ConfigLoaded;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorSession>()
            .add_message::<EditorIntent>()
            .add_message::<SnapshotChanged>()
            .add_systems(Startup, intents::apply_history_limit.after(ConfigLoaded))
            .add_systems(
                Update,
                intents::apply_editor_intents.run_if(on_message::<EditorIntent>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::CatalogItem;
    use bevy::ecs::message::Messages;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(EditorPlugin);
        app
    }

    fn catalog_ids(app: &App) -> Vec<String> {
        app.world()
            .resource::<EditorSession>()
            .current_snapshot()
            .iter()
            .map(|c| c.catalog_id.clone())
            .collect()
    }

    fn add(app: &mut App, id: &str) {
        app.world_mut().write_message(EditorIntent::Add {
            item: CatalogItem::new(id, id, 1),
            x: 0.0,
            y: 0.0,
        });
    }

    #[test]
    fn test_intents_apply_in_order_within_a_frame() {
        let mut app = test_app();
        add(&mut app, "A");
        add(&mut app, "B");
        app.world_mut().write_message(EditorIntent::Undo);
        add(&mut app, "C");
        app.world_mut().write_message(EditorIntent::Redo);
        app.update();

        assert_eq!(catalog_ids(&app), vec!["A", "C"]);
        let session = app.world().resource::<EditorSession>();
        assert_eq!(session.history().len(), 2);
        assert!(!session.can_redo());
    }

    #[test]
    fn test_intents_across_frames() {
        let mut app = test_app();
        add(&mut app, "A");
        app.update();
        add(&mut app, "B");
        app.update();
        app.world_mut().write_message(EditorIntent::Undo);
        app.update();

        assert_eq!(catalog_ids(&app), vec!["A"]);
        assert!(app.world().resource::<EditorSession>().can_redo());

        app.world_mut().write_message(EditorIntent::Redo);
        app.update();
        assert_eq!(catalog_ids(&app), vec!["A", "B"]);
    }

    #[test]
    fn test_remove_and_set_quantity_intents() {
        let mut app = test_app();
        add(&mut app, "R1");
        add(&mut app, "C1");
        app.world_mut().write_message(EditorIntent::SetQuantity {
            item: CatalogItem::new("R1", "R1", 1),
            quantity: 3,
        });
        app.world_mut().write_message(EditorIntent::Remove {
            catalog_id: "C1".to_string(),
        });
        app.update();

        assert_eq!(catalog_ids(&app), vec!["R1", "R1", "R1"]);
        assert_eq!(app.world().resource::<EditorSession>().budget().total, 3.0);
    }

    #[test]
    fn test_snapshot_changed_only_when_pointer_moves() {
        let mut app = test_app();
        add(&mut app, "A");
        // Undo at step 0 is a no-op and must not notify
        app.world_mut().write_message(EditorIntent::Undo);
        app.update();

        let messages = app.world().resource::<Messages<SnapshotChanged>>();
        let mut cursor = messages.get_cursor();
        let changes: Vec<&SnapshotChanged> = cursor.read(messages).collect();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].source, ChangeSource::Edit);
        assert_eq!(changes[0].step, Some(0));
        assert_eq!(changes[0].snapshot.len(), 1);
        assert!(!changes[0].can_undo);
    }

    #[test]
    fn test_history_limit_without_config_is_unbounded() {
        let mut app = test_app();
        app.update();
        assert_eq!(app.world().resource::<EditorSession>().history().limit(), None);
    }
}

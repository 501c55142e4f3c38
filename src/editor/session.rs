//! The editor's single owner of placement history.

use bevy::prelude::*;

use crate::workspace::{
    apply_add, apply_move, apply_remove, apply_set_quantity, project_budget, BudgetSummary,
    CatalogItem, InstanceId, Snapshot,
};

use super::history::{ActionKind, HistoryLog};

/// Resource exposing every mutation the presentation layer may request.
///
/// Each mutation builds the next snapshot from the current one and commits it
/// as exactly one history entry.
#[derive(Resource, Debug, Default)]
pub struct EditorSession {
    history: HistoryLog,
}

impl EditorSession {
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            history: HistoryLog::with_limit(history_limit),
        }
    }

    /// Place a new instance of `item` and return its freshly minted id
    pub fn add_component(&mut self, item: &CatalogItem, x: f64, y: f64) -> InstanceId {
        let instance_id = InstanceId::generate(&item.id);
        let next = apply_add(
            &self.current_snapshot(),
            item.place(instance_id.clone(), x, y),
        );
        self.history
            .commit(next, ActionKind::Add, Some(instance_id.clone()));
        debug!("Placed {} as {}", item.id, instance_id);
        instance_id
    }

    /// Remove every placement of `catalog_id`
    pub fn remove_component(&mut self, catalog_id: &str) {
        let current = self.current_snapshot();
        let affected = current
            .iter()
            .find(|c| c.catalog_id == catalog_id)
            .map(|c| c.instance_id.clone());
        let removed = current.count_of(catalog_id);

        let next = apply_remove(&current, catalog_id);
        self.history.commit(next, ActionKind::Remove, affected);
        debug!("Removed {} placement(s) of {}", removed, catalog_id);
    }

    pub fn move_component(&mut self, instance_id: &InstanceId, x: f64, y: f64) {
        let current = self.current_snapshot();
        if current.find(instance_id).is_none() {
            warn!("Move requested for unknown placement {}", instance_id);
        }

        let next = apply_move(&current, instance_id, x, y);
        self.history
            .commit(next, ActionKind::Move, Some(instance_id.clone()));
    }

    /// Add or remove placements of `item` until `quantity` remain
    pub fn set_quantity(&mut self, item: &CatalogItem, quantity: usize) {
        let next = apply_set_quantity(
            &self.current_snapshot(),
            item,
            quantity,
            InstanceId::generate,
        );
        self.history.commit(next, ActionKind::QuantityChange, None);
        debug!("Set quantity of {} to {}", item.id, quantity);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn current_snapshot(&self) -> Snapshot {
        self.history.current_snapshot()
    }

    pub fn current_step(&self) -> Option<usize> {
        self.history.current_step()
    }

    /// Budget projection of the current snapshot, computed on demand
    pub fn budget(&self) -> BudgetSummary {
        project_budget(&self.current_snapshot())
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn set_history_limit(&mut self, limit: Option<usize>) {
        self.history.set_limit(limit);
    }

    /// Replace all history with a freshly loaded snapshot
    pub fn load(&mut self, snapshot: Snapshot) {
        self.history.reset_with(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64) -> CatalogItem {
        CatalogItem::new(id, format!("Part {}", id), price)
    }

    fn catalog_ids(session: &EditorSession) -> Vec<String> {
        session
            .current_snapshot()
            .iter()
            .map(|c| c.catalog_id.clone())
            .collect()
    }

    #[test]
    fn test_add_component_grows_snapshot_with_unique_id() {
        let mut session = EditorSession::default();
        let first = session.add_component(&item("R1", 5.0), 0.0, 0.0);
        let second = session.add_component(&item("R1", 5.0), 10.0, 0.0);

        assert_ne!(first, second);
        let snapshot = session.current_snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.find(&first).is_some());
        assert!(snapshot.find(&second).is_some());
    }

    #[test]
    fn test_add_component_records_affected_instance() {
        let mut session = EditorSession::default();
        let id = session.add_component(&item("C1", 2.0), 1.0, 2.0);

        let entry = session.history().current_entry().unwrap();
        assert_eq!(entry.action, ActionKind::Add);
        assert_eq!(entry.affected_instance_id, Some(id));
    }

    #[test]
    fn test_remove_component_removes_all_placements_of_catalog_item() {
        let mut session = EditorSession::default();
        session.add_component(&item("R1", 5.0), 0.0, 0.0);
        session.add_component(&item("C1", 2.0), 0.0, 0.0);
        session.add_component(&item("R1", 5.0), 0.0, 0.0);

        session.remove_component("R1");

        assert_eq!(catalog_ids(&session), vec!["C1"]);
        assert_eq!(
            session.history().current_entry().unwrap().action,
            ActionKind::Remove
        );
    }

    #[test]
    fn test_move_component_only_touches_target() {
        let mut session = EditorSession::default();
        let target = session.add_component(&item("R1", 5.0), 0.0, 0.0);
        session.add_component(&item("C1", 2.0), 3.0, 3.0);
        let before = session.current_snapshot();

        session.move_component(&target, 25.0, 30.0);
        let after = session.current_snapshot();

        let moved = after.find(&target).unwrap();
        assert_eq!((moved.x, moved.y), (25.0, 30.0));
        assert_eq!(moved.name, before[0].name);
        assert_eq!(moved.price, before[0].price);
        assert_eq!(after[1], before[1]);
    }

    #[test]
    fn test_every_mutation_commits_one_entry() {
        let mut session = EditorSession::default();
        let id = session.add_component(&item("R1", 5.0), 0.0, 0.0);
        session.move_component(&id, 1.0, 1.0);
        session.move_component(&InstanceId::from("missing"), 1.0, 1.0);
        session.remove_component("nothing-here");
        session.set_quantity(&item("R1", 5.0), 3);

        assert_eq!(session.history().len(), 5);
        assert_eq!(session.current_step(), Some(4));
    }

    #[test]
    fn test_set_quantity_commits_quantity_change() {
        let mut session = EditorSession::default();
        session.add_component(&item("R1", 5.0), 4.0, 4.0);
        session.set_quantity(&item("R1", 5.0), 3);

        assert_eq!(session.current_snapshot().count_of("R1"), 3);
        let entry = session.history().current_entry().unwrap();
        assert_eq!(entry.action, ActionKind::QuantityChange);
        assert!(entry.affected_instance_id.is_none());

        session.set_quantity(&item("R1", 5.0), 0);
        assert!(session.current_snapshot().is_empty());
    }

    #[test]
    fn test_add_add_undo_add_discards_branch() {
        let mut session = EditorSession::default();
        let a = session.add_component(&item("A", 1.0), 0.0, 0.0);
        session.add_component(&item("B", 1.0), 0.0, 0.0);

        assert!(session.undo());
        assert_eq!(catalog_ids(&session), vec!["A"]);

        let c = session.add_component(&item("C", 1.0), 0.0, 0.0);
        assert_eq!(catalog_ids(&session), vec!["A", "C"]);
        assert!(!session.can_redo());
        assert!(!session.redo());
        assert_eq!(catalog_ids(&session), vec!["A", "C"]);

        let snapshot = session.current_snapshot();
        assert_eq!(snapshot[0].instance_id, a);
        assert_eq!(snapshot[1].instance_id, c);
    }

    #[test]
    fn test_first_add_on_empty_workspace_cannot_be_undone() {
        let mut session = EditorSession::default();
        session.add_component(&item("A", 1.0), 0.0, 0.0);

        assert!(!session.can_undo());
        assert!(!session.undo());
        assert_eq!(catalog_ids(&session), vec!["A"]);
    }

    #[test]
    fn test_load_seeds_history() {
        let mut session = EditorSession::default();
        session.add_component(&item("X", 1.0), 0.0, 0.0);
        session.add_component(&item("Y", 1.0), 0.0, 0.0);

        let placed = item("R1", 5.0).place(InstanceId::from("r1-a"), 0.0, 0.0);
        let loaded = Snapshot::from(vec![placed]);
        session.load(loaded.clone());

        assert_eq!(session.current_snapshot(), loaded);
        assert_eq!(session.current_step(), Some(0));
        assert!(!session.can_undo());
        assert!(!session.can_redo());

        session.add_component(&item("C1", 2.0), 0.0, 0.0);
        assert!(session.undo());
        assert_eq!(session.current_snapshot(), loaded);
    }

    #[test]
    fn test_budget_reflects_current_step() {
        let mut session = EditorSession::default();
        session.add_component(&item("R1", 5.0), 0.0, 0.0);
        session.add_component(&item("R1", 5.0), 0.0, 0.0);
        session.add_component(&item("C1", 2.0), 0.0, 0.0);
        assert_eq!(session.budget().total, 12.0);

        session.undo();
        let budget = session.budget();
        assert_eq!(budget.total, 10.0);
        assert_eq!(budget.items.len(), 1);
        assert_eq!(budget.items[0].quantity, 2);
    }

    #[test]
    fn test_history_limit_applies_to_session() {
        let mut session = EditorSession::new(Some(2));
        for _ in 0..5 {
            session.add_component(&item("R1", 5.0), 0.0, 0.0);
        }
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.current_snapshot().len(), 5);
    }
}

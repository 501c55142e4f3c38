//! Pure snapshot transformations.
//!
//! Each builder takes the current snapshot and returns the next one without
//! touching history. The editor session commits whatever these return.

use super::component::{CatalogItem, InstanceId, PlacedComponent};
use super::snapshot::Snapshot;

/// Append a placement, replacing in place any existing one with the same instance id
pub fn apply_add(snapshot: &Snapshot, component: PlacedComponent) -> Snapshot {
    let mut components = snapshot.to_vec();
    match components
        .iter_mut()
        .find(|c| c.instance_id == component.instance_id)
    {
        Some(existing) => *existing = component,
        None => components.push(component),
    }
    Snapshot::from(components)
}

/// Drop every placement of `catalog_id`.
///
/// Matching is by catalog id, so all placements of the item go at once.
pub fn apply_remove(snapshot: &Snapshot, catalog_id: &str) -> Snapshot {
    snapshot
        .iter()
        .filter(|c| c.catalog_id != catalog_id)
        .cloned()
        .collect()
}

/// Reposition one placement; every other field and placement is left as is
pub fn apply_move(snapshot: &Snapshot, instance_id: &InstanceId, x: f64, y: f64) -> Snapshot {
    snapshot
        .iter()
        .map(|c| {
            if &c.instance_id == instance_id {
                PlacedComponent { x, y, ..c.clone() }
            } else {
                c.clone()
            }
        })
        .collect()
}

/// Add or remove whole placements of `item` until exactly `quantity` remain.
///
/// New placements are stacked on the last existing placement of the item (or the
/// origin when there is none) and get ids from `mint`. Surplus placements are
/// removed newest first.
pub fn apply_set_quantity(
    snapshot: &Snapshot,
    item: &CatalogItem,
    quantity: usize,
    mut mint: impl FnMut(&str) -> InstanceId,
) -> Snapshot {
    let current = snapshot.count_of(&item.id);

    if quantity >= current {
        let (x, y) = snapshot
            .iter()
            .rev()
            .find(|c| c.catalog_id == item.id)
            .map(|c| (c.x, c.y))
            .unwrap_or((0.0, 0.0));

        let mut components = snapshot.to_vec();
        components.extend((current..quantity).map(|_| item.place(mint(&item.id), x, y)));
        return Snapshot::from(components);
    }

    let mut surplus = current - quantity;
    let mut components: Vec<PlacedComponent> = snapshot
        .iter()
        .rev()
        .filter(|c| {
            if surplus > 0 && c.catalog_id == item.id {
                surplus -= 1;
                false
            } else {
                true
            }
        })
        .cloned()
        .collect();
    components.reverse();
    Snapshot::from(components)
}

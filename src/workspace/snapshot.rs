use std::ops::Deref;
use std::sync::Arc;

use super::component::{InstanceId, PlacedComponent};

/// Immutable, ordered state of the canvas at one point in time.
///
/// Clones share the same allocation; a mutation always builds a new snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot(Arc<Vec<PlacedComponent>>);

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn find(&self, instance_id: &InstanceId) -> Option<&PlacedComponent> {
        self.0.iter().find(|c| &c.instance_id == instance_id)
    }

    /// Number of placements of one catalog item
    pub fn count_of(&self, catalog_id: &str) -> usize {
        self.0.iter().filter(|c| c.catalog_id == catalog_id).count()
    }

    pub fn to_vec(&self) -> Vec<PlacedComponent> {
        self.0.as_ref().clone()
    }

    /// True when both handles point at the same committed allocation
    pub fn shares_storage_with(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Snapshot {
    type Target = [PlacedComponent];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl From<Vec<PlacedComponent>> for Snapshot {
    fn from(components: Vec<PlacedComponent>) -> Self {
        Self(Arc::new(components))
    }
}

impl FromIterator<PlacedComponent> for Snapshot {
    fn from_iter<I: IntoIterator<Item = PlacedComponent>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

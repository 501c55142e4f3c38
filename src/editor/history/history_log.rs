//! Linear snapshot log with a step pointer.

use bevy::prelude::*;

use crate::constants::MIN_HISTORY_LIMIT;
use crate::workspace::{InstanceId, Snapshot};

use super::action::ActionKind;
use super::entry::HistoryEntry;

/// Ordered log of committed snapshots plus the index of the active one.
///
/// `current_step` is `None` only while the log is empty. Undo and redo move the
/// pointer and never create entries; a commit after an undo drops everything
/// past the pointer before appending.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    current_step: Option<usize>,
    /// Oldest entries are dropped past this many (unbounded when `None`)
    limit: Option<usize>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        let mut log = Self::default();
        log.set_limit(limit);
        log
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Change the retention limit, trimming immediately if needed
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit.map(|l| l.max(MIN_HISTORY_LIMIT));
        self.enforce_limit();
    }

    /// Record a transition to `snapshot`.
    ///
    /// Entries after the current step are discarded first, then the new entry
    /// becomes the current one.
    pub fn commit(
        &mut self,
        snapshot: Snapshot,
        action: ActionKind,
        affected_instance_id: Option<InstanceId>,
    ) {
        let prior_snapshot = self.current_snapshot();

        let keep = self.current_step.map_or(0, |step| step + 1);
        let discarded = self.entries.len().saturating_sub(keep);
        if discarded > 0 {
            debug!("Discarding {} redo entries", discarded);
        }
        self.entries.truncate(keep);

        self.entries.push(HistoryEntry {
            action,
            resulting_snapshot: snapshot,
            prior_snapshot,
            affected_instance_id,
            committed_at: chrono::Local::now(),
        });
        self.current_step = Some(self.entries.len() - 1);

        self.enforce_limit();
    }

    /// Step back one entry. Returns false (and does nothing) at the first entry.
    pub fn undo(&mut self) -> bool {
        match self.current_step {
            Some(step) if step > 0 => {
                self.current_step = Some(step - 1);
                true
            }
            _ => false,
        }
    }

    /// Step forward one entry. Returns false (and does nothing) at the last entry.
    pub fn redo(&mut self) -> bool {
        let next = self.current_step.map_or(0, |step| step + 1);
        if next < self.entries.len() {
            self.current_step = Some(next);
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.current_step.is_some_and(|step| step > 0)
    }

    pub fn can_redo(&self) -> bool {
        let next = self.current_step.map_or(0, |step| step + 1);
        next < self.entries.len()
    }

    /// Snapshot of the active entry, or an empty snapshot before the first commit
    pub fn current_snapshot(&self) -> Snapshot {
        self.current_entry()
            .map(|entry| entry.resulting_snapshot.clone())
            .unwrap_or_default()
    }

    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.current_step.and_then(|step| self.entries.get(step))
    }

    pub fn current_step(&self) -> Option<usize> {
        self.current_step
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_step = None;
    }

    /// Start over from a loaded snapshot.
    ///
    /// A non-empty snapshot becomes step 0 as an `Add`; an empty one leaves the log empty.
    pub fn reset_with(&mut self, snapshot: Snapshot) {
        self.clear();
        if !snapshot.is_empty() {
            self.commit(snapshot, ActionKind::Add, None);
        }
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.entries.len() <= limit {
            return;
        }

        // Oldest entries go first; redo entries only if the active one would be lost
        let excess = self.entries.len() - limit;
        let step = self.current_step.unwrap_or(0);
        let front = excess.min(step);
        self.entries.drain(..front);
        self.entries.truncate(limit);
        self.current_step = Some(step - front);
    }
}

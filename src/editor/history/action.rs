//! Kinds of committed steps.

use std::fmt;

/// What produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// A placement was added; also used for the initial workspace load
    Add,
    /// Placements were removed
    Remove,
    /// A placement was repositioned
    Move,
    /// Placements of one catalog item were added or removed to reach a count
    QuantityChange,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Add => "add",
            ActionKind::Remove => "remove",
            ActionKind::Move => "move",
            ActionKind::QuantityChange => "quantity-change",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

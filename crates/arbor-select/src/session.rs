#![forbid(unsafe_code)]

//! Per-tree selection session: the anchor and the last range.

use std::collections::HashSet;

use arbor_core::id::ItemId;

/// Session state that range operations pivot around.
///
/// Lives as long as the selection model it belongs to and is replaced
/// wholesale by each committed transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSession {
    /// Item of the last discrete (non-range) selection.
    pub anchor: Option<ItemId>,
    /// Ids added by the most recent range operation.
    pub last_range: HashSet<ItemId>,
}

impl SelectionSession {
    /// Empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session anchored at `id` with no active range.
    #[must_use]
    pub fn anchored_at(id: ItemId) -> Self {
        Self {
            anchor: Some(id),
            last_range: HashSet::new(),
        }
    }

    /// Same anchor, new last range.
    #[must_use]
    pub fn with_last_range<I>(&self, range: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        Self {
            anchor: self.anchor.clone(),
            last_range: range.into_iter().collect(),
        }
    }

    /// Whether `id` belongs to the last range.
    #[must_use]
    pub fn in_last_range(&self, id: &ItemId) -> bool {
        self.last_range.contains(id)
    }
}

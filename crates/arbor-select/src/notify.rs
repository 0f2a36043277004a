#![forbid(unsafe_code)]

//! Change notifications.
//!
//! A committed transition produces a [`SelectionChange`]: the ids it added,
//! the ids it removed, and the full new value. [`SelectionListeners`] holds
//! two independent optional sinks that receive it:
//!
//! 1. `on_item_selection_toggle(event, id, is_now_selected)` once per changed
//!    id. Multi mode reports additions (new-value order) before removals
//!    (old-value order); single mode reports the previous id's removal before
//!    the new id's addition.
//! 2. `on_selected_items_change(event, value)` once, last, even when the
//!    value did not change.

use std::collections::HashSet;
use std::fmt;

use arbor_core::event::InputEvent;
use arbor_core::id::ItemId;

use crate::value::{SelectionMode, SelectionValue};

/// Difference between two selection values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// Newly selected ids, in new-value order.
    pub added: Vec<ItemId>,
    /// Deselected ids, in old-value order.
    pub removed: Vec<ItemId>,
    /// The full value after the change.
    pub value: SelectionValue,
}

impl SelectionChange {
    /// Diff `old` against `new`.
    #[must_use]
    pub fn between(old: &SelectionValue, new: SelectionValue) -> Self {
        let old_set: HashSet<&ItemId> = old.iter().collect();
        let new_set: HashSet<&ItemId> = new.iter().collect();
        let added = new
            .iter()
            .filter(|id| !old_set.contains(id))
            .cloned()
            .collect();
        let removed = old
            .iter()
            .filter(|id| !new_set.contains(id))
            .cloned()
            .collect();
        Self {
            added,
            removed,
            value: new,
        }
    }

    /// Whether no id changed state.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Aggregate change callback: `(event, new_value)`.
pub type SelectionChangeCallback = Box<dyn FnMut(&InputEvent, &SelectionValue) + Send>;

/// Per-item callback: `(event, id, is_now_selected)`.
pub type ItemToggleCallback = Box<dyn FnMut(&InputEvent, &ItemId, bool) + Send>;

/// Optional selection callbacks.
#[derive(Default)]
pub struct SelectionListeners {
    on_selected_items_change: Option<SelectionChangeCallback>,
    on_item_selection_toggle: Option<ItemToggleCallback>,
}

impl fmt::Debug for SelectionListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionListeners")
            .field(
                "on_selected_items_change",
                &self.on_selected_items_change.is_some(),
            )
            .field(
                "on_item_selection_toggle",
                &self.on_item_selection_toggle.is_some(),
            )
            .finish()
    }
}

impl SelectionListeners {
    /// No callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the aggregate change callback.
    #[must_use]
    pub fn on_selected_items_change(
        mut self,
        f: impl FnMut(&InputEvent, &SelectionValue) + Send + 'static,
    ) -> Self {
        self.on_selected_items_change = Some(Box::new(f));
        self
    }

    /// Set the per-item toggle callback.
    #[must_use]
    pub fn on_item_selection_toggle(
        mut self,
        f: impl FnMut(&InputEvent, &ItemId, bool) + Send + 'static,
    ) -> Self {
        self.on_item_selection_toggle = Some(Box::new(f));
        self
    }

    /// Whether any callback is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on_selected_items_change.is_none() && self.on_item_selection_toggle.is_none()
    }

    /// Deliver `change` to the callbacks in notification order.
    pub fn dispatch(&mut self, event: &InputEvent, mode: SelectionMode, change: &SelectionChange) {
        if let Some(ref mut cb) = self.on_item_selection_toggle {
            match mode {
                SelectionMode::Multi => {
                    for id in &change.added {
                        cb(event, id, true);
                    }
                    for id in &change.removed {
                        cb(event, id, false);
                    }
                }
                SelectionMode::Single => {
                    for id in &change.removed {
                        cb(event, id, false);
                    }
                    for id in &change.added {
                        cb(event, id, true);
                    }
                }
            }
        }
        if let Some(ref mut cb) = self.on_selected_items_change {
            cb(event, &change.value);
        }
    }
}

#![forbid(unsafe_code)]

//! The selection engine.
//!
//! [`SelectionEngine`] owns the selection model, the session (anchor and last
//! range) and the listeners of one tree. Each operation:
//!
//! 1. short-circuits when selection is disabled,
//! 2. computes the full next state with a pure [`transition`](crate::transition)
//!    function, reading the borrowed [`TreeIndex`],
//! 3. applies hierarchical propagation when configured,
//! 4. commits the new value and session,
//! 5. notifies listeners.
//!
//! The index is never read after step 3, so a listener that makes the host
//! restructure its tree cannot observe a half-applied operation.
//!
//! # Example
//!
//! ```
//! use arbor_core::{InputEvent, ItemTree, TreeItem};
//! use arbor_select::{SelectionConfig, SelectionEngine};
//!
//! let tree = ItemTree::from_items(vec![
//!     TreeItem::new("a"),
//!     TreeItem::new("b"),
//!     TreeItem::new("c"),
//! ])
//! .unwrap();
//!
//! let mut engine = SelectionEngine::new(SelectionConfig::multi());
//! let event = InputEvent::Programmatic;
//! engine.select(&event, &"a".into(), false, &tree);
//! engine.extend_selection_to_anchor(&event, &"c".into(), &tree);
//! assert_eq!(engine.selected_items().len(), 3);
//! ```

use std::collections::HashSet;

use arbor_core::event::InputEvent;
use arbor_core::id::ItemId;
use arbor_core::index::TreeIndex;

use crate::config::SelectionConfig;
use crate::model::SelectionModel;
use crate::notify::{SelectionChange, SelectionListeners};
use crate::propagate::propagate_selection;
use crate::session::SelectionSession;
use crate::transition::{self, SelectionState};
use crate::value::{SelectionMode, SelectionValue};

/// Selection state and operations for one tree.
#[derive(Debug)]
pub struct SelectionEngine {
    config: SelectionConfig,
    model: SelectionModel,
    session: SelectionSession,
    listeners: SelectionListeners,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl SelectionEngine {
    /// Engine that stores its own value, starting from
    /// `config.default_selected_items`.
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        let model = SelectionModel::uncontrolled(config.mode(), config.initial_value());
        Self::from_parts(config, model)
    }

    /// Engine whose value is owned by the host.
    ///
    /// Operations report proposed values through listeners and return values;
    /// the host accepts them with [`set_controlled_value`](Self::set_controlled_value).
    #[must_use]
    pub fn controlled(config: SelectionConfig, value: SelectionValue) -> Self {
        let model = SelectionModel::controlled(config.mode(), value);
        Self::from_parts(config, model)
    }

    fn from_parts(config: SelectionConfig, model: SelectionModel) -> Self {
        Self {
            config,
            model,
            session: SelectionSession::new(),
            listeners: SelectionListeners::new(),
        }
    }

    /// Attach listeners.
    #[must_use]
    pub fn with_listeners(mut self, listeners: SelectionListeners) -> Self {
        self.listeners = listeners;
        self
    }

    /// Replace the listeners.
    pub fn set_listeners(&mut self, listeners: SelectionListeners) {
        self.listeners = listeners;
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Single- or multi-select.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.model.mode()
    }

    /// Enable or disable all selection changes.
    pub fn set_disable_selection(&mut self, disabled: bool) {
        self.config.disable_selection = disabled;
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.model.is_selected(id)
    }

    /// The current value.
    #[must_use]
    pub fn selected_items(&self) -> &SelectionValue {
        self.model.value()
    }

    /// Item of the last discrete selection.
    #[must_use]
    pub fn anchor(&self) -> Option<&ItemId> {
        self.session.anchor.as_ref()
    }

    /// Ids added by the most recent range operation.
    #[must_use]
    pub fn last_range(&self) -> &HashSet<ItemId> {
        &self.session.last_range
    }

    /// The anchor and last range.
    #[must_use]
    pub fn session(&self) -> &SelectionSession {
        &self.session
    }

    /// Whether the host owns the value.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.model.is_controlled()
    }

    /// Accept a value from the host (controlled engines only).
    ///
    /// Does not notify listeners. Returns whether the value changed.
    pub fn set_controlled_value(&mut self, value: SelectionValue) -> bool {
        self.model.set_controlled_value(value)
    }

    /// Select `id`; see [`transition::toggle_item`].
    pub fn select<T>(
        &mut self,
        event: &InputEvent,
        id: &ItemId,
        additive: bool,
        index: &T,
    ) -> Option<SelectionChange>
    where
        T: TreeIndex + ?Sized,
    {
        self.apply("select", event, index, |state, mode, index| {
            transition::toggle_item(state, mode, id, additive, index)
        })
    }

    /// Force `id` into or out of the selection; see
    /// [`transition::set_item_selection`].
    pub fn set_item_selection<T>(
        &mut self,
        event: &InputEvent,
        id: &ItemId,
        should_be_selected: bool,
        keep_existing: bool,
        index: &T,
    ) -> Option<SelectionChange>
    where
        T: TreeIndex + ?Sized,
    {
        self.apply("set_item_selection", event, index, |state, mode, index| {
            transition::set_item_selection(state, mode, id, should_be_selected, keep_existing, index)
        })
    }

    /// Replace the last range with the range between `start` and `end`.
    pub fn select_range<T>(
        &mut self,
        event: &InputEvent,
        start: &ItemId,
        end: &ItemId,
        index: &T,
    ) -> Option<SelectionChange>
    where
        T: TreeIndex + ?Sized,
    {
        self.apply("select_range", event, index, |state, mode, index| {
            transition::select_range(state, mode, start, end, index)
        })
    }

    /// Range between the anchor and `id`.
    pub fn extend_selection_to_anchor<T>(
        &mut self,
        event: &InputEvent,
        id: &ItemId,
        index: &T,
    ) -> Option<SelectionChange>
    where
        T: TreeIndex + ?Sized,
    {
        self.apply("extend_selection_to_anchor", event, index, |state, mode, index| {
            transition::expand_selection_range(state, mode, id, index)
        })
    }

    /// Range between the first navigable item and `id`.
    pub fn select_range_from_root_to_item<T>(
        &mut self,
        event: &InputEvent,
        id: &ItemId,
        index: &T,
    ) -> Option<SelectionChange>
    where
        T: TreeIndex + ?Sized,
    {
        self.apply("select_range_from_root_to_item", event, index, |state, mode, index| {
            transition::select_range_from_start_to_item(state, mode, id, index)
        })
    }

    /// Range between `id` and the last navigable item.
    pub fn select_range_from_item_to_last<T>(
        &mut self,
        event: &InputEvent,
        id: &ItemId,
        index: &T,
    ) -> Option<SelectionChange>
    where
        T: TreeIndex + ?Sized,
    {
        self.apply("select_range_from_item_to_last", event, index, |state, mode, index| {
            transition::select_range_from_item_to_end(state, mode, id, index)
        })
    }

    /// Select every selectable navigable item.
    pub fn select_all_navigable<T>(
        &mut self,
        event: &InputEvent,
        index: &T,
    ) -> Option<SelectionChange>
    where
        T: TreeIndex + ?Sized,
    {
        self.apply("select_all_navigable", event, index, transition::select_all_navigable)
    }

    /// One shift+arrow step from `current` to `next`.
    pub fn extend_by_arrow_step<T>(
        &mut self,
        event: &InputEvent,
        current: &ItemId,
        next: &ItemId,
        index: &T,
    ) -> Option<SelectionChange>
    where
        T: TreeIndex + ?Sized,
    {
        self.apply("extend_by_arrow_step", event, index, |state, mode, index| {
            transition::extend_by_arrow_step(state, mode, current, next, index)
        })
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn apply<T, F>(
        &mut self,
        op: &'static str,
        event: &InputEvent,
        index: &T,
        transition: F,
    ) -> Option<SelectionChange>
    where
        T: TreeIndex + ?Sized,
        F: FnOnce(&SelectionState, SelectionMode, &T) -> Option<SelectionState>,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "selection_op",
            op = op,
            source = event.source(),
            multi = self.mode().is_multi()
        )
        .entered();

        if self.config.disable_selection {
            crate::debug!(op, "selection disabled");
            return None;
        }

        let mode = self.mode();
        let state = SelectionState {
            value: self.model.value().clone(),
            session: self.session.clone(),
        };
        let Some(next) = transition(&state, mode, index) else {
            crate::debug!(op, "no-op");
            return None;
        };

        let value = if mode.is_multi() && self.config.propagation.is_enabled() {
            let session = &next.session;
            propagate_selection(
                &state.value,
                next.value,
                self.config.propagation,
                index,
                |id| session.anchor.as_ref() == Some(id) || session.in_last_range(id),
            )
        } else {
            next.value
        };
        let change = SelectionChange::between(&state.value, value);

        self.session = next.session;
        self.model.commit(change.value.clone());
        crate::debug!(
            op,
            added = change.added.len(),
            removed = change.removed.len(),
            len = change.value.len(),
            "selection committed"
        );

        self.listeners.dispatch(event, mode, &change);
        Some(change)
    }
}

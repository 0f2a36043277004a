#![forbid(unsafe_code)]

//! Pure selection transitions.
//!
//! Every function here takes the current [`SelectionState`] (value plus
//! session) and returns the complete next state, or `None` when the
//! operation does not apply. Nothing is mutated in place, so the engine can
//! commit a transition atomically and only then notify listeners.
//!
//! # Invariants
//!
//! - Multi-only transitions return `None` in [`SelectionMode::Single`].
//! - Returned multi values never contain duplicate ids.
//! - Discrete selections (`toggle_item`, `set_item_selection`) move the
//!   anchor and clear the last range; range transitions never move the
//!   anchor.
//! - The tree index is read only while computing the result.

use std::collections::HashSet;

use arbor_core::id::ItemId;
use arbor_core::index::TreeIndex;
use arbor_core::order::order_pair;
use arbor_core::range::{all_selectable_items, range_between};

use crate::session::SelectionSession;
use crate::value::{SelectionMode, SelectionValue};

/// The value and session a transition reads and produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Selected ids.
    pub value: SelectionValue,
    /// Anchor and last range.
    pub session: SelectionSession,
}

impl SelectionState {
    /// Empty state for `mode`.
    #[must_use]
    pub fn empty(mode: SelectionMode) -> Self {
        Self {
            value: SelectionValue::empty(mode),
            session: SelectionSession::new(),
        }
    }
}

fn is_selectable_target<T>(id: &ItemId, index: &T) -> bool
where
    T: TreeIndex + ?Sized,
{
    if !index.contains(id) {
        crate::debug!(%id, "unknown item");
        return false;
    }
    if index.is_disabled(id) {
        crate::debug!(%id, "item is disabled");
        return false;
    }
    true
}

/// Select `id` as a discrete action.
///
/// Single mode replaces the value with `id` (re-selecting never clears).
/// Multi mode replaces the value with `[id]` unless `additive`, in which case
/// `id` is removed in place when present and prepended otherwise.
pub fn toggle_item<T>(
    state: &SelectionState,
    mode: SelectionMode,
    id: &ItemId,
    additive: bool,
    index: &T,
) -> Option<SelectionState>
where
    T: TreeIndex + ?Sized,
{
    if !is_selectable_target(id, index) {
        return None;
    }

    let value = match mode {
        SelectionMode::Single => SelectionValue::Single(Some(id.clone())),
        SelectionMode::Multi if !additive => SelectionValue::Multi(vec![id.clone()]),
        SelectionMode::Multi => {
            let current = state.value.as_slice();
            if current.contains(id) {
                SelectionValue::Multi(current.iter().filter(|x| *x != id).cloned().collect())
            } else {
                let mut items = Vec::with_capacity(current.len() + 1);
                items.push(id.clone());
                items.extend(current.iter().cloned());
                SelectionValue::Multi(items)
            }
        }
    };

    Some(SelectionState {
        value,
        session: SelectionSession::anchored_at(id.clone()),
    })
}

/// Force `id` into or out of the selection.
///
/// With `keep_existing` in multi mode only `id` changes (added at the front
/// when newly selected). Otherwise the value becomes exactly `id` or empty.
pub fn set_item_selection<T>(
    state: &SelectionState,
    mode: SelectionMode,
    id: &ItemId,
    should_be_selected: bool,
    keep_existing: bool,
    index: &T,
) -> Option<SelectionState>
where
    T: TreeIndex + ?Sized,
{
    if !is_selectable_target(id, index) {
        return None;
    }

    let value = match mode {
        SelectionMode::Multi if keep_existing => {
            let current = state.value.as_slice();
            let was_selected = current.contains(id);
            if was_selected && !should_be_selected {
                SelectionValue::Multi(current.iter().filter(|x| *x != id).cloned().collect())
            } else if !was_selected && should_be_selected {
                let mut items = Vec::with_capacity(current.len() + 1);
                items.push(id.clone());
                items.extend(current.iter().cloned());
                SelectionValue::Multi(items)
            } else {
                state.value.clone()
            }
        }
        _ if should_be_selected => SelectionValue::from_items(mode, [id.clone()]),
        _ => SelectionValue::empty(mode),
    };

    Some(SelectionState {
        value,
        session: SelectionSession::anchored_at(id.clone()),
    })
}

/// Replace the last range with the range between `start` and `end`.
///
/// Ids added by the previous range are dropped, then the new range's ids not
/// already selected are appended in tree order. The anchor is untouched.
pub fn select_range<T>(
    state: &SelectionState,
    mode: SelectionMode,
    start: &ItemId,
    end: &ItemId,
    index: &T,
) -> Option<SelectionState>
where
    T: TreeIndex + ?Sized,
{
    if !mode.is_multi() {
        crate::debug!("range selection requires multi-select");
        return None;
    }

    let range = range_between(start, end, index);
    let session = &state.session;

    let mut items: Vec<ItemId> = state
        .value
        .iter()
        .filter(|id| !session.in_last_range(id))
        .cloned()
        .collect();
    let mut present: HashSet<ItemId> = items.iter().cloned().collect();
    for id in &range {
        if present.insert(id.clone()) {
            items.push(id.clone());
        }
    }

    Some(SelectionState {
        value: SelectionValue::Multi(items),
        session: session.with_last_range(range),
    })
}

/// Range between the anchor and `id`; `None` without an anchor.
pub fn expand_selection_range<T>(
    state: &SelectionState,
    mode: SelectionMode,
    id: &ItemId,
    index: &T,
) -> Option<SelectionState>
where
    T: TreeIndex + ?Sized,
{
    let Some(anchor) = state.session.anchor.as_ref() else {
        crate::debug!(%id, "no anchor to extend from");
        return None;
    };
    let Some((first, last)) = order_pair(anchor, id, index) else {
        crate::debug!(%anchor, %id, "anchor and target have no order relation");
        return None;
    };
    select_range(state, mode, &first, &last, index)
}

/// Range between the first navigable item and `id`.
pub fn select_range_from_start_to_item<T>(
    state: &SelectionState,
    mode: SelectionMode,
    id: &ItemId,
    index: &T,
) -> Option<SelectionState>
where
    T: TreeIndex + ?Sized,
{
    let first = index.first_navigable_item()?.clone();
    select_range(state, mode, &first, id, index)
}

/// Range between `id` and the last navigable item.
pub fn select_range_from_item_to_end<T>(
    state: &SelectionState,
    mode: SelectionMode,
    id: &ItemId,
    index: &T,
) -> Option<SelectionState>
where
    T: TreeIndex + ?Sized,
{
    let last = index.last_navigable_item()?.clone();
    select_range(state, mode, id, &last, index)
}

/// Select every selectable navigable item; the whole set becomes the range.
pub fn select_all_navigable<T>(
    state: &SelectionState,
    mode: SelectionMode,
    index: &T,
) -> Option<SelectionState>
where
    T: TreeIndex + ?Sized,
{
    if !mode.is_multi() {
        crate::debug!("select-all requires multi-select");
        return None;
    }
    let all = all_selectable_items(index);
    Some(SelectionState {
        session: state.session.with_last_range(all.iter().cloned()),
        value: SelectionValue::Multi(all),
    })
}

/// One shift+arrow step from `current` to `next`.
///
/// Starting a step sequence selects `next` and tracks both items as the
/// range. Stepping back onto a tracked item deselects `current`; stepping
/// forward selects `next`. When `current` is outside the tracked range the
/// range restarts empty before the step is applied. Steps onto disabled
/// items do nothing.
pub fn extend_by_arrow_step<T>(
    state: &SelectionState,
    mode: SelectionMode,
    current: &ItemId,
    next: &ItemId,
    index: &T,
) -> Option<SelectionState>
where
    T: TreeIndex + ?Sized,
{
    if !mode.is_multi() {
        crate::debug!("arrow-step selection requires multi-select");
        return None;
    }
    if !index.contains(current) || !is_selectable_target(next, index) {
        crate::debug!(%current, %next, "arrow step not applicable");
        return None;
    }

    let mut items = state.value.to_vec();
    let mut range = state.session.last_range.clone();

    if range.is_empty() {
        if !items.contains(next) {
            items.push(next.clone());
        }
        range.insert(current.clone());
        range.insert(next.clone());
    } else {
        if !range.contains(current) {
            range.clear();
        }
        if range.contains(next) {
            items.retain(|id| id != current);
            range.remove(current);
        } else {
            if !items.contains(next) {
                items.push(next.clone());
            }
            range.insert(next.clone());
        }
    }

    Some(SelectionState {
        value: SelectionValue::Multi(items),
        session: state.session.with_last_range(range),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::id::ids;
    use arbor_core::tree::{ItemTree, TreeItem};

    const MULTI: SelectionMode = SelectionMode::Multi;
    const SINGLE: SelectionMode = SelectionMode::Single;

    fn flat(n: usize) -> ItemTree {
        ItemTree::from_items((1..=n).map(|i| TreeItem::new(i.to_string())).collect()).unwrap()
    }

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    fn multi_state(selected: &[&str]) -> SelectionState {
        SelectionState {
            value: SelectionValue::multi(selected.iter().copied()),
            session: SelectionSession::new(),
        }
    }

    #[test]
    fn single_toggle_replaces_and_never_clears() {
        let tree = flat(3);
        let state = SelectionState::empty(SINGLE);
        let state = toggle_item(&state, SINGLE, &id("1"), true, &tree).unwrap();
        assert_eq!(state.value, SelectionValue::single("1"));
        let state = toggle_item(&state, SINGLE, &id("1"), false, &tree).unwrap();
        assert_eq!(state.value, SelectionValue::single("1"));
        let state = toggle_item(&state, SINGLE, &id("2"), false, &tree).unwrap();
        assert_eq!(state.value, SelectionValue::single("2"));
        assert_eq!(state.session.anchor, Some(id("2")));
    }

    #[test]
    fn multi_additive_toggle_prepends_and_removes_in_place() {
        let tree = flat(4);
        let state = multi_state(&["2", "3"]);
        let state = toggle_item(&state, MULTI, &id("4"), true, &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["4", "2", "3"]));
        let state = toggle_item(&state, MULTI, &id("2"), true, &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["4", "3"]));
    }

    #[test]
    fn multi_plain_toggle_replaces() {
        let tree = flat(3);
        let state = multi_state(&["1", "2"]);
        let state = toggle_item(&state, MULTI, &id("3"), false, &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["3"]));
    }

    #[test]
    fn toggle_clears_last_range_and_sets_anchor() {
        let tree = flat(3);
        let mut state = multi_state(&[]);
        state.session = SelectionSession::anchored_at(id("1")).with_last_range(ids(["1", "2"]));
        let state = toggle_item(&state, MULTI, &id("3"), true, &tree).unwrap();
        assert_eq!(state.session.anchor, Some(id("3")));
        assert!(state.session.last_range.is_empty());
    }

    #[test]
    fn disabled_and_unknown_items_are_not_toggled() {
        let mut tree = flat(3);
        tree.set_disabled(&id("2"), true).unwrap();
        let state = multi_state(&[]);
        assert!(toggle_item(&state, MULTI, &id("2"), false, &tree).is_none());
        assert!(toggle_item(&state, MULTI, &id("ghost"), false, &tree).is_none());
    }

    #[test]
    fn range_keeps_prior_selection_and_appends_in_tree_order() {
        let tree = flat(5);
        let state = multi_state(&["5"]);
        let state = select_range(&state, MULTI, &id("3"), &id("1"), &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["5", "1", "2", "3"]));
        assert_eq!(state.session.last_range.len(), 3);
    }

    #[test]
    fn range_replaces_previous_range() {
        let tree = flat(5);
        let state = multi_state(&["5"]);
        let state = select_range(&state, MULTI, &id("1"), &id("3"), &tree).unwrap();
        let state = select_range(&state, MULTI, &id("1"), &id("2"), &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["5", "1", "2"]));
    }

    #[test]
    fn range_is_multi_only() {
        let tree = flat(3);
        let state = SelectionState::empty(SINGLE);
        assert!(select_range(&state, SINGLE, &id("1"), &id("3"), &tree).is_none());
        assert!(select_all_navigable(&state, SINGLE, &tree).is_none());
        assert!(extend_by_arrow_step(&state, SINGLE, &id("1"), &id("2"), &tree).is_none());
    }

    #[test]
    fn expand_requires_anchor() {
        let tree = flat(3);
        let state = multi_state(&[]);
        assert!(expand_selection_range(&state, MULTI, &id("3"), &tree).is_none());

        let state = toggle_item(&state, MULTI, &id("3"), false, &tree).unwrap();
        let state = expand_selection_range(&state, MULTI, &id("1"), &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["3", "1", "2"]));
        assert_eq!(state.session.anchor, Some(id("3")));
    }

    #[test]
    fn range_to_start_and_end() {
        let tree = flat(4);
        let state = multi_state(&[]);
        let to_start = select_range_from_start_to_item(&state, MULTI, &id("2"), &tree).unwrap();
        assert_eq!(to_start.value.to_vec(), ids(["1", "2"]));
        let to_end = select_range_from_item_to_end(&state, MULTI, &id("2"), &tree).unwrap();
        assert_eq!(to_end.value.to_vec(), ids(["2", "3", "4"]));
    }

    #[test]
    fn select_all_sets_range_and_keeps_anchor() {
        let mut tree = flat(3);
        tree.set_disabled(&id("2"), true).unwrap();
        let mut state = multi_state(&[]);
        state.session = SelectionSession::anchored_at(id("1"));
        let state = select_all_navigable(&state, MULTI, &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["1", "3"]));
        assert_eq!(state.session.anchor, Some(id("1")));
        assert!(state.session.in_last_range(&id("3")));
    }

    #[test]
    fn arrow_steps_advance_then_retreat() {
        let tree = flat(4);
        let state = toggle_item(&multi_state(&[]), MULTI, &id("1"), false, &tree).unwrap();
        let state = extend_by_arrow_step(&state, MULTI, &id("1"), &id("2"), &tree).unwrap();
        let state = extend_by_arrow_step(&state, MULTI, &id("2"), &id("3"), &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["1", "2", "3"]));

        let state = extend_by_arrow_step(&state, MULTI, &id("3"), &id("2"), &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["1", "2"]));
        assert!(!state.session.in_last_range(&id("3")));
        assert!(state.session.in_last_range(&id("1")));
    }

    #[test]
    fn arrow_step_outside_range_restarts_tracking() {
        let tree = flat(5);
        let mut state = multi_state(&["1", "2"]);
        state.session = SelectionSession::new().with_last_range(ids(["1", "2"]));
        let state = extend_by_arrow_step(&state, MULTI, &id("4"), &id("5"), &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["1", "2", "5"]));
        assert_eq!(
            state.session.last_range,
            ids(["5"]).into_iter().collect::<HashSet<_>>()
        );
    }

    #[test]
    fn set_item_selection_keep_existing() {
        let tree = flat(3);
        let state = multi_state(&["1"]);
        let state = set_item_selection(&state, MULTI, &id("2"), true, true, &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["2", "1"]));
        let state = set_item_selection(&state, MULTI, &id("2"), true, true, &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["2", "1"]));
        let state = set_item_selection(&state, MULTI, &id("1"), false, true, &tree).unwrap();
        assert_eq!(state.value.to_vec(), ids(["2"]));
    }

    #[test]
    fn set_item_selection_replace() {
        let tree = flat(3);
        let state = multi_state(&["1", "2"]);
        let selected = set_item_selection(&state, MULTI, &id("3"), true, false, &tree).unwrap();
        assert_eq!(selected.value.to_vec(), ids(["3"]));
        let cleared = set_item_selection(&state, MULTI, &id("3"), false, false, &tree).unwrap();
        assert!(cleared.value.is_empty());

        let single = SelectionState {
            value: SelectionValue::single("1"),
            session: SelectionSession::new(),
        };
        let cleared = set_item_selection(&single, SINGLE, &id("1"), false, true, &tree).unwrap();
        assert_eq!(cleared.value, SelectionValue::Single(None));
    }
}

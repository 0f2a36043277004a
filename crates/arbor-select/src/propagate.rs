#![forbid(unsafe_code)]

//! Hierarchical propagation of selection changes.
//!
//! Given the value before and after a transition, spreads the difference
//! through the tree:
//!
//! - **descendants**: an added item selects its whole subtree; a removed item
//!   deselects it.
//! - **parents**: an added item selects its parent once every child of that
//!   parent is selected (recursively upwards); a removed item deselects all
//!   of its ancestors.
//!
//! Disabled items are never added by propagation and do not keep a parent
//! from becoming selected. Pinned items (the explicit targets of the
//! operation) are never removed by propagation.

use std::collections::HashSet;

use arbor_core::id::ItemId;
use arbor_core::index::TreeIndex;

use crate::config::SelectionPropagation;
use crate::value::SelectionValue;

/// Apply `propagation` to the change from `old` to `new`.
///
/// Ids kept from `new` retain their order; ids added by propagation are
/// appended in the order they are discovered. Only multi values propagate.
///
/// Ids of `new` for which `pinned` returns true stay selected even when a
/// removed ancestor or descendant would otherwise deselect them.
pub fn propagate_selection<T, P>(
    old: &SelectionValue,
    new: SelectionValue,
    propagation: SelectionPropagation,
    index: &T,
    pinned: P,
) -> SelectionValue
where
    T: TreeIndex + ?Sized,
    P: Fn(&ItemId) -> bool,
{
    let SelectionValue::Multi(items) = new else {
        return new;
    };
    if !propagation.is_enabled() {
        return SelectionValue::Multi(items);
    }

    let old_set: HashSet<&ItemId> = old.iter().collect();
    let new_set: HashSet<&ItemId> = items.iter().collect();
    let added: Vec<ItemId> = items
        .iter()
        .filter(|id| !old_set.contains(id))
        .cloned()
        .collect();
    let removed: Vec<ItemId> = old
        .iter()
        .filter(|id| !new_set.contains(id))
        .cloned()
        .collect();

    let mut lookup: HashSet<ItemId> = items.iter().cloned().collect();
    let mut out = items;

    for id in &added {
        if propagation.descendants {
            for descendant in descendants_of(id, index) {
                if !index.is_disabled(&descendant) && lookup.insert(descendant.clone()) {
                    out.push(descendant);
                }
            }
        }
        if propagation.parents {
            select_complete_parents(id, index, &mut lookup, &mut out);
        }
    }

    for id in &removed {
        if propagation.parents {
            for ancestor in index.ancestors(id) {
                if !pinned(ancestor) {
                    lookup.remove(ancestor);
                }
            }
        }
        if propagation.descendants {
            for descendant in descendants_of(id, index) {
                if !pinned(&descendant) {
                    lookup.remove(&descendant);
                }
            }
        }
    }

    out.retain(|id| lookup.contains(id));
    crate::trace!(
        added = added.len(),
        removed = removed.len(),
        len = out.len(),
        "selection propagated"
    );
    SelectionValue::Multi(out)
}

/// Strict descendants of `id` in document order.
fn descendants_of<T>(id: &ItemId, index: &T) -> Vec<ItemId>
where
    T: TreeIndex + ?Sized,
{
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    seen.insert(id.clone());
    let mut stack: Vec<&ItemId> = index.children_of(Some(id)).iter().rev().collect();
    while let Some(current) = stack.pop() {
        if !seen.insert(current.clone()) {
            continue;
        }
        out.push(current.clone());
        stack.extend(index.children_of(Some(current)).iter().rev());
    }
    out
}

/// Whether `id` and its whole subtree are selected (disabled items count as
/// satisfied).
fn subtree_selected<T>(id: &ItemId, index: &T, lookup: &HashSet<ItemId>) -> bool
where
    T: TreeIndex + ?Sized,
{
    let satisfied = |x: &ItemId| lookup.contains(x) || index.is_disabled(x);
    satisfied(id) && descendants_of(id, index).iter().all(satisfied)
}

fn select_complete_parents<T>(
    id: &ItemId,
    index: &T,
    lookup: &mut HashSet<ItemId>,
    out: &mut Vec<ItemId>,
) where
    T: TreeIndex + ?Sized,
{
    let mut current = id.clone();
    let mut seen = HashSet::new();
    while let Some(parent) = index.parent_of(&current) {
        if !seen.insert(parent.clone()) || index.is_disabled(parent) {
            return;
        }
        let complete = index
            .children_of(Some(parent))
            .iter()
            .all(|child| subtree_selected(child, index, lookup));
        if !complete {
            return;
        }
        if lookup.insert(parent.clone()) {
            out.push(parent.clone());
        }
        current = parent.clone();
    }
}

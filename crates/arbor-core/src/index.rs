#![forbid(unsafe_code)]

//! The tree index contract consumed by the selection engine.
//!
//! A [`TreeIndex`] is a read-only view over the host's current tree: parent
//! and child relationships, disabled flags and expansion state, addressed by
//! [`ItemId`]. The engine borrows an index for the duration of one operation
//! and never keeps references across calls, so the host is free to rebuild or
//! mutate its tree between events.
//!
//! # Invariants expected from implementors
//!
//! 1. The relationships form a forest: every non-root item has exactly one
//!    parent, and `children_of(parent_of(x))` contains `x`.
//! 2. Child order is document order.
//!
//! Provided methods tolerate a violated invariant 1 (for example a cycle
//! introduced by a host bug): every upward or forward walk tracks the ids it
//! has visited and stops instead of looping.

use std::collections::HashSet;

use crate::id::ItemId;

/// Read-only view over a tree of items.
///
/// Only five methods are required. Everything else is derived from them and
/// may be overridden when the host can answer faster.
pub trait TreeIndex {
    /// Whether `id` is currently part of the tree.
    fn contains(&self, id: &ItemId) -> bool;

    /// Parent of `id`, or `None` for roots and unknown ids.
    fn parent_of(&self, id: &ItemId) -> Option<&ItemId>;

    /// Ordered children of `parent`; `None` yields the ordered roots.
    ///
    /// Unknown parents yield an empty slice.
    fn children_of(&self, parent: Option<&ItemId>) -> &[ItemId];

    /// Whether the item itself carries the disabled flag.
    ///
    /// Use [`is_disabled`](Self::is_disabled) to include inherited state.
    fn is_marked_disabled(&self, id: &ItemId) -> bool;

    /// Whether the item is expanded (its children are shown).
    fn is_expanded(&self, id: &ItemId) -> bool;

    /// Display label used for type-ahead matching.
    fn label_of(&self, _id: &ItemId) -> Option<&str> {
        None
    }

    /// Whether disabled items still receive keyboard focus.
    fn disabled_items_focusable(&self) -> bool {
        false
    }

    /// Whether the item has children that can be shown.
    fn is_expandable(&self, id: &ItemId) -> bool {
        !self.children_of(Some(id)).is_empty()
    }

    /// Iterate the ancestors of `id`, nearest first.
    fn ancestors<'a>(&'a self, id: &'a ItemId) -> Ancestors<'a, Self> {
        Ancestors {
            index: self,
            next: self.parent_of(id),
            seen: HashSet::from([id]),
        }
    }

    /// Path from the root down to `id`, inclusive.
    ///
    /// Returns `None` when `id` is unknown or the parent chain loops.
    fn ancestor_path(&self, id: &ItemId) -> Option<Vec<ItemId>> {
        if !self.contains(id) {
            return None;
        }
        let mut path = vec![id.clone()];
        let mut seen = HashSet::from([id]);
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if !seen.insert(parent) {
                return None;
            }
            path.push(parent.clone());
            current = self.parent_of(parent);
        }
        path.reverse();
        Some(path)
    }

    /// Number of ancestors above `id` (roots have depth 0).
    fn depth_of(&self, id: &ItemId) -> usize {
        self.ancestors(id).count()
    }

    /// Index of `id` among its siblings.
    ///
    /// The visible walk and document-order comparison call this once per
    /// step; override it when the host can answer without scanning.
    fn position_in_parent(&self, id: &ItemId) -> Option<usize> {
        self.children_of(self.parent_of(id))
            .iter()
            .position(|sibling| sibling == id)
    }

    /// Disabled on its own or through a disabled ancestor.
    fn is_disabled(&self, id: &ItemId) -> bool {
        self.is_marked_disabled(id) || self.ancestors(id).any(|a| self.is_marked_disabled(a))
    }

    /// Every ancestor is expanded.
    fn is_visible(&self, id: &ItemId) -> bool {
        self.contains(id) && self.ancestors(id).all(|a| self.is_expanded(a))
    }

    /// Reachable by directional keyboard focus movement.
    fn is_navigable(&self, id: &ItemId) -> bool {
        self.is_visible(id) && (self.disabled_items_focusable() || !self.is_disabled(id))
    }

    /// Visible and enabled; the items a range may contain.
    fn is_selectable(&self, id: &ItemId) -> bool {
        self.is_visible(id) && !self.is_disabled(id)
    }

    /// The item after `id` in the visible (expanded) pre-order sequence.
    ///
    /// Descends into the children of an expanded item, otherwise moves to the
    /// next sibling of the nearest ancestor-or-self that has one.
    fn next_visible_item(&self, id: &ItemId) -> Option<&ItemId> {
        if !self.contains(id) {
            return None;
        }
        if self.is_expanded(id) {
            if let Some(first) = self.children_of(Some(id)).first() {
                return Some(first);
            }
        }
        let mut current = id;
        let mut seen = HashSet::new();
        loop {
            if !seen.insert(current) {
                return None;
            }
            let parent = self.parent_of(current);
            if let Some(pos) = self.position_in_parent(current) {
                if let Some(next) = self.children_of(parent).get(pos + 1) {
                    return Some(next);
                }
            }
            current = parent?;
        }
    }

    /// The item before `id` in the visible (expanded) pre-order sequence.
    fn previous_visible_item(&self, id: &ItemId) -> Option<&ItemId> {
        let parent = self.parent_of(id);
        let pos = self.position_in_parent(id)?;
        let Some(mut current) = pos.checked_sub(1).and_then(|p| self.children_of(parent).get(p))
        else {
            return parent;
        };
        let mut seen = HashSet::new();
        while self.is_expanded(current) && seen.insert(current) {
            match self.children_of(Some(current)).last() {
                Some(last) => current = last,
                None => break,
            }
        }
        Some(current)
    }

    /// The next navigable item after `id`, skipping hidden and unfocusable items.
    fn next_navigable_item(&self, id: &ItemId) -> Option<&ItemId> {
        let mut seen = HashSet::from([id]);
        let mut current = self.next_visible_item(id);
        while let Some(candidate) = current {
            if self.is_navigable(candidate) {
                return Some(candidate);
            }
            if !seen.insert(candidate) {
                return None;
            }
            current = self.next_visible_item(candidate);
        }
        None
    }

    /// The previous navigable item before `id`.
    fn previous_navigable_item(&self, id: &ItemId) -> Option<&ItemId> {
        let mut seen = HashSet::from([id]);
        let mut current = self.previous_visible_item(id);
        while let Some(candidate) = current {
            if self.is_navigable(candidate) {
                return Some(candidate);
            }
            if !seen.insert(candidate) {
                return None;
            }
            current = self.previous_visible_item(candidate);
        }
        None
    }

    /// First navigable item of the whole tree.
    fn first_navigable_item(&self) -> Option<&ItemId> {
        let first = self.children_of(None).first()?;
        if self.is_navigable(first) {
            Some(first)
        } else {
            self.next_navigable_item(first)
        }
    }

    /// Last navigable item of the whole tree.
    fn last_navigable_item(&self) -> Option<&ItemId> {
        let mut current = self.children_of(None).last()?;
        let mut seen = HashSet::new();
        while self.is_expanded(current) && seen.insert(current) {
            match self.children_of(Some(current)).last() {
                Some(last) => current = last,
                None => break,
            }
        }
        if self.is_navigable(current) {
            Some(current)
        } else {
            self.previous_navigable_item(current)
        }
    }

    /// Every navigable item in document order.
    fn all_navigable_items(&self) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.first_navigable_item();
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            out.push(id.clone());
            current = self.next_navigable_item(id);
        }
        out
    }
}

/// Iterator over the ancestors of an item, nearest first.
///
/// Created by [`TreeIndex::ancestors`]. Stops early if the parent chain loops.
#[derive(Debug)]
pub struct Ancestors<'a, T: ?Sized> {
    index: &'a T,
    next: Option<&'a ItemId>,
    seen: HashSet<&'a ItemId>,
}

impl<'a, T: TreeIndex + ?Sized> Iterator for Ancestors<'a, T> {
    type Item = &'a ItemId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !self.seen.insert(current) {
            return None;
        }
        self.next = self.index.parent_of(current);
        Some(current)
    }
}

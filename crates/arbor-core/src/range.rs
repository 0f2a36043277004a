#![forbid(unsafe_code)]

//! Range extraction between two items.
//!
//! A range is the inclusive, document-ordered sequence of *selectable* items
//! (visible under the current expansion state and not disabled) between two
//! endpoints. Endpoint order does not matter.
//!
//! The walk follows [`TreeIndex::next_visible_item`] from the earlier bound,
//! so items inside collapsed branches are never part of a range, and disabled
//! items are stepped over without being collected.

use std::collections::HashSet;

use crate::id::ItemId;
use crate::index::TreeIndex;
use crate::order::order_pair;

/// Selectable items between `start` and `end`, inclusive, in document order.
///
/// Returns an empty sequence when either endpoint is unknown or when the later
/// endpoint cannot be reached by the visible walk (for example because it is
/// hidden under a collapsed ancestor).
///
/// ```
/// use arbor_core::range::range_between;
/// use arbor_core::tree::{ItemTree, TreeItem};
/// use arbor_core::id::ids;
///
/// let tree = ItemTree::from_items(vec![
///     TreeItem::new("1"),
///     TreeItem::new("2").with_disabled(true),
///     TreeItem::new("3"),
/// ])
/// .unwrap();
///
/// assert_eq!(range_between(&"3".into(), &"1".into(), &tree), ids(["1", "3"]));
/// ```
pub fn range_between<T>(start: &ItemId, end: &ItemId, index: &T) -> Vec<ItemId>
where
    T: TreeIndex + ?Sized,
{
    let Some((first, last)) = order_pair(start, end, index) else {
        crate::debug!(%start, %end, "range endpoints have no order relation");
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(&first);
    while let Some(id) = current {
        if !seen.insert(id) {
            break;
        }
        if index.is_selectable(id) {
            out.push(id.clone());
        }
        if *id == last {
            return out;
        }
        current = index.next_visible_item(id);
    }

    crate::debug!(%first, %last, "range end not reachable from start");
    Vec::new()
}

/// Range from the first navigable item of the tree to `id`.
pub fn range_from_first<T>(id: &ItemId, index: &T) -> Vec<ItemId>
where
    T: TreeIndex + ?Sized,
{
    match index.first_navigable_item() {
        Some(first) => range_between(first, id, index),
        None => Vec::new(),
    }
}

/// Range from `id` to the last navigable item of the tree.
pub fn range_to_last<T>(id: &ItemId, index: &T) -> Vec<ItemId>
where
    T: TreeIndex + ?Sized,
{
    match index.last_navigable_item() {
        Some(last) => range_between(id, last, index),
        None => Vec::new(),
    }
}

/// Every selectable item of the tree, in document order.
pub fn all_selectable_items<T>(index: &T) -> Vec<ItemId>
where
    T: TreeIndex + ?Sized,
{
    index
        .all_navigable_items()
        .into_iter()
        .filter(|id| !index.is_disabled(id))
        .collect()
}

#![forbid(unsafe_code)]

//! Document (Tremaux) order between two items.
//!
//! The order of two items is their order in a depth-first pre-order walk of
//! the tree that respects sibling order: a parent precedes its descendants, and
//! items in different subtrees are ordered by the siblings their root paths
//! diverge at.
//!
//! # Algorithm
//!
//! 1. Build both root paths (`root → … → item`).
//! 2. Walk them in lock-step; the last shared element is the lowest common
//!    ancestor (or none, when the items live under different roots).
//! 3. If one path is a prefix of the other, the shorter path's item is an
//!    ancestor and comes first.
//! 4. Otherwise compare the positions of the first diverging elements among
//!    the children of the common ancestor (or among the roots).
//!
//! Unknown ids have no order relation; callers get `None`.

use std::cmp::Ordering;

use crate::id::ItemId;
use crate::index::TreeIndex;

/// Compare `a` and `b` in document order.
///
/// Returns `None` if either id is absent from `index` or its parent chain is
/// malformed.
///
/// ```
/// use std::cmp::Ordering;
/// use arbor_core::order::compare_document_order;
/// use arbor_core::tree::{ItemTree, TreeItem};
///
/// let tree = ItemTree::from_items(vec![
///     TreeItem::new("1").child(TreeItem::new("1.1")),
///     TreeItem::new("2"),
/// ])
/// .unwrap();
///
/// let cmp = compare_document_order(&"1.1".into(), &"2".into(), &tree);
/// assert_eq!(cmp, Some(Ordering::Less));
/// ```
pub fn compare_document_order<T>(a: &ItemId, b: &ItemId, index: &T) -> Option<Ordering>
where
    T: TreeIndex + ?Sized,
{
    if a == b {
        return index.contains(a).then_some(Ordering::Equal);
    }
    let path_a = index.ancestor_path(a)?;
    let path_b = index.ancestor_path(b)?;

    let shared = path_a
        .iter()
        .zip(&path_b)
        .take_while(|(x, y)| x == y)
        .count();

    // One item is an ancestor of the other.
    if shared == path_a.len() {
        return Some(Ordering::Less);
    }
    if shared == path_b.len() {
        return Some(Ordering::Greater);
    }

    let pos_a = index.position_in_parent(&path_a[shared])?;
    let pos_b = index.position_in_parent(&path_b[shared])?;
    Some(pos_a.cmp(&pos_b))
}

/// Return `(first, second)` ordered by document order.
///
/// Returns `None` when the two items have no order relation (see
/// [`compare_document_order`]).
pub fn order_pair<T>(a: &ItemId, b: &ItemId, index: &T) -> Option<(ItemId, ItemId)>
where
    T: TreeIndex + ?Sized,
{
    let ordering = compare_document_order(a, b, index);
    crate::trace!(first = %a, second = %b, ?ordering, "document order");
    match ordering? {
        Ordering::Greater => Some((b.clone(), a.clone())),
        Ordering::Less | Ordering::Equal => Some((a.clone(), b.clone())),
    }
}

/// Lowest common ancestor of `a` and `b`, if they share one.
///
/// An item counts as its own ancestor, so the LCA of a parent and its child is
/// the parent. Items under different roots have no common ancestor.
pub fn lowest_common_ancestor<T>(a: &ItemId, b: &ItemId, index: &T) -> Option<ItemId>
where
    T: TreeIndex + ?Sized,
{
    let path_a = index.ancestor_path(a)?;
    let path_b = index.ancestor_path(b)?;
    path_a
        .into_iter()
        .zip(path_b)
        .take_while(|(x, y)| x == y)
        .last()
        .map(|(x, _)| x)
}

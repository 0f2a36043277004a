#![forbid(unsafe_code)]

//! Arena-backed item tree implementing [`TreeIndex`].
//!
//! Items are declared with the [`TreeItem`] builder and stored in an
//! [`ItemTree`] keyed by id. The arena is what a host would keep as its
//! source of truth; the selection engine only ever sees it through the
//! [`TreeIndex`] trait.
//!
//! # Example
//!
//! ```
//! use arbor_core::tree::{ItemTree, TreeItem};
//! use arbor_core::index::TreeIndex;
//! use arbor_core::id::ItemId;
//!
//! let tree = ItemTree::from_items(vec![
//!     TreeItem::new("src")
//!         .child(TreeItem::new("main.rs"))
//!         .child(TreeItem::new("lib.rs")),
//!     TreeItem::new("Cargo.toml"),
//! ])
//! .unwrap();
//!
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.children_of(None).len(), 2);
//! assert_eq!(tree.parent_of(&ItemId::from("lib.rs")), Some(&ItemId::from("src")));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::id::ItemId;
use crate::index::TreeIndex;

/// Errors from structural edits of an [`ItemTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// An item with this id already exists.
    DuplicateId(ItemId),
    /// The item is not part of the tree.
    UnknownItem(ItemId),
    /// The requested parent is not part of the tree.
    UnknownParent(ItemId),
    /// Moving `item` under `parent` would make it its own ancestor.
    WouldCreateCycle {
        /// Item being moved.
        item: ItemId,
        /// Requested new parent.
        parent: ItemId,
    },
    /// A reorder request is not a permutation of the current children.
    InvalidOrder {
        /// Parent whose children were being reordered (`None` for roots).
        parent: Option<ItemId>,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate item id {id:?}"),
            Self::UnknownItem(id) => write!(f, "unknown item {id:?}"),
            Self::UnknownParent(id) => write!(f, "unknown parent item {id:?}"),
            Self::WouldCreateCycle { item, parent } => {
                write!(f, "moving {item:?} under {parent:?} would create a cycle")
            }
            Self::InvalidOrder { parent: Some(parent) } => write!(
                f,
                "new child order of {parent:?} is not a permutation of its children"
            ),
            Self::InvalidOrder { parent: None } => {
                write!(f, "new root order is not a permutation of the roots")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Declarative description of an item and its subtree.
#[derive(Debug, Clone)]
pub struct TreeItem {
    id: ItemId,
    label: Option<String>,
    children: Vec<TreeItem>,
    expanded: bool,
    disabled: bool,
}

impl TreeItem {
    /// Create an expanded, enabled item with no children.
    #[must_use]
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            label: None,
            children: Vec::new(),
            expanded: true,
            disabled: false,
        }
    }

    /// Set the display label (type-ahead matches against it).
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add a child item.
    #[must_use]
    pub fn child(mut self, item: TreeItem) -> Self {
        self.children.push(item);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, items: Vec<TreeItem>) -> Self {
        self.children = items;
        self
    }

    /// Set whether this item is expanded.
    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Set whether this item is disabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The item id.
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ItemId>,
    /// Index among the parent's children (or among the roots).
    position: usize,
    children: Vec<ItemId>,
    label: Option<String>,
    expanded: bool,
    disabled: bool,
}

/// Tree of items stored in a flat map keyed by id.
///
/// Each node records its index among its siblings, so sibling lookups during
/// the visible walk and document-order comparison do not scan.
#[derive(Debug, Clone, Default)]
pub struct ItemTree {
    roots: Vec<ItemId>,
    nodes: HashMap<ItemId, Node>,
    disabled_items_focusable: bool,
}

impl ItemTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from root items.
    ///
    /// Fails with [`TreeError::DuplicateId`] if any id appears twice; no
    /// partial tree is returned.
    pub fn from_items(items: Vec<TreeItem>) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        for item in items {
            tree.insert(None, None, item)?;
        }
        Ok(tree)
    }

    /// Let disabled items receive keyboard focus.
    #[must_use]
    pub fn with_disabled_items_focusable(mut self, focusable: bool) -> Self {
        self.disabled_items_focusable = focusable;
        self
    }

    /// Number of items in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ordered root ids.
    #[must_use]
    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    /// Items shown under the current expansion state, in document order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<ItemId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for root in &self.roots {
            self.collect_visible(root, &mut out);
        }
        out
    }

    /// Count of items shown under the current expansion state.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.roots.iter().map(|root| self.subtree_visible_count(root)).sum()
    }

    fn subtree_visible_count(&self, id: &ItemId) -> usize {
        let Some(node) = self.nodes.get(id) else {
            return 0;
        };
        let mut count = 1;
        if node.expanded {
            for child in &node.children {
                count += self.subtree_visible_count(child);
            }
        }
        count
    }

    fn collect_visible(&self, id: &ItemId, out: &mut Vec<ItemId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        out.push(id.clone());
        if node.expanded {
            for child in &node.children {
                self.collect_visible(child, out);
            }
        }
    }

    fn collect_subtree(&self, id: &ItemId, out: &mut Vec<ItemId>) {
        out.push(id.clone());
        if let Some(node) = self.nodes.get(id) {
            for child in &node.children {
                self.collect_subtree(child, out);
            }
        }
    }

    /// Rewrite the stored sibling index of `parent`'s children from `from` on.
    fn renumber(&mut self, parent: Option<&ItemId>, from: usize) {
        let tail = self
            .children_of(parent)
            .get(from..)
            .map(<[ItemId]>::to_vec)
            .unwrap_or_default();
        for (offset, id) in tail.into_iter().enumerate() {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.position = from + offset;
            }
        }
    }

    fn collect_navigable(&self, id: &ItemId, inherited_disabled: bool, out: &mut Vec<ItemId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let disabled = inherited_disabled || node.disabled;
        if self.disabled_items_focusable || !disabled {
            out.push(id.clone());
        }
        if node.expanded {
            for child in &node.children {
                self.collect_navigable(child, disabled, out);
            }
        }
    }

    fn siblings_mut(&mut self, parent: Option<&ItemId>) -> Option<&mut Vec<ItemId>> {
        match parent {
            None => Some(&mut self.roots),
            Some(p) => self.nodes.get_mut(p).map(|node| &mut node.children),
        }
    }

    /// Insert `item` (with its subtree) under `parent` at `index`.
    ///
    /// `parent = None` inserts a root; `index = None` (or past the end)
    /// appends. Nothing is inserted if any id of the subtree already exists.
    pub fn insert(
        &mut self,
        parent: Option<&ItemId>,
        index: Option<usize>,
        item: TreeItem,
    ) -> Result<(), TreeError> {
        if let Some(p) = parent {
            if !self.nodes.contains_key(p) {
                return Err(TreeError::UnknownParent(p.clone()));
            }
        }
        let mut pending = Vec::new();
        flatten_item(item, parent.cloned(), 0, &mut pending);

        let mut fresh = std::collections::HashSet::with_capacity(pending.len());
        for (id, _) in &pending {
            if self.nodes.contains_key(id) || !fresh.insert(id.clone()) {
                return Err(TreeError::DuplicateId(id.clone()));
            }
        }

        let top = pending[0].0.clone();
        for (id, node) in pending {
            self.nodes.insert(id, node);
        }
        if let Some(siblings) = self.siblings_mut(parent) {
            let at = index.unwrap_or(siblings.len()).min(siblings.len());
            siblings.insert(at, top);
            self.renumber(parent, at);
        }
        Ok(())
    }

    /// Remove `id` and its whole subtree.
    ///
    /// Returns the removed ids in document order so the host can scrub them
    /// from a selection it owns.
    pub fn remove(&mut self, id: &ItemId) -> Result<Vec<ItemId>, TreeError> {
        let (parent, position) = match self.nodes.get(id) {
            Some(node) => (node.parent.clone(), node.position),
            None => return Err(TreeError::UnknownItem(id.clone())),
        };
        let mut removed = Vec::new();
        self.collect_subtree(id, &mut removed);
        if let Some(siblings) = self.siblings_mut(parent.as_ref()) {
            siblings.retain(|s| s != id);
        }
        self.renumber(parent.as_ref(), position);
        for gone in &removed {
            self.nodes.remove(gone);
        }
        Ok(removed)
    }

    /// Move `id` under `new_parent` at `index` (appends when `None`).
    pub fn move_item(
        &mut self,
        id: &ItemId,
        new_parent: Option<&ItemId>,
        index: Option<usize>,
    ) -> Result<(), TreeError> {
        let (old_parent, old_position) = match self.nodes.get(id) {
            Some(node) => (node.parent.clone(), node.position),
            None => return Err(TreeError::UnknownItem(id.clone())),
        };
        if let Some(p) = new_parent {
            if !self.nodes.contains_key(p) {
                return Err(TreeError::UnknownParent(p.clone()));
            }
            if p == id || self.ancestors(p).any(|a| a == id) {
                return Err(TreeError::WouldCreateCycle {
                    item: id.clone(),
                    parent: p.clone(),
                });
            }
        }
        if let Some(siblings) = self.siblings_mut(old_parent.as_ref()) {
            siblings.retain(|s| s != id);
        }
        self.renumber(old_parent.as_ref(), old_position);
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = new_parent.cloned();
        }
        if let Some(siblings) = self.siblings_mut(new_parent) {
            let at = index.unwrap_or(siblings.len()).min(siblings.len());
            siblings.insert(at, id.clone());
            self.renumber(new_parent, at);
        }
        Ok(())
    }

    /// Replace the child order of `parent` (`None` = roots).
    ///
    /// `order` must contain exactly the current children.
    pub fn reorder_children(
        &mut self,
        parent: Option<&ItemId>,
        order: Vec<ItemId>,
    ) -> Result<(), TreeError> {
        if let Some(p) = parent {
            if !self.nodes.contains_key(p) {
                return Err(TreeError::UnknownParent(p.clone()));
            }
        }
        let invalid = TreeError::InvalidOrder {
            parent: parent.cloned(),
        };
        let Some(siblings) = self.siblings_mut(parent) else {
            return Err(invalid);
        };
        let mut current = siblings.clone();
        let mut proposed = order.clone();
        current.sort();
        proposed.sort();
        if current != proposed {
            return Err(invalid);
        }
        *siblings = order;
        self.renumber(parent, 0);
        Ok(())
    }

    fn node_mut(&mut self, id: &ItemId) -> Result<&mut Node, TreeError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TreeError::UnknownItem(id.clone()))
    }

    /// Set whether `id` is expanded.
    pub fn set_expanded(&mut self, id: &ItemId, expanded: bool) -> Result<(), TreeError> {
        self.node_mut(id)?.expanded = expanded;
        Ok(())
    }

    /// Toggle the expanded state of `id`, returning the new state.
    pub fn toggle_expanded(&mut self, id: &ItemId) -> Result<bool, TreeError> {
        let node = self.node_mut(id)?;
        node.expanded = !node.expanded;
        Ok(node.expanded)
    }

    /// Set whether `id` is disabled.
    pub fn set_disabled(&mut self, id: &ItemId, disabled: bool) -> Result<(), TreeError> {
        self.node_mut(id)?.disabled = disabled;
        Ok(())
    }

    /// Set the label of `id`.
    pub fn set_label(&mut self, id: &ItemId, label: impl Into<String>) -> Result<(), TreeError> {
        self.node_mut(id)?.label = Some(label.into());
        Ok(())
    }

    /// Expand every item.
    pub fn expand_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.expanded = true;
        }
    }

    /// Collapse every item.
    pub fn collapse_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.expanded = false;
        }
    }
}

fn flatten_item(
    item: TreeItem,
    parent: Option<ItemId>,
    position: usize,
    out: &mut Vec<(ItemId, Node)>,
) {
    let TreeItem {
        id,
        label,
        children,
        expanded,
        disabled,
    } = item;
    let slot = out.len();
    out.push((
        id.clone(),
        Node {
            parent,
            position,
            children: Vec::with_capacity(children.len()),
            label,
            expanded,
            disabled,
        },
    ));
    for (position, child) in children.into_iter().enumerate() {
        out[slot].1.children.push(child.id.clone());
        flatten_item(child, Some(id.clone()), position, out);
    }
}

impl TreeIndex for ItemTree {
    fn contains(&self, id: &ItemId) -> bool {
        self.nodes.contains_key(id)
    }

    fn parent_of(&self, id: &ItemId) -> Option<&ItemId> {
        self.nodes.get(id)?.parent.as_ref()
    }

    fn children_of(&self, parent: Option<&ItemId>) -> &[ItemId] {
        match parent {
            None => &self.roots,
            Some(p) => self.nodes.get(p).map_or(&[], |node| node.children.as_slice()),
        }
    }

    fn is_marked_disabled(&self, id: &ItemId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.disabled)
    }

    fn is_expanded(&self, id: &ItemId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.expanded)
    }

    fn label_of(&self, id: &ItemId) -> Option<&str> {
        self.nodes.get(id)?.label.as_deref()
    }

    fn disabled_items_focusable(&self) -> bool {
        self.disabled_items_focusable
    }

    fn position_in_parent(&self, id: &ItemId) -> Option<usize> {
        self.nodes.get(id).map(|node| node.position)
    }

    fn all_navigable_items(&self) -> Vec<ItemId> {
        let mut out = Vec::new();
        for root in &self.roots {
            self.collect_navigable(root, false, &mut out);
        }
        out
    }
}

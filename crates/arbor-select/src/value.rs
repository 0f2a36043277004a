#![forbid(unsafe_code)]

//! Selection values and their set view.
//!
//! The externally visible selection is a scalar in single-select mode and a
//! sequence in multi-select mode. Internally both shapes live in one tagged
//! [`SelectionValue`] so call sites never type-check at runtime, and the
//! adapters here normalize whatever shape the host hands over.
//!
//! # Normalization rules
//!
//! | Input | Single mode | Multi mode |
//! |-------|-------------|------------|
//! | `Single(None)` | `Single(None)` | `Multi([])` |
//! | `Single(Some(a))` | `Single(Some(a))` | `Multi([a])` |
//! | `Multi([])` | `Single(None)` | `Multi([])` |
//! | `Multi([a, b, a])` | `Single(Some(a))` | `Multi([a, b])` |

use std::collections::HashSet;

use arbor_core::id::ItemId;

/// Single- or multi-select behavior; fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// At most one selected item; selecting replaces.
    #[default]
    Single,
    /// Any number of selected items; supports ranges and select-all.
    Multi,
}

impl SelectionMode {
    /// Mode matching a `multi_select` flag.
    #[must_use]
    pub const fn from_multi_select(multi_select: bool) -> Self {
        if multi_select { Self::Multi } else { Self::Single }
    }

    /// Whether this is [`SelectionMode::Multi`].
    #[must_use]
    pub const fn is_multi(self) -> bool {
        matches!(self, Self::Multi)
    }
}

/// The selection as exposed to the host.
///
/// Multi values keep selection-event order, not tree order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum SelectionValue {
    /// Single-select value.
    Single(Option<ItemId>),
    /// Multi-select value.
    Multi(Vec<ItemId>),
}

impl Default for SelectionValue {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl SelectionValue {
    /// The empty value for `mode`.
    #[must_use]
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multi => Self::Multi(Vec::new()),
        }
    }

    /// A single-select value holding `id`.
    #[must_use]
    pub fn single(id: impl Into<ItemId>) -> Self {
        Self::Single(Some(id.into()))
    }

    /// A multi-select value holding `items` in the given order.
    #[must_use]
    pub fn multi<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        Self::Multi(items.into_iter().map(Into::into).collect())
    }

    /// Build a normalized value for `mode` from a sequence of ids.
    #[must_use]
    pub fn from_items<I>(mode: SelectionMode, items: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        Self::Multi(items.into_iter().collect()).normalized(mode)
    }

    /// The mode this value's shape corresponds to.
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multi(_) => SelectionMode::Multi,
        }
    }

    /// Convert to the shape of `mode` and drop duplicate ids.
    #[must_use]
    pub fn normalized(self, mode: SelectionMode) -> Self {
        match (self, mode) {
            (Self::Single(id), SelectionMode::Single) => Self::Single(id),
            (Self::Single(id), SelectionMode::Multi) => Self::Multi(id.into_iter().collect()),
            (Self::Multi(items), SelectionMode::Single) => {
                Self::Single(items.into_iter().next())
            }
            (Self::Multi(items), SelectionMode::Multi) => {
                let mut seen = HashSet::with_capacity(items.len());
                Self::Multi(
                    items
                        .into_iter()
                        .filter(|id| seen.insert(id.clone()))
                        .collect(),
                )
            }
        }
    }

    /// The selected ids as a slice (zero or one element in single mode).
    #[must_use]
    pub fn as_slice(&self) -> &[ItemId] {
        match self {
            Self::Single(id) => id.as_slice(),
            Self::Multi(items) => items,
        }
    }

    /// Iterate the selected ids.
    pub fn iter(&self) -> std::slice::Iter<'_, ItemId> {
        self.as_slice().iter()
    }

    /// Copy the selected ids into a vec.
    #[must_use]
    pub fn to_vec(&self) -> Vec<ItemId> {
        self.as_slice().to_vec()
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Linear membership test; prefer [`SelectedSet`] for repeated queries.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.as_slice().contains(id)
    }

    /// The single selected id, if this is a single-select value.
    #[must_use]
    pub fn as_single(&self) -> Option<&ItemId> {
        match self {
            Self::Single(id) => id.as_ref(),
            Self::Multi(_) => None,
        }
    }
}

impl<'a> IntoIterator for &'a SelectionValue {
    type Item = &'a ItemId;
    type IntoIter = std::slice::Iter<'a, ItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Set-membership view of a [`SelectionValue`].
///
/// Invariant: `set.contains(id)` iff `id` appears in the value it was built
/// from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSet {
    ids: HashSet<ItemId>,
}

impl SelectedSet {
    /// Build the set for `value`.
    #[must_use]
    pub fn from_value(value: &SelectionValue) -> Self {
        Self {
            ids: value.iter().cloned().collect(),
        }
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Number of distinct selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

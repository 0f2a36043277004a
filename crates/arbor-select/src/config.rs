#![forbid(unsafe_code)]

//! Selection configuration.

use crate::value::{SelectionMode, SelectionValue};

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

/// How a selection change spreads through the hierarchy (multi-select only).
///
/// Both directions are off by default: selecting an item selects only that
/// item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SelectionPropagation {
    /// Selecting an item selects its descendants; deselecting deselects them.
    pub descendants: bool,
    /// An item becomes selected once all its children are; deselecting an
    /// item deselects its ancestors.
    pub parents: bool,
}

impl SelectionPropagation {
    /// Propagate in both directions.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            descendants: true,
            parents: true,
        }
    }

    /// Whether any propagation is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.descendants || self.parents
    }
}

// ---------------------------------------------------------------------------
// SelectionConfig
// ---------------------------------------------------------------------------

/// Options recognized by the selection engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SelectionConfig {
    /// Short-circuit every mutating operation.
    /// Default: false
    pub disable_selection: bool,

    /// Multi-select algorithms and a sequence-shaped value.
    /// Default: false (single-select)
    pub multi_select: bool,

    /// Initial value when the selection is uncontrolled.
    /// Default: none (empty for the mode)
    pub default_selected_items: Option<SelectionValue>,

    /// Selection happens through per-item checkboxes; clicking item content
    /// only focuses.
    /// Default: false
    pub checkbox_selection: bool,

    /// Hierarchical propagation of selection changes.
    /// Default: off
    pub propagation: SelectionPropagation,
}

impl SelectionConfig {
    /// Single-select defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Multi-select defaults.
    #[must_use]
    pub fn multi() -> Self {
        Self::default().with_multi_select(true)
    }

    /// Enable or disable all selection changes.
    #[must_use]
    pub fn with_disable_selection(mut self, disabled: bool) -> Self {
        self.disable_selection = disabled;
        self
    }

    /// Choose single- or multi-select.
    #[must_use]
    pub fn with_multi_select(mut self, multi: bool) -> Self {
        self.multi_select = multi;
        self
    }

    /// Initial value for an uncontrolled selection.
    #[must_use]
    pub fn with_default_selected_items(mut self, value: SelectionValue) -> Self {
        self.default_selected_items = Some(value);
        self
    }

    /// Select through checkboxes instead of item clicks.
    #[must_use]
    pub fn with_checkbox_selection(mut self, enabled: bool) -> Self {
        self.checkbox_selection = enabled;
        self
    }

    /// Configure hierarchical propagation.
    #[must_use]
    pub fn with_propagation(mut self, propagation: SelectionPropagation) -> Self {
        self.propagation = propagation;
        self
    }

    /// The selection mode implied by `multi_select`.
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        SelectionMode::from_multi_select(self.multi_select)
    }

    /// The initial uncontrolled value, normalized to the mode.
    #[must_use]
    pub fn initial_value(&self) -> SelectionValue {
        self.default_selected_items
            .clone()
            .map_or_else(|| SelectionValue::empty(self.mode()), |v| v.normalized(self.mode()))
    }
}

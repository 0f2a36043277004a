#![forbid(unsafe_code)]

//! Ownership of the selection value.
//!
//! A [`SelectionModel`] is either *uncontrolled* (the engine stores the value
//! and updates it on every committed change) or *controlled* (the host owns
//! the value; the engine only proposes changes through notifications and the
//! host pushes the accepted value back with
//! [`SelectionModel::set_controlled_value`]).
//!
//! # Invariants
//!
//! - The stored value always has the shape of the model's mode.
//! - `is_selected(id)` agrees with `value().contains(id)`.

use arbor_core::id::ItemId;

use crate::value::{SelectedSet, SelectionMode, SelectionValue};

/// Who owns the selection value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueSource {
    /// The engine stores the value.
    #[default]
    Uncontrolled,
    /// The host stores the value and pushes it back after each change.
    Controlled,
}

/// The current selection value plus its memoized membership set.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    mode: SelectionMode,
    source: ValueSource,
    value: SelectionValue,
    selected: SelectedSet,
}

impl SelectionModel {
    /// An engine-owned value starting at `initial`.
    #[must_use]
    pub fn uncontrolled(mode: SelectionMode, initial: SelectionValue) -> Self {
        Self::with_source(mode, ValueSource::Uncontrolled, initial)
    }

    /// A host-owned value starting at `value`.
    #[must_use]
    pub fn controlled(mode: SelectionMode, value: SelectionValue) -> Self {
        Self::with_source(mode, ValueSource::Controlled, value)
    }

    fn with_source(mode: SelectionMode, source: ValueSource, value: SelectionValue) -> Self {
        let value = value.normalized(mode);
        let selected = SelectedSet::from_value(&value);
        Self {
            mode,
            source,
            value,
            selected,
        }
    }

    /// The selection mode.
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Who owns the value.
    #[must_use]
    pub const fn source(&self) -> ValueSource {
        self.source
    }

    /// Whether the host owns the value.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        matches!(self.source, ValueSource::Controlled)
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &SelectionValue {
        &self.value
    }

    /// Whether `id` is in the current value.
    #[must_use]
    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected.contains(id)
    }

    /// Store a value produced by the engine.
    ///
    /// Controlled models keep their value until the host pushes one back.
    /// Returns whether the stored value changed.
    pub fn commit(&mut self, value: SelectionValue) -> bool {
        if self.is_controlled() {
            return false;
        }
        self.replace(value)
    }

    /// Accept the host's value.
    ///
    /// Ignored (returns `false`) for uncontrolled models.
    pub fn set_controlled_value(&mut self, value: SelectionValue) -> bool {
        if !self.is_controlled() {
            crate::warn!("controlled value pushed into an uncontrolled selection; ignored");
            return false;
        }
        self.replace(value)
    }

    fn replace(&mut self, value: SelectionValue) -> bool {
        let value = value.normalized(self.mode);
        if value == self.value {
            return false;
        }
        self.selected = SelectedSet::from_value(&value);
        self.value = value;
        true
    }
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::uncontrolled(SelectionMode::Single, SelectionValue::Single(None))
    }
}

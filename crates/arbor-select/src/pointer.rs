#![forbid(unsafe_code)]

//! Pointer input mapped to selection operations.
//!
//! | Click | Multi-select | Single-select |
//! |-------|--------------|---------------|
//! | plain | select (replace) | select |
//! | Shift | extend to anchor | select |
//! | Ctrl / Super | toggle, keep others | select |
//!
//! With `checkbox_selection` enabled, clicks on item content only focus; the
//! selection changes through [`handle_checkbox_toggle`].

use arbor_core::event::{InputEvent, MouseButton, MouseEvent, MouseEventKind};
use arbor_core::id::ItemId;
use arbor_core::index::TreeIndex;

use crate::engine::SelectionEngine;
use crate::notify::SelectionChange;

/// Apply a click on the content of item `id`.
///
/// Only left-button presses select.
pub fn handle_click<T>(
    engine: &mut SelectionEngine,
    mouse: MouseEvent,
    id: &ItemId,
    index: &T,
) -> Option<SelectionChange>
where
    T: TreeIndex + ?Sized,
{
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    if engine.config().checkbox_selection {
        crate::trace!(%id, "content click with checkbox selection; focus only");
        return None;
    }

    let event = InputEvent::Mouse(mouse);
    let multi = engine.mode().is_multi();
    if multi && mouse.shift() {
        engine.extend_selection_to_anchor(&event, id, index)
    } else {
        engine.select(&event, id, multi && mouse.command(), index)
    }
}

/// Apply a change of item `id`'s checkbox to `checked`.
///
/// Multi-select keeps the other selected items; single-select replaces.
pub fn handle_checkbox_toggle<T>(
    engine: &mut SelectionEngine,
    mouse: MouseEvent,
    id: &ItemId,
    checked: bool,
    index: &T,
) -> Option<SelectionChange>
where
    T: TreeIndex + ?Sized,
{
    let event = InputEvent::Mouse(mouse);
    let multi = engine.mode().is_multi();
    if multi && mouse.shift() && checked {
        return engine.extend_selection_to_anchor(&event, id, index);
    }
    engine.set_item_selection(&event, id, checked, multi, index)
}

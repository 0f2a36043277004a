#![forbid(unsafe_code)]

//! Keyboard input mapped to focus moves, expansion requests and selection
//! operations.
//!
//! The navigator never mutates the tree: focus and expansion changes come
//! back as requests in a [`KeyOutcome`] for the host to apply. Selection
//! changes go straight through the [`SelectionEngine`].
//!
//! # Key map (focused item `F`)
//!
//! | Key | Effect |
//! |-----|--------|
//! | `Space` | multi + Shift: range from anchor to `F`; multi: toggle `F` keeping others; single: select `F` |
//! | `Enter` | expandable: toggle expansion; otherwise as `Space` without Shift |
//! | `Down` / `Up` | focus next / previous navigable item; multi + Shift: arrow-step selection |
//! | `Right` | collapsed: expand; expanded: focus first child (mirrored in RTL) |
//! | `Left` | expanded: collapse; otherwise focus parent (mirrored in RTL) |
//! | `Home` / `End` | focus first / last navigable item; multi + Ctrl + Shift: range to it |
//! | `Ctrl+A` | multi: select all navigable items |
//! | `*` | expand every sibling of `F` |
//! | printable | focus the next item whose label starts with the character |
//!
//! Disabled items are never toggled.

use arbor_core::event::{InputEvent, KeyCode, KeyEvent, KeyEventKind};
use arbor_core::id::ItemId;
use arbor_core::index::TreeIndex;

use crate::engine::SelectionEngine;
use crate::notify::SelectionChange;

/// Keyboard options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct KeyboardConfig {
    /// Right-to-left layout: `Left` and `Right` swap meaning.
    /// Default: false
    pub rtl: bool,
}

impl KeyboardConfig {
    /// Set right-to-left layout.
    #[must_use]
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }
}

/// A request for the host to expand or collapse an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRequest {
    /// Item to change.
    pub id: ItemId,
    /// Requested state.
    pub expanded: bool,
}

impl ExpansionRequest {
    fn expand(id: &ItemId) -> Self {
        Self {
            id: id.clone(),
            expanded: true,
        }
    }

    fn collapse(id: &ItemId) -> Self {
        Self {
            id: id.clone(),
            expanded: false,
        }
    }
}

/// What a key press did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The key was recognized (the host should stop default handling).
    pub handled: bool,
    /// Item that should receive focus.
    pub focus: Option<ItemId>,
    /// Expansion changes the host should apply, in order.
    pub expansion: Vec<ExpansionRequest>,
    /// Selection change committed by the engine.
    pub selection: Option<SelectionChange>,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    fn focus(id: &ItemId) -> Self {
        Self {
            handled: true,
            focus: Some(id.clone()),
            ..Self::default()
        }
    }

    fn with_selection(mut self, selection: Option<SelectionChange>) -> Self {
        self.selection = selection;
        self
    }
}

enum Horizontal {
    Open,
    Close,
}

/// Translates key presses on the focused item.
#[derive(Debug, Clone, Default)]
pub struct KeyboardNavigator {
    config: KeyboardConfig,
}

impl KeyboardNavigator {
    /// Navigator with `config`.
    #[must_use]
    pub fn new(config: KeyboardConfig) -> Self {
        Self { config }
    }

    /// The keyboard options.
    #[must_use]
    pub fn config(&self) -> KeyboardConfig {
        self.config
    }

    /// Handle `key` pressed while `focused` has focus.
    pub fn handle_key<T>(
        &self,
        engine: &mut SelectionEngine,
        focused: &ItemId,
        key: KeyEvent,
        index: &T,
    ) -> KeyOutcome
    where
        T: TreeIndex + ?Sized,
    {
        if key.kind == KeyEventKind::Release || !index.contains(focused) {
            return KeyOutcome::ignored();
        }

        let event = InputEvent::Key(key);
        let multi = engine.mode().is_multi();
        let can_toggle = !index.is_disabled(focused);

        match key.code {
            KeyCode::Char(' ') if !key.command() => {
                if !can_toggle {
                    return KeyOutcome::handled();
                }
                let change = if multi && key.shift() {
                    engine.extend_selection_to_anchor(&event, focused, index)
                } else {
                    engine.select(&event, focused, multi, index)
                };
                KeyOutcome::handled().with_selection(change)
            }

            KeyCode::Enter => {
                if index.is_expandable(focused) {
                    let request = if index.is_expanded(focused) {
                        ExpansionRequest::collapse(focused)
                    } else {
                        ExpansionRequest::expand(focused)
                    };
                    KeyOutcome {
                        expansion: vec![request],
                        ..KeyOutcome::handled()
                    }
                } else if can_toggle {
                    let change = engine.select(&event, focused, multi, index);
                    KeyOutcome::handled().with_selection(change)
                } else {
                    KeyOutcome::handled()
                }
            }

            KeyCode::Down => match index.next_navigable_item(focused) {
                Some(next) => self.arrow_step(engine, &event, key, focused, next, index),
                None => KeyOutcome::ignored(),
            },

            KeyCode::Up => match index.previous_navigable_item(focused) {
                Some(prev) => self.arrow_step(engine, &event, key, focused, prev, index),
                None => KeyOutcome::ignored(),
            },

            KeyCode::Right => self.horizontal(
                if self.config.rtl { Horizontal::Close } else { Horizontal::Open },
                focused,
                index,
            ),

            KeyCode::Left => self.horizontal(
                if self.config.rtl { Horizontal::Open } else { Horizontal::Close },
                focused,
                index,
            ),

            KeyCode::Home => {
                let Some(first) = index.first_navigable_item() else {
                    return KeyOutcome::ignored();
                };
                let mut outcome = KeyOutcome::focus(first);
                if multi && can_toggle && key.command() && key.shift() {
                    outcome.selection =
                        engine.select_range_from_root_to_item(&event, focused, index);
                }
                outcome
            }

            KeyCode::End => {
                let Some(last) = index.last_navigable_item() else {
                    return KeyOutcome::ignored();
                };
                let mut outcome = KeyOutcome::focus(last);
                if multi && can_toggle && key.command() && key.shift() {
                    outcome.selection =
                        engine.select_range_from_item_to_last(&event, focused, index);
                }
                outcome
            }

            KeyCode::Char(_) if key.command() && key.is_char_ignore_case('a') => {
                if !multi {
                    return KeyOutcome::ignored();
                }
                let change = engine.select_all_navigable(&event, index);
                KeyOutcome::handled().with_selection(change)
            }

            KeyCode::Char('*') if !key.command() && !key.alt() => KeyOutcome {
                expansion: expand_siblings(focused, index),
                ..KeyOutcome::handled()
            },

            KeyCode::Char(c) if !key.command() && !key.alt() && !c.is_control() => {
                match type_ahead(focused, c, index) {
                    Some(target) => KeyOutcome::focus(&target),
                    None => KeyOutcome::ignored(),
                }
            }

            _ => KeyOutcome::ignored(),
        }
    }

    fn arrow_step<T>(
        &self,
        engine: &mut SelectionEngine,
        event: &InputEvent,
        key: KeyEvent,
        focused: &ItemId,
        next: &ItemId,
        index: &T,
    ) -> KeyOutcome
    where
        T: TreeIndex + ?Sized,
    {
        let outcome = KeyOutcome::focus(next);
        if engine.mode().is_multi() && key.shift() && !index.is_disabled(next) {
            let change = engine.extend_by_arrow_step(event, focused, next, index);
            return outcome.with_selection(change);
        }
        outcome
    }

    fn horizontal<T>(&self, direction: Horizontal, focused: &ItemId, index: &T) -> KeyOutcome
    where
        T: TreeIndex + ?Sized,
    {
        let expandable = index.is_expandable(focused);
        let expanded = expandable && index.is_expanded(focused);
        match direction {
            Horizontal::Open if expanded => match index.next_navigable_item(focused) {
                Some(child) if index.parent_of(child) == Some(focused) => {
                    KeyOutcome::focus(child)
                }
                _ => KeyOutcome::handled(),
            },
            Horizontal::Open if expandable => KeyOutcome {
                expansion: vec![ExpansionRequest::expand(focused)],
                ..KeyOutcome::handled()
            },
            Horizontal::Open => KeyOutcome::ignored(),
            Horizontal::Close if expanded => KeyOutcome {
                expansion: vec![ExpansionRequest::collapse(focused)],
                ..KeyOutcome::handled()
            },
            Horizontal::Close => match index.parent_of(focused) {
                Some(parent) => KeyOutcome::focus(parent),
                None => KeyOutcome::ignored(),
            },
        }
    }
}

/// Expansion requests for every collapsed, expandable sibling of `id`
/// (including `id` itself).
fn expand_siblings<T>(id: &ItemId, index: &T) -> Vec<ExpansionRequest>
where
    T: TreeIndex + ?Sized,
{
    index
        .children_of(index.parent_of(id))
        .iter()
        .filter(|sibling| index.is_expandable(sibling) && !index.is_expanded(sibling))
        .map(ExpansionRequest::expand)
        .collect()
}

/// Next navigable item after `from` (wrapping) whose label starts with `c`.
fn type_ahead<T>(from: &ItemId, c: char, index: &T) -> Option<ItemId>
where
    T: TreeIndex + ?Sized,
{
    let items = index.all_navigable_items();
    let start = items.iter().position(|id| id == from).map_or(0, |p| p + 1);
    let needle: String = c.to_lowercase().collect();
    let matches = |id: &ItemId| {
        let label = index.label_of(id).unwrap_or(id.as_str());
        label.to_lowercase().starts_with(&needle)
    };
    items[start..]
        .iter()
        .chain(items[..start].iter())
        .find(|id| matches(*id))
        .cloned()
}

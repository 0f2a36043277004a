//! End-to-end selection scenarios through the public engine surface.
//!
//! Each test drives a [`SelectionEngine`] the way a host tree widget would:
//! build an [`ItemTree`], route clicks and key presses through the pointer
//! and keyboard mappers, and observe values and notifications.

use std::sync::{Arc, Mutex};

use arbor_core::event::{InputEvent, KeyCode, KeyEvent, Modifiers, MouseEvent};
use arbor_core::id::{ItemId, ids};
use arbor_core::tree::{ItemTree, TreeItem};
use arbor_select::{
    KeyboardNavigator, SelectionConfig, SelectionEngine, SelectionListeners, SelectionValue,
    pointer,
};

// ── Helpers ─────────────────────────────────────────────────────────────

const EV: InputEvent = InputEvent::Programmatic;

fn id(s: &str) -> ItemId {
    ItemId::from(s)
}

fn flat(labels: &[&str]) -> ItemTree {
    ItemTree::from_items(labels.iter().map(|l| TreeItem::new(*l)).collect()).unwrap()
}

fn nested() -> ItemTree {
    // 1
    // └── 1.1
    //     └── 1.1.1
    // 2
    ItemTree::from_items(vec![
        TreeItem::new("1").child(TreeItem::new("1.1").child(TreeItem::new("1.1.1"))),
        TreeItem::new("2"),
    ])
    .unwrap()
}

fn shift_click() -> MouseEvent {
    MouseEvent::left_click().with_modifiers(Modifiers::SHIFT)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Note {
    Toggle(ItemId, bool),
    Change(SelectionValue),
}

fn recording_engine(config: SelectionConfig) -> (SelectionEngine, Arc<Mutex<Vec<Note>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let toggles = Arc::clone(&log);
    let changes = Arc::clone(&log);
    let engine = SelectionEngine::new(config).with_listeners(
        SelectionListeners::new()
            .on_item_selection_toggle(move |_, id, selected| {
                toggles.lock().unwrap().push(Note::Toggle(id.clone(), selected));
            })
            .on_selected_items_change(move |_, value| {
                changes.lock().unwrap().push(Note::Change(value.clone()));
            }),
    );
    (engine, log)
}

// ═════════════════════════════════════════════════════════════════════════
// Scenarios
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn shift_click_range_does_not_include_ancestors() {
    let tree = nested();
    let mut engine = SelectionEngine::new(SelectionConfig::multi());
    pointer::handle_click(&mut engine, MouseEvent::left_click(), &id("1.1.1"), &tree);
    pointer::handle_click(&mut engine, shift_click(), &id("2"), &tree);
    assert_eq!(engine.selected_items().to_vec(), ids(["1.1.1", "2"]));
}

#[test]
fn single_select_replaces() {
    let tree = flat(&["one", "two", "three"]);
    let mut engine = SelectionEngine::new(SelectionConfig::new());
    engine.select(&EV, &id("one"), false, &tree);
    engine.select(&EV, &id("two"), false, &tree);
    assert_eq!(engine.selected_items(), &SelectionValue::single("two"));
    assert!(!engine.is_selected(&id("one")));
}

#[test]
fn selection_tracks_ids_after_reorder() {
    let mut tree = flat(&["1", "2", "3"]);
    tree.reorder_children(None, ids(["1", "3", "2"])).unwrap();
    let mut engine = SelectionEngine::new(SelectionConfig::multi());
    pointer::handle_click(&mut engine, MouseEvent::left_click(), &id("1"), &tree);
    pointer::handle_click(&mut engine, shift_click(), &id("3"), &tree);
    assert_eq!(engine.selected_items().to_vec(), ids(["1", "3"]));
}

#[test]
fn range_excludes_disabled_middle_item() {
    let mut tree = flat(&["1", "2", "3"]);
    tree.set_disabled(&id("2"), true).unwrap();
    let mut engine = SelectionEngine::new(SelectionConfig::multi());
    engine.select_range(&EV, &id("1"), &id("3"), &tree);
    assert_eq!(engine.selected_items().to_vec(), ids(["1", "3"]));
}

#[test]
fn arrow_step_retreat() {
    let tree = flat(&["1", "2", "3", "4"]);
    let mut engine = SelectionEngine::new(SelectionConfig::multi());
    engine.select(&EV, &id("1"), false, &tree);
    engine.extend_by_arrow_step(&EV, &id("1"), &id("2"), &tree);
    engine.extend_by_arrow_step(&EV, &id("2"), &id("3"), &tree);
    assert_eq!(engine.last_range().len(), 3);

    engine.extend_by_arrow_step(&EV, &id("3"), &id("2"), &tree);
    assert_eq!(engine.selected_items().to_vec(), ids(["1", "2"]));
    assert!(!engine.last_range().contains(&id("3")));
    assert!(engine.last_range().contains(&id("1")));
    assert!(engine.last_range().contains(&id("2")));
}

#[test]
fn keyboard_shift_down_then_up_matches_arrow_step() {
    let tree = flat(&["1", "2", "3", "4"]);
    let nav = KeyboardNavigator::default();
    let mut engine = SelectionEngine::new(SelectionConfig::multi());
    let down = KeyEvent::new(KeyCode::Down).with_modifiers(Modifiers::SHIFT);
    let up = KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::SHIFT);

    engine.select(&EV, &id("1"), false, &tree);
    let focus = nav.handle_key(&mut engine, &id("1"), down, &tree).focus.unwrap();
    let focus = nav.handle_key(&mut engine, &focus, down, &tree).focus.unwrap();
    assert_eq!(focus, id("3"));
    assert_eq!(engine.selected_items().to_vec(), ids(["1", "2", "3"]));

    let focus = nav.handle_key(&mut engine, &focus, up, &tree).focus.unwrap();
    assert_eq!(focus, id("2"));
    assert_eq!(engine.selected_items().to_vec(), ids(["1", "2"]));
}

// ═════════════════════════════════════════════════════════════════════════
// Properties
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn plain_select_is_idempotent() {
    let tree = flat(&["a", "b"]);
    for config in [SelectionConfig::new(), SelectionConfig::multi()] {
        let mut engine = SelectionEngine::new(config);
        engine.select(&EV, &id("a"), false, &tree);
        let first = engine.selected_items().clone();
        engine.select(&EV, &id("a"), false, &tree);
        assert_eq!(engine.selected_items(), &first);
        assert_eq!(first.to_vec(), ids(["a"]));
    }
}

#[test]
fn range_is_symmetric() {
    let tree = nested();
    let mut forward = SelectionEngine::new(SelectionConfig::multi());
    let mut backward = SelectionEngine::new(SelectionConfig::multi());
    forward.select_range(&EV, &id("1.1"), &id("2"), &tree);
    backward.select_range(&EV, &id("2"), &id("1.1"), &tree);
    assert_eq!(forward.selected_items(), backward.selected_items());
    assert_eq!(forward.last_range(), backward.last_range());
}

#[test]
fn second_range_replaces_first() {
    let tree = flat(&["1", "2", "3", "4", "5", "6"]);
    let mut engine = SelectionEngine::new(
        SelectionConfig::multi().with_default_selected_items(SelectionValue::multi(["6"])),
    );
    engine.select_range(&EV, &id("2"), &id("5"), &tree);
    engine.select_range(&EV, &id("2"), &id("3"), &tree);
    assert_eq!(engine.selected_items().to_vec(), ids(["6", "2", "3"]));
    assert!(!engine.is_selected(&id("4")));
    assert!(!engine.is_selected(&id("5")));
}

#[test]
fn select_all_is_noop_in_single_mode_or_when_disabled() {
    let tree = flat(&["1", "2"]);
    let mut single = SelectionEngine::new(SelectionConfig::new());
    assert!(single.select_all_navigable(&EV, &tree).is_none());
    assert!(single.selected_items().is_empty());

    let mut disabled =
        SelectionEngine::new(SelectionConfig::multi().with_disable_selection(true));
    assert!(disabled.select_all_navigable(&EV, &tree).is_none());
    assert!(disabled.selected_items().is_empty());

    let mut multi = SelectionEngine::new(SelectionConfig::multi());
    multi.select_all_navigable(&EV, &tree);
    assert_eq!(multi.selected_items().to_vec(), ids(["1", "2"]));
}

#[test]
fn range_selection_leaves_anchor() {
    let tree = flat(&["1", "2", "3"]);
    let mut engine = SelectionEngine::new(SelectionConfig::multi());
    engine.select(&EV, &id("2"), false, &tree);
    engine.extend_selection_to_anchor(&EV, &id("3"), &tree);
    engine.extend_selection_to_anchor(&EV, &id("1"), &tree);
    assert_eq!(engine.anchor(), Some(&id("2")));
    assert_eq!(engine.selected_items().to_vec(), ids(["1", "2"]));
}

#[test]
fn collapsed_items_are_not_in_ranges() {
    let mut tree = nested();
    tree.set_expanded(&id("1.1"), false).unwrap();
    let mut engine = SelectionEngine::new(SelectionConfig::multi());
    engine.select_range(&EV, &id("1"), &id("2"), &tree);
    assert_eq!(engine.selected_items().to_vec(), ids(["1", "1.1", "2"]));
}

// ═════════════════════════════════════════════════════════════════════════
// Notifications
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn multi_notifications_add_then_remove_then_aggregate() {
    let tree = flat(&["1", "2", "3"]);
    let (mut engine, log) = recording_engine(SelectionConfig::multi());
    engine.select(&EV, &id("1"), false, &tree);
    log.lock().unwrap().clear();

    engine.select_range(&EV, &id("2"), &id("3"), &tree);
    engine.select(&EV, &id("3"), false, &tree);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            Note::Toggle(id("2"), true),
            Note::Toggle(id("3"), true),
            Note::Change(SelectionValue::multi(["1", "2", "3"])),
            Note::Toggle(id("1"), false),
            Note::Toggle(id("2"), false),
            Note::Change(SelectionValue::multi(["3"])),
        ]
    );
}

#[test]
fn single_notifications_remove_then_add() {
    let tree = flat(&["1", "2"]);
    let (mut engine, log) = recording_engine(SelectionConfig::new());
    engine.select(&EV, &id("1"), false, &tree);
    engine.select(&EV, &id("2"), false, &tree);
    engine.select(&EV, &id("2"), false, &tree);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            Note::Toggle(id("1"), true),
            Note::Change(SelectionValue::single("1")),
            Note::Toggle(id("1"), false),
            Note::Toggle(id("2"), true),
            Note::Change(SelectionValue::single("2")),
            Note::Change(SelectionValue::single("2")),
        ]
    );
}

#[test]
fn listener_may_restructure_host_tree() {
    let tree = Arc::new(Mutex::new(flat(&["1", "2", "3"])));
    let host = Arc::clone(&tree);
    let mut engine = SelectionEngine::new(SelectionConfig::multi()).with_listeners(
        SelectionListeners::new().on_selected_items_change(move |_, _| {
            // The host reacts to the change by removing an item.
            if let Ok(mut tree) = host.try_lock() {
                let _ = tree.remove(&id("3"));
            }
        }),
    );

    // The engine holds no borrow across notification, so the host may mutate
    // its tree between operations.
    let snapshot = tree.lock().unwrap().clone();
    let change = engine.select_range(&EV, &id("1"), &id("3"), &snapshot).unwrap();
    assert_eq!(change.value.to_vec(), ids(["1", "2", "3"]));
    assert_eq!(tree.lock().unwrap().len(), 2);

    let current = tree.lock().unwrap().clone();
    engine.select(&EV, &id("3"), true, &current);
    assert_eq!(engine.selected_items().to_vec(), ids(["1", "2", "3"]));
}

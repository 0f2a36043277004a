//! Property-based invariant tests for the selection engine.
//!
//! These tests verify invariants that must hold for **any** forest and any
//! sequence of operations:
//!
//! 1. Plain selection is idempotent.
//! 2. Range selection is symmetric in its endpoints.
//! 3. A new range replaces the previous range's contribution.
//! 4. `is_selected` agrees with the value, and multi values hold no
//!    duplicates, after arbitrary operation sequences.
//! 5. Range operations never move the anchor; disabled items are never added.

use std::collections::HashSet;

use arbor_core::event::InputEvent;
use arbor_core::id::ItemId;
use arbor_core::index::TreeIndex;
use arbor_core::range::range_between;
use arbor_core::tree::{ItemTree, TreeItem};
use arbor_select::{SelectionConfig, SelectionEngine, SelectionValue};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const EV: InputEvent = InputEvent::Programmatic;

fn forest_strategy() -> impl Strategy<Value = Vec<Option<usize>>> {
    (1usize..30).prop_flat_map(|n| {
        (0..n)
            .map(|i| {
                if i == 0 {
                    Just(None).boxed()
                } else {
                    prop_oneof![
                        1 => Just(None),
                        4 => (0..i).prop_map(Some),
                    ]
                    .boxed()
                }
            })
            .collect::<Vec<_>>()
    })
}

fn name(i: usize) -> ItemId {
    ItemId::from(format!("n{i}"))
}

fn build(parents: &[Option<usize>]) -> ItemTree {
    let mut tree = ItemTree::new();
    for (i, parent) in parents.iter().enumerate() {
        let parent = parent.map(name);
        tree.insert(parent.as_ref(), None, TreeItem::new(name(i)))
            .expect("generated forest is valid");
    }
    tree
}

fn as_set(value: &SelectionValue) -> HashSet<ItemId> {
    value.iter().cloned().collect()
}

#[derive(Debug, Clone)]
enum Op {
    Select(usize, bool),
    Range(usize, usize),
    Extend(usize),
    ToStart(usize),
    ToEnd(usize),
    All,
    Arrow(usize, usize),
    Set(usize, bool, bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..30, any::<bool>()).prop_map(|(i, additive)| Op::Select(i, additive)),
        (0usize..30, 0usize..30).prop_map(|(a, b)| Op::Range(a, b)),
        (0usize..30).prop_map(Op::Extend),
        (0usize..30).prop_map(Op::ToStart),
        (0usize..30).prop_map(Op::ToEnd),
        Just(Op::All),
        (0usize..30, 0usize..30).prop_map(|(a, b)| Op::Arrow(a, b)),
        (0usize..30, any::<bool>(), any::<bool>()).prop_map(|(i, s, k)| Op::Set(i, s, k)),
    ]
}

fn run(engine: &mut SelectionEngine, op: &Op, n: usize, tree: &ItemTree) {
    match *op {
        Op::Select(i, additive) => {
            engine.select(&EV, &name(i % n), additive, tree);
        }
        Op::Range(a, b) => {
            engine.select_range(&EV, &name(a % n), &name(b % n), tree);
        }
        Op::Extend(i) => {
            engine.extend_selection_to_anchor(&EV, &name(i % n), tree);
        }
        Op::ToStart(i) => {
            engine.select_range_from_root_to_item(&EV, &name(i % n), tree);
        }
        Op::ToEnd(i) => {
            engine.select_range_from_item_to_last(&EV, &name(i % n), tree);
        }
        Op::All => {
            engine.select_all_navigable(&EV, tree);
        }
        Op::Arrow(a, b) => {
            engine.extend_by_arrow_step(&EV, &name(a % n), &name(b % n), tree);
        }
        Op::Set(i, selected, keep) => {
            engine.set_item_selection(&EV, &name(i % n), selected, keep, tree);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_select_is_idempotent(
        parents in forest_strategy(),
        i in 0usize..30,
        multi in any::<bool>(),
    ) {
        let tree = build(&parents);
        let target = name(i % parents.len());
        let mut engine = SelectionEngine::new(SelectionConfig::new().with_multi_select(multi));
        engine.select(&EV, &target, false, &tree);
        let first = engine.selected_items().clone();
        engine.select(&EV, &target, false, &tree);
        prop_assert_eq!(engine.selected_items(), &first);
        prop_assert_eq!(first.to_vec(), vec![target]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Range symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn range_is_symmetric(
        parents in forest_strategy(),
        a in 0usize..30,
        b in 0usize..30,
        collapsed in proptest::collection::vec(0usize..30, 0..4),
    ) {
        let mut tree = build(&parents);
        let n = parents.len();
        for c in &collapsed {
            tree.set_expanded(&name(c % n), false).unwrap();
        }
        let (a, b) = (name(a % n), name(b % n));
        let mut forward = SelectionEngine::new(SelectionConfig::multi());
        let mut backward = SelectionEngine::new(SelectionConfig::multi());
        forward.select_range(&EV, &a, &b, &tree);
        backward.select_range(&EV, &b, &a, &tree);
        prop_assert_eq!(forward.selected_items(), backward.selected_items());
        prop_assert_eq!(forward.last_range(), backward.last_range());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Range replacement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn second_range_replaces_first(
        parents in forest_strategy(),
        prior in proptest::collection::vec(0usize..30, 0..5),
        a in 0usize..30,
        b in 0usize..30,
        c in 0usize..30,
    ) {
        let tree = build(&parents);
        let n = parents.len();
        let prior = SelectionValue::from_items(
            arbor_select::SelectionMode::Multi,
            prior.iter().map(|p| name(p % n)),
        );
        let (a, b, c) = (name(a % n), name(b % n), name(c % n));

        let mut engine = SelectionEngine::new(
            SelectionConfig::multi().with_default_selected_items(prior.clone()),
        );
        engine.select_range(&EV, &a, &b, &tree);
        engine.select_range(&EV, &a, &c, &tree);

        let first: HashSet<ItemId> = range_between(&a, &b, &tree).into_iter().collect();
        let second: HashSet<ItemId> = range_between(&a, &c, &tree).into_iter().collect();
        let expected: HashSet<ItemId> = as_set(&prior)
            .difference(&first)
            .cloned()
            .chain(second.iter().cloned())
            .collect();
        prop_assert_eq!(as_set(engine.selected_items()), expected);

        // With a prior selection disjoint from the first range, the result is
        // exactly prior ∪ [a, c].
        if as_set(&prior).is_disjoint(&first) {
            let union: HashSet<ItemId> = as_set(&prior).union(&second).cloned().collect();
            prop_assert_eq!(as_set(engine.selected_items()), union);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Arbitrary operation sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn value_and_lookup_stay_consistent(
        parents in forest_strategy(),
        disabled in proptest::collection::vec(0usize..30, 0..4),
        ops in proptest::collection::vec(op_strategy(), 0..25),
        multi in any::<bool>(),
    ) {
        let mut tree = build(&parents);
        let n = parents.len();
        for d in &disabled {
            tree.set_disabled(&name(d % n), true).unwrap();
        }
        let mut engine = SelectionEngine::new(SelectionConfig::new().with_multi_select(multi));

        for op in &ops {
            let anchor_before = engine.anchor().cloned();
            let before = as_set(engine.selected_items());
            run(&mut engine, op, n, &tree);

            let value = engine.selected_items();
            prop_assert_eq!(value.mode().is_multi(), multi);
            prop_assert_eq!(as_set(value).len(), value.len(), "duplicate ids in {:?}", value);
            for i in 0..n {
                let id = name(i);
                prop_assert_eq!(engine.is_selected(&id), value.contains(&id));
            }
            for id in value.iter() {
                if !before.contains(id) {
                    prop_assert!(!tree.is_disabled(id), "disabled {} was selected", id);
                }
            }
            if matches!(op, Op::Range(..) | Op::Extend(_) | Op::ToStart(_) | Op::ToEnd(_) | Op::All | Op::Arrow(..)) {
                prop_assert_eq!(engine.anchor().cloned(), anchor_before);
            }
        }
    }
}

//! Property-based tests for parent/child selection exclusivity

use flexlist_core::{ExpandableAdapter, RowKind};
use proptest::prelude::*;

use super::{adapter_with_expansions, arb_child_counts, arb_raw_positions, build_tree};

// ========== Strategies ==========

#[derive(Debug, Clone, Copy)]
enum SelectionOp {
    Toggle(usize),
    Select(usize),
    SelectAll,
    Clear,
    Expand(usize),
    Collapse(usize),
    Remove(usize),
    Restore,
}

fn arb_selection_op() -> impl Strategy<Value = SelectionOp> {
    prop_oneof![
        4 => (0usize..64).prop_map(SelectionOp::Toggle),
        2 => (0usize..64).prop_map(SelectionOp::Select),
        1 => Just(SelectionOp::SelectAll),
        1 => Just(SelectionOp::Clear),
        2 => (0usize..64).prop_map(SelectionOp::Expand),
        2 => (0usize..64).prop_map(SelectionOp::Collapse),
        1 => (0usize..64).prop_map(SelectionOp::Remove),
        1 => Just(SelectionOp::Restore),
    ]
}

fn apply(adapter: &mut ExpandableAdapter<String>, op: SelectionOp) {
    if adapter.is_empty() {
        if matches!(op, SelectionOp::Restore) {
            adapter.restore_all().unwrap();
        }
        return;
    }
    let len = adapter.len();
    match op {
        SelectionOp::Toggle(raw) => {
            adapter.toggle(raw % len).unwrap();
        }
        SelectionOp::Select(raw) => {
            adapter.select(raw % len).unwrap();
        }
        SelectionOp::SelectAll => {
            adapter.select_all(None);
        }
        SelectionOp::Clear => {
            adapter.clear_selection();
        }
        SelectionOp::Expand(raw) => {
            adapter.expand(raw % len).unwrap();
        }
        SelectionOp::Collapse(raw) => {
            adapter.collapse(raw % len).unwrap();
        }
        SelectionOp::Remove(raw) => {
            adapter.remove(raw % len, false).unwrap();
        }
        SelectionOp::Restore => {
            adapter.restore_all().unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Parent and child selections never coexist, and every selected
    /// position names a row of the recorded kind.
    #[test]
    fn prop_selection_is_exclusive(
        counts in arb_child_counts(),
        ops in prop::collection::vec(arb_selection_op(), 0..32),
    ) {
        let mut adapter = ExpandableAdapter::new(build_tree(&counts));
        for op in ops {
            apply(&mut adapter, op);
            prop_assert!(!(adapter.is_any_parent_selected() && adapter.is_any_child_selected()));
            for pos in adapter.selected_positions() {
                prop_assert!(pos < adapter.len());
            }
            let kinds: Vec<RowKind> = adapter
                .selected_positions()
                .into_iter()
                .map(|pos| adapter.row_kind(pos).unwrap())
                .collect();
            prop_assert!(kinds.windows(2).all(|w| w[0] == w[1]));
        }
    }

    /// With a parent already selected, `select_all` selects every parent row
    /// and no child row.
    #[test]
    fn prop_select_all_with_parent_selected(
        counts in arb_child_counts(),
        expansions in arb_raw_positions(6),
        pick in 0usize..64,
    ) {
        let mut adapter = adapter_with_expansions(&counts, &expansions);
        let parents: Vec<usize> = (0..adapter.len())
            .filter(|pos| adapter.row_kind(*pos).unwrap() == RowKind::Expandable)
            .collect();
        let first = parents[pick % parents.len()];
        prop_assert!(adapter.toggle(first).unwrap());

        adapter.select_all(None);
        prop_assert_eq!(adapter.selected_positions(), parents);
        prop_assert!(!adapter.is_any_child_selected());
    }
}

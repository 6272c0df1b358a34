//! Property-based tests for the expand/collapse state machine
//!
//! Covers the flat length invariant, expand/collapse round trips and the
//! no-op cases of `expand`.

use flexlist_core::{ChangeEvent, ExpandableAdapter, RecordingListener};
use proptest::prelude::*;

use super::{
    adapter_with_expansions, arb_child_counts, arb_raw_positions, build_tree, labels,
    spliced_children,
};

// ========== Strategies ==========

#[derive(Debug, Clone, Copy)]
enum Toggle {
    Expand(usize),
    Collapse(usize),
    ExpandAll,
    CollapseAll,
}

fn arb_toggle() -> impl Strategy<Value = Toggle> {
    prop_oneof![
        4 => (0usize..64).prop_map(Toggle::Expand),
        4 => (0usize..64).prop_map(Toggle::Collapse),
        1 => Just(Toggle::ExpandAll),
        1 => Just(Toggle::CollapseAll),
    ]
}

fn arb_toggles() -> impl Strategy<Value = Vec<Toggle>> {
    prop::collection::vec(arb_toggle(), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The flat length always equals the parent count plus the children of
    /// every expanded parent.
    #[test]
    fn prop_flat_length_matches_expansions(
        counts in arb_child_counts(),
        toggles in arb_toggles(),
    ) {
        let mut adapter = ExpandableAdapter::new(build_tree(&counts));
        for toggle in toggles {
            match toggle {
                Toggle::Expand(raw) => {
                    adapter.expand(raw % adapter.len()).unwrap();
                }
                Toggle::Collapse(raw) => {
                    adapter.collapse(raw % adapter.len()).unwrap();
                }
                Toggle::ExpandAll => {
                    adapter.expand_all().unwrap();
                }
                Toggle::CollapseAll => {
                    adapter.collapse_all().unwrap();
                }
            }
            prop_assert_eq!(adapter.len(), counts.len() + spliced_children(&adapter));
            prop_assert_eq!(adapter.count_top_level(), counts.len());
            prop_assert!(adapter.validate().is_ok());
        }
    }

    /// Expanding and immediately collapsing restores the exact row order.
    #[test]
    fn prop_expand_collapse_round_trip(
        counts in arb_child_counts(),
        expansions in arb_raw_positions(6),
        target in 0usize..64,
    ) {
        let mut adapter = adapter_with_expansions(&counts, &expansions);
        let before = adapter.rows().to_vec();
        let pos = target % adapter.len();

        let inserted = adapter.expand(pos).unwrap();
        if inserted > 0 {
            prop_assert_eq!(adapter.collapse(pos).unwrap(), inserted);
        }
        prop_assert_eq!(adapter.rows(), before.as_slice());
        prop_assert!(adapter.validate().is_ok());
    }

    /// `expand` on a child, an expanded parent or a childless parent returns
    /// zero and emits nothing.
    #[test]
    fn prop_expand_noop_is_silent(
        counts in arb_child_counts(),
        expansions in arb_raw_positions(6),
        target in 0usize..64,
    ) {
        let mut adapter = adapter_with_expansions(&counts, &expansions);
        let pos = target % adapter.len();
        let node = adapter.node(pos).unwrap();
        let noop = !node.is_parent() || node.is_expanded() || !node.has_children();
        prop_assume!(noop);

        let recorder = RecordingListener::new();
        adapter.set_listener(recorder.clone());
        let before = labels(&adapter);
        prop_assert_eq!(adapter.expand(pos).unwrap(), 0);
        prop_assert!(recorder.events().is_empty());
        prop_assert_eq!(labels(&adapter), before);
    }

    /// Expanding a parent emits exactly one insertion right after it.
    #[test]
    fn prop_expand_emits_single_insertion(
        counts in arb_child_counts(),
        expansions in arb_raw_positions(6),
        target in 0usize..64,
    ) {
        let mut adapter = adapter_with_expansions(&counts, &expansions);
        let recorder = RecordingListener::new();
        adapter.set_listener(recorder.clone());
        let pos = target % adapter.len();

        let inserted = adapter.expand(pos).unwrap();
        if inserted == 0 {
            prop_assert!(recorder.events().is_empty());
        } else {
            prop_assert_eq!(
                recorder.events(),
                vec![ChangeEvent::ItemsInserted { start: pos + 1, count: inserted }]
            );
        }
    }
}

//! Property-based tests for removal and undo
//!
//! Undo must put back the exact flat sequence and expansion index, and the
//! selection minus the rows the removal took with it.

use std::collections::BTreeSet;

use flexlist_core::{ChangeEvent, ExpandableAdapter, ParentEntry, RecordingListener};
use proptest::prelude::*;

use super::{
    adapter_with_expansions, arb_child_counts, arb_raw_positions, build_tree, labels, tree_shape,
};

// ========== Strategies ==========

fn arb_batch() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..64, 1..6)
}

/// Structural changes made while removals are pending
#[derive(Debug, Clone, Copy)]
enum EditOp {
    Remove(usize),
    Expand(usize),
    Collapse(usize),
    AddParent(usize),
}

fn arb_edit_op() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        4 => (0usize..64).prop_map(EditOp::Remove),
        2 => (0usize..64).prop_map(EditOp::Expand),
        2 => (0usize..64).prop_map(EditOp::Collapse),
        1 => (0usize..64).prop_map(EditOp::AddParent),
    ]
}

fn apply_edit(adapter: &mut ExpandableAdapter<String>, op: EditOp, added: &mut usize) {
    let len = adapter.len();
    match op {
        EditOp::AddParent(raw) => {
            adapter
                .add_parent(raw % (len + 1), ParentEntry::new(format!("N{added}")))
                .unwrap();
            *added += 1;
        }
        _ if len == 0 => {}
        EditOp::Remove(raw) => {
            adapter.remove(raw % len, false).unwrap();
        }
        EditOp::Expand(raw) => {
            adapter.expand(raw % len).unwrap();
        }
        EditOp::Collapse(raw) => {
            adapter.collapse(raw % len).unwrap();
        }
    }
}

/// Rows that disappear when the row at `pos` is removed: the row itself and,
/// for an expanded parent, its visible children.
fn rows_taken_by(adapter: &ExpandableAdapter<String>, pos: usize) -> BTreeSet<usize> {
    let mut taken = BTreeSet::from([pos]);
    if adapter.is_expanded(pos) {
        let count = adapter.children_at(pos).unwrap().len();
        taken.extend(pos + 1..=pos + count);
    }
    taken
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A single removal followed by `restore_all` is a no-op on rows,
    /// expansions and the surviving selection.
    #[test]
    fn prop_remove_then_restore_is_identity(
        counts in arb_child_counts(),
        expansions in arb_raw_positions(6),
        toggles in arb_raw_positions(6),
        target in 0usize..64,
    ) {
        let mut adapter = adapter_with_expansions(&counts, &expansions);
        for raw in toggles {
            adapter.toggle(raw % adapter.len()).unwrap();
        }
        let pos = target % adapter.len();
        let taken = rows_taken_by(&adapter, pos);
        let rows = adapter.rows().to_vec();
        let expanded = adapter.expanded_positions();
        let surviving: Vec<usize> = adapter
            .selected_positions()
            .into_iter()
            .filter(|p| !taken.contains(p))
            .collect();

        prop_assert!(adapter.remove(pos, false).unwrap());
        prop_assert!(adapter.has_pending_removals());
        prop_assert!(adapter.validate().is_ok());

        prop_assert_eq!(adapter.restore_all().unwrap(), 1);
        prop_assert_eq!(adapter.rows(), rows.as_slice());
        prop_assert_eq!(adapter.expanded_positions(), expanded);
        prop_assert_eq!(adapter.selected_positions(), surviving);
        prop_assert!(!adapter.has_pending_removals());
        prop_assert!(adapter.validate().is_ok());
    }

    /// Any batch removal is undone exactly by `restore_all`.
    #[test]
    fn prop_batch_remove_then_restore_is_identity(
        counts in arb_child_counts(),
        expansions in arb_raw_positions(6),
        batch in arb_batch(),
    ) {
        let mut adapter = adapter_with_expansions(&counts, &expansions);
        let positions: Vec<usize> = batch.iter().map(|raw| raw % adapter.len()).collect();
        let unique: BTreeSet<usize> = positions.iter().copied().collect();
        let before = labels(&adapter);
        let expanded = adapter.expanded_positions();

        let removed = adapter.remove_batch(&positions, false).unwrap();
        prop_assert_eq!(removed, unique.len());
        prop_assert!(!adapter.is_multi_remove());
        prop_assert!(adapter.validate().is_ok());

        adapter.restore_all().unwrap();
        prop_assert_eq!(labels(&adapter), before);
        prop_assert_eq!(adapter.expanded_positions(), expanded);
        prop_assert!(adapter.validate().is_ok());
    }

    /// Every notification of a batch carries the multi-remove flag, and only
    /// removals are reported.
    #[test]
    fn prop_batch_notifications_are_flagged(
        counts in arb_child_counts(),
        expansions in arb_raw_positions(6),
        batch in arb_batch(),
    ) {
        let mut adapter = adapter_with_expansions(&counts, &expansions);
        let recorder = RecordingListener::new();
        adapter.set_listener(recorder.clone());
        let positions: Vec<usize> = batch.iter().map(|raw| raw % adapter.len()).collect();
        let before = adapter.len();

        adapter.remove_batch(&positions, false).unwrap();
        let notifications = recorder.notifications();
        prop_assert!(notifications.iter().all(|n| n.multi_remove));
        let reported: usize = notifications
            .iter()
            .map(|n| match n.event {
                ChangeEvent::ItemsRemoved { count, .. } => count,
                _ => 0,
            })
            .sum();
        prop_assert_eq!(before - adapter.len(), reported);
    }

    /// Any number of single removals is undone exactly by `restore_all`,
    /// whatever order the positions were removed in.
    #[test]
    fn prop_single_removals_restore_in_order(
        counts in arb_child_counts(),
        expansions in arb_raw_positions(6),
        targets in prop::collection::vec(0usize..64, 1..8),
    ) {
        let mut adapter = adapter_with_expansions(&counts, &expansions);
        let before = labels(&adapter);
        let expanded = adapter.expanded_positions();

        let mut removed = 0;
        for raw in targets {
            if adapter.is_empty() {
                break;
            }
            let pos = raw % adapter.len();
            if adapter.remove(pos, false).unwrap() {
                removed += 1;
            }
        }
        prop_assert!(adapter.validate().is_ok());

        prop_assert_eq!(adapter.restore_all().unwrap(), removed);
        prop_assert_eq!(labels(&adapter), before);
        prop_assert_eq!(adapter.expanded_positions(), expanded);
        prop_assert!(adapter.validate().is_ok());
    }

    /// Removals interleaved with expansions, collapses and new parents are
    /// undone without disturbing the original parents' order or any child
    /// list. Parents added meanwhile stay where they are.
    #[test]
    fn prop_restore_after_interleaved_changes(
        counts in arb_child_counts(),
        ops in prop::collection::vec(arb_edit_op(), 1..24),
    ) {
        let mut adapter = ExpandableAdapter::new(build_tree(&counts));
        let original = tree_shape(&adapter);
        let mut added = 0;

        for op in ops {
            apply_edit(&mut adapter, op, &mut added);
            prop_assert!(adapter.validate().is_ok());
        }
        adapter.restore_all().unwrap();
        prop_assert!(adapter.validate().is_ok());

        let restored: Vec<(String, Vec<String>)> = tree_shape(&adapter)
            .into_iter()
            .filter(|(label, _)| label.starts_with('P'))
            .collect();
        prop_assert_eq!(restored, original);
        prop_assert_eq!(adapter.count_top_level(), counts.len() + added);
    }

    /// Commit makes removals permanent: nothing is left to restore.
    #[test]
    fn prop_commit_empties_ledger(
        counts in arb_child_counts(),
        expansions in arb_raw_positions(6),
        batch in arb_batch(),
    ) {
        let mut adapter = adapter_with_expansions(&counts, &expansions);
        let positions: Vec<usize> = batch.iter().map(|raw| raw % adapter.len()).collect();
        adapter.remove_batch(&positions, false).unwrap();
        let after = labels(&adapter);

        adapter.commit();
        prop_assert!(!adapter.has_pending_removals());
        prop_assert_eq!(adapter.restore_all().unwrap(), 0);
        prop_assert_eq!(labels(&adapter), after);
    }
}

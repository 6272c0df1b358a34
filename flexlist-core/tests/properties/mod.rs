//! Property test modules and shared tree strategies

mod expansion_tests;
mod removal_tests;
mod selection_tests;

use flexlist_core::{ExpandableAdapter, ParentEntry};
use proptest::prelude::*;

/// Strategy for the child count of every parent in a tree
pub fn arb_child_counts() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..4, 1..8)
}

/// Strategy for raw positions, reduced modulo the flat length when used
pub fn arb_raw_positions(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..64, 0..max_len)
}

/// Builds a collapsed tree with labels `P{i}` and `P{i}C{j}`
pub fn build_tree(counts: &[usize]) -> Vec<ParentEntry<String>> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            ParentEntry::new(format!("P{i}")).with_children((0..n).map(|j| format!("P{i}C{j}")))
        })
        .collect()
}

/// Builds an adapter and applies `expansions` (raw positions) to it
pub fn adapter_with_expansions(
    counts: &[usize],
    expansions: &[usize],
) -> ExpandableAdapter<String> {
    let mut adapter = ExpandableAdapter::new(build_tree(counts));
    for raw in expansions {
        let pos = raw % adapter.len();
        adapter.expand(pos).expect("position reduced into range");
    }
    adapter
}

/// Flat labels of an adapter
pub fn labels(adapter: &ExpandableAdapter<String>) -> Vec<String> {
    (0..adapter.len())
        .map(|pos| adapter.payload(pos).expect("position in range").clone())
        .collect()
}

/// Sum of child counts of every expanded parent
pub fn spliced_children(adapter: &ExpandableAdapter<String>) -> usize {
    adapter
        .expanded_positions()
        .into_iter()
        .map(|pos| adapter.children_at(pos).expect("expanded parent").len())
        .sum()
}

/// Every top-level parent in flat order with the labels of its children,
/// visible or not
pub fn tree_shape(adapter: &ExpandableAdapter<String>) -> Vec<(String, Vec<String>)> {
    (0..adapter.len())
        .filter_map(|pos| {
            let node = adapter.node(pos).expect("position in range");
            node.is_parent().then(|| {
                let children = node
                    .children()
                    .iter()
                    .map(|id| {
                        adapter
                            .node_by_id(*id)
                            .expect("child in store")
                            .payload()
                            .clone()
                    })
                    .collect();
                (node.payload().clone(), children)
            })
        })
        .collect()
}

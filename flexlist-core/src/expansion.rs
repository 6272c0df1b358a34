//! Expansion index
//!
//! Maps the flat position of every expanded parent to that parent. The
//! children spliced after the key are the parent's own child list, so for a
//! key `p` with `c` children the rows `p + 1 ..= p + c` are exactly those
//! children. The index is the source of truth for "is the parent at this
//! position expanded" and for resolving a visible child's owner.

use std::collections::BTreeMap;

use crate::models::NodeId;

/// Ordered mapping from parent position to expanded parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionIndex {
    entries: BTreeMap<usize, NodeId>,
}

impl ExpansionIndex {
    /// Creates an empty index
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registers `parent` as expanded at `pos`
    ///
    /// Returns the parent previously registered at that key, if any.
    pub fn insert(&mut self, pos: usize, parent: NodeId) -> Option<NodeId> {
        self.entries.insert(pos, parent)
    }

    /// Unregisters the entry at `pos`
    pub fn remove(&mut self, pos: usize) -> Option<NodeId> {
        self.entries.remove(&pos)
    }

    /// Returns the parent expanded at `pos`
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<NodeId> {
        self.entries.get(&pos).copied()
    }

    /// Returns true if a parent is expanded at `pos`
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.entries.contains_key(&pos)
    }

    /// Returns the key under which `parent` is registered
    #[must_use]
    pub fn position_of(&self, parent: NodeId) -> Option<usize> {
        self.entries
            .iter()
            .find_map(|(pos, id)| (*id == parent).then_some(*pos))
    }

    /// Expanded positions in ascending order
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }

    /// Highest expanded position
    #[must_use]
    pub fn last_position(&self) -> Option<usize> {
        self.entries.keys().next_back().copied()
    }

    /// Iterates `(position, parent)` pairs in ascending position order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, NodeId)> + '_ {
        self.entries.iter().map(|(pos, id)| (*pos, *id))
    }

    /// Number of expanded parents
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is expanded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Re-keys every entry at or after `start` by `delta`.
    ///
    /// For removals, entries whose key falls inside the removed range are
    /// dropped and returned; a removed parent must have been collapsed before
    /// its row disappeared, so a non-empty result signals a defect.
    pub fn shift(&mut self, start: usize, delta: isize) -> Vec<(usize, NodeId)> {
        if delta == 0 {
            return Vec::new();
        }
        let moved = self.entries.split_off(&start);
        let removed_end = start.saturating_add(delta.unsigned_abs());
        let mut dropped = Vec::new();
        for (pos, parent) in moved {
            if delta < 0 && pos < removed_end {
                dropped.push((pos, parent));
                continue;
            }
            let new_pos = pos.saturating_add_signed(delta);
            tracing::trace!(from = pos, to = new_pos, "Re-keyed expanded parent");
            self.entries.insert(new_pos, parent);
        }
        dropped
    }
}

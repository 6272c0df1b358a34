//! Selection tracker
//!
//! Keeps the set of selected flat positions together with the row kind each
//! one had when it was selected. Parent-level and child-level selections are
//! mutually exclusive: the "any parent selected" and "any child selected"
//! flags are derived from the stored kinds, so they can never drift from the
//! set's contents.

use std::collections::BTreeMap;

use crate::models::RowKind;

/// Set of selected positions honoring parent/child exclusivity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: BTreeMap<usize, RowKind>,
}

impl SelectionSet {
    /// Creates an empty selection
    #[must_use]
    pub fn new() -> Self {
        Self {
            selected: BTreeMap::new(),
        }
    }

    /// Returns true if a row of `kind` may join the current selection
    #[must_use]
    pub fn accepts(&self, kind: RowKind) -> bool {
        match kind {
            RowKind::Expandable => !self.any_child_selected(),
            RowKind::Regular => !self.any_parent_selected(),
        }
    }

    /// Toggles `pos`, honoring exclusivity.
    ///
    /// Deselecting is always allowed. Selecting is ignored when the other
    /// kind is already selected. Returns true if the set changed.
    pub fn toggle(&mut self, pos: usize, kind: RowKind) -> bool {
        if self.selected.remove(&pos).is_some() {
            return true;
        }
        if !self.accepts(kind) {
            return false;
        }
        self.selected.insert(pos, kind);
        true
    }

    /// Selects `pos` if exclusivity allows it. Returns true if newly selected.
    pub fn select(&mut self, pos: usize, kind: RowKind) -> bool {
        if self.selected.contains_key(&pos) || !self.accepts(kind) {
            return false;
        }
        self.selected.insert(pos, kind);
        true
    }

    /// Deselects `pos`. Returns true if it was selected.
    pub fn deselect(&mut self, pos: usize) -> bool {
        self.selected.remove(&pos).is_some()
    }

    /// Returns true if `pos` is selected
    #[must_use]
    pub fn is_selected(&self, pos: usize) -> bool {
        self.selected.contains_key(&pos)
    }

    /// Returns true if any position in `range` is selected
    #[must_use]
    pub fn any_in(&self, range: std::ops::Range<usize>) -> bool {
        self.selected.range(range).next().is_some()
    }

    /// Selected positions in ascending order
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        self.selected.keys().copied().collect()
    }

    /// Number of selected positions
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns true if at least one parent row is selected
    #[must_use]
    pub fn any_parent_selected(&self) -> bool {
        self.selected.values().any(|k| *k == RowKind::Expandable)
    }

    /// Returns true if at least one child or regular row is selected
    #[must_use]
    pub fn any_child_selected(&self) -> bool {
        self.selected.values().any(|k| *k == RowKind::Regular)
    }

    /// Deselects everything
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Shifts positions at or after `start` by `delta`.
    ///
    /// On removal (`delta < 0`) the rows in `start .. start - delta` no
    /// longer exist, so their selections are dropped; every surviving
    /// position stays at or above `start`. Returns the dropped positions.
    pub fn shift(&mut self, start: usize, delta: isize) -> Vec<usize> {
        if delta == 0 {
            return Vec::new();
        }
        let moved = self.selected.split_off(&start);
        let removed_end = start.saturating_add(delta.unsigned_abs());
        let mut dropped = Vec::new();
        for (pos, kind) in moved {
            if delta < 0 && pos < removed_end {
                dropped.push(pos);
                continue;
            }
            let new_pos = pos.saturating_add_signed(delta).max(start);
            self.selected.insert(new_pos, kind);
        }
        dropped
    }
}

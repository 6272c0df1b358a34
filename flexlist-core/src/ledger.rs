//! Removal ledger
//!
//! Every removal appends a record holding the removed node, the flat
//! position it had, and for children the owning parent and the index inside
//! that parent's child list. Each record also names the node that followed
//! the removed one, so the node can go back in front of it even after other
//! rows were inserted, expanded or collapsed. Records are replayed
//! newest-first by an undo, or discarded together by a commit.

use crate::models::NodeId;

/// Structural context needed to put a removed node back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOrigin {
    /// A parent row, reinserted in front of the parent that followed it
    Parent {
        /// The parent row that followed it, `None` if it was the last one
        next: Option<NodeId>,
        /// Whether the parent was expanded when it was removed
        was_expanded: bool,
    },
    /// A child, reinserted into its parent's child list
    Child {
        /// The parent that owned the child
        parent: NodeId,
        /// Index inside the parent's child list at removal time
        index_in_parent: usize,
        /// The sibling that followed it, `None` if it was the last child
        next_sibling: Option<NodeId>,
        /// Whether the parent row is notified when the child returns
        notify_parent: bool,
    },
}

/// A single logged removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalRecord {
    /// The removed node
    pub node: NodeId,
    /// Flat position at removal time, moved by later expansions, collapses
    /// and insertions
    pub position: usize,
    /// Parent or child context
    pub origin: RemovalOrigin,
}

impl RemovalRecord {
    /// Creates a record for a removed parent
    #[must_use]
    pub const fn parent(
        node: NodeId,
        position: usize,
        next: Option<NodeId>,
        was_expanded: bool,
    ) -> Self {
        Self {
            node,
            position,
            origin: RemovalOrigin::Parent { next, was_expanded },
        }
    }

    /// Creates a record for a removed child
    #[must_use]
    pub const fn child(
        node: NodeId,
        position: usize,
        parent: NodeId,
        index_in_parent: usize,
        next_sibling: Option<NodeId>,
        notify_parent: bool,
    ) -> Self {
        Self {
            node,
            position,
            origin: RemovalOrigin::Child {
                parent,
                index_in_parent,
                next_sibling,
                notify_parent,
            },
        }
    }

    /// Returns true if the record describes a child
    #[must_use]
    pub const fn is_child(&self) -> bool {
        matches!(self.origin, RemovalOrigin::Child { .. })
    }
}

/// Append-ordered log of pending removals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalLedger {
    records: Vec<RemovalRecord>,
}

impl RemovalLedger {
    /// Creates an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record
    pub fn push(&mut self, record: RemovalRecord) {
        self.records.push(record);
    }

    /// Removes and returns the most recent record
    pub fn pop(&mut self) -> Option<RemovalRecord> {
        self.records.pop()
    }

    /// Records in removal order
    #[must_use]
    pub fn records(&self) -> &[RemovalRecord] {
        &self.records
    }

    /// Removed node ids in removal order
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        self.records.iter().map(|r| r.node).collect()
    }

    /// Recorded positions in removal order
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.position).collect()
    }

    /// Returns true if some record's position equals `pos`
    #[must_use]
    pub fn is_pending(&self, pos: usize) -> bool {
        self.records.iter().any(|r| r.position == pos)
    }

    /// Number of pending records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record, returning them in removal order
    pub fn take_all(&mut self) -> Vec<RemovalRecord> {
        std::mem::take(&mut self.records)
    }

    /// Shifts every record strictly after `pivot` by `delta`.
    ///
    /// The comparison is strict so a record is never moved by the removal
    /// that created it. Shifted positions never fall below `floor`.
    pub fn shift(&mut self, pivot: usize, delta: isize, floor: usize) {
        if delta == 0 {
            return;
        }
        for record in &mut self.records {
            if record.position > pivot {
                let new_pos = record.position.saturating_add_signed(delta).max(floor);
                tracing::trace!(
                    from = record.position,
                    to = new_pos,
                    "Adjusted pending removal position"
                );
                record.position = new_pos;
            }
        }
    }
}

//! Position reconciler
//!
//! After every structural change to the flat sequence, the positions
//! recorded by the selection set, the expansion index and the removal ledger
//! are shifted so they keep pointing at the same rows. The three updates are
//! independent of each other and run synchronously, before the next
//! mutation starts.

use crate::expansion::ExpansionIndex;
use crate::ledger::RemovalLedger;
use crate::models::NodeId;
use crate::selection::SelectionSet;

/// Describes a structural change of the flat sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    /// First affected position
    pub start: usize,
    /// Number of rows inserted (positive) or removed (negative)
    pub delta: isize,
    /// Ledger records strictly after this position are shifted; `None`
    /// leaves the ledger alone
    pub ledger_pivot: Option<usize>,
}

impl Shift {
    /// `count` rows were inserted at `start`
    #[must_use]
    pub const fn inserted(start: usize, count: usize) -> Self {
        Self {
            start,
            delta: count as isize,
            ledger_pivot: Some(start),
        }
    }

    /// `count` rows were removed at `start`
    #[must_use]
    pub const fn removed(start: usize, count: usize) -> Self {
        Self {
            start,
            delta: -(count as isize),
            ledger_pivot: Some(start),
        }
    }

    /// Children of the parent at `parent_pos` were spliced in (`delta > 0`)
    /// or out (`delta < 0`) right after it.
    ///
    /// Pending rows recorded directly after the parent belong after its
    /// children, so the ledger pivots on the parent row itself.
    #[must_use]
    pub const fn children_of(parent_pos: usize, delta: isize) -> Self {
        Self {
            start: parent_pos + 1,
            delta,
            ledger_pivot: Some(parent_pos),
        }
    }

    /// The same change, leaving the removal ledger alone.
    ///
    /// For removals and restores the ledger performs itself: records are
    /// replayed newest-first, so each one is still valid against the rows
    /// that existed when it was logged.
    #[must_use]
    pub const fn sparing_ledger(mut self) -> Self {
        self.ledger_pivot = None;
        self
    }

    /// Returns true if the change is a no-op
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.delta == 0
    }
}

/// What a reconciliation pass discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Selected positions whose rows were removed
    pub deselected: Vec<usize>,
    /// Expansion entries whose parent row was removed while still expanded
    pub stale_expansions: Vec<(usize, NodeId)>,
}

/// Applies `shift` to all three position stores.
pub fn reconcile(
    shift: Shift,
    selection: &mut SelectionSet,
    expansion: &mut ExpansionIndex,
    ledger: &mut RemovalLedger,
) -> Reconciliation {
    if shift.is_empty() {
        return Reconciliation::default();
    }
    tracing::trace!(
        start = shift.start,
        delta = shift.delta,
        ledger_pivot = ?shift.ledger_pivot,
        "Reconciling positions"
    );
    let deselected = selection.shift(shift.start, shift.delta);
    let stale_expansions = expansion.shift(shift.start, shift.delta);
    if let Some(pivot) = shift.ledger_pivot {
        ledger.shift(pivot, shift.delta, shift.start);
    }
    Reconciliation {
        deselected,
        stale_expansions,
    }
}

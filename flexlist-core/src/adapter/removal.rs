//! Removal, batch removal, undo and commit
//!
//! Removed nodes stay in the node store and are logged in the ledger until
//! [`ExpandableAdapter::commit`]. A run of `n` rows removed at `start` is
//! logged as `n` records at `start`, exactly as if the rows had been removed
//! one by one from the front.
//!
//! Undo replays the ledger newest-first. A parent goes back in front of the
//! parent that followed it when it was removed, and a child in front of its
//! former next sibling. Whatever that node was, it is visible again by the
//! time the record is replayed: either it was never removed, or its own
//! removal came later and has already been undone. Rows inserted, expanded
//! or collapsed in between therefore never change the restored order.

use super::ExpandableAdapter;
use crate::error::{AdapterError, AdapterResult};
use crate::ledger::{RemovalOrigin, RemovalRecord};
use crate::models::{Node, NodeId, RowKind};
use crate::notify::ChangeEvent;
use crate::reconcile::Shift;
use crate::tracing::span_names;

impl<T> ExpandableAdapter<T> {
    /// Removes the row at `pos`, keeping it for undo.
    ///
    /// A child is detached from its parent; if `notify_parent` is set the
    /// parent row receives an `ItemChanged`. A child whose owner cannot be
    /// resolved is left alone. An expanded parent is collapsed before it is
    /// removed.
    ///
    /// Returns true if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn remove(&mut self, pos: usize, notify_parent: bool) -> AdapterResult<bool> {
        Ok(self.remove_range(pos, 1, notify_parent)? > 0)
    }

    /// Removes `count` consecutive rows starting at `start`.
    ///
    /// All rows of the run must be parents, or all children of the same
    /// parent. A single `ItemsRemoved` covers the run, and no notification
    /// is delivered before the whole run has been removed and reconciled.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the run extends past the end, and
    /// `MixedRun` if it contains both parent and child rows. Nothing is
    /// removed in either case.
    pub fn remove_range(
        &mut self,
        start: usize,
        count: usize,
        notify_parent: bool,
    ) -> AdapterResult<usize> {
        if count == 0 {
            return Ok(0);
        }
        let len = self.flat.len();
        let end = start
            .checked_add(count)
            .filter(|end| *end <= len)
            .ok_or(AdapterError::OutOfBounds {
                position: start.saturating_add(count - 1),
                len,
            })?;
        let ids = self.flat.as_slice()[start..end].to_vec();
        let kind = self.run_kind(&ids).ok_or(AdapterError::MixedRun { start, count })?;

        let _span =
            crate::trace_operation_debug!(span_names::REMOVE_RANGE, start, count).entered();
        self.buffering = true;
        let result = match kind {
            RowKind::Regular => self.remove_child_run(start, &ids, notify_parent),
            RowKind::Expandable => self.remove_parent_run(start, &ids),
        };
        self.flush();
        result
    }

    /// Removes an arbitrary set of positions in one call.
    ///
    /// Positions are sorted, deduplicated and split into runs of consecutive
    /// rows of the same kind and parent. Child runs go first, highest
    /// downward, so parent positions stay put; parent runs follow, each
    /// re-located by id. Every notification emitted meanwhile carries the
    /// multi-remove flag.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if any position is outside the flat sequence;
    /// nothing is removed in that case.
    pub fn remove_batch(&mut self, positions: &[usize], notify_parent: bool) -> AdapterResult<usize> {
        let mut positions = positions.to_vec();
        positions.sort_unstable();
        positions.dedup();
        let runs = self.split_runs(&positions)?;

        let _span = crate::trace_operation_debug!(
            span_names::REMOVE_BATCH,
            positions = positions.len(),
            runs = runs.len()
        )
        .entered();
        self.multi_remove = true;
        let result = self.remove_runs(&runs, notify_parent);
        self.multi_remove = false;
        result
    }

    /// Removes every selected row as one batch
    ///
    /// # Errors
    ///
    /// Propagates errors from [`remove_batch`](Self::remove_batch).
    pub fn remove_all_selected(&mut self, notify_parent: bool) -> AdapterResult<usize> {
        let positions = self.selection.positions();
        self.remove_batch(&positions, notify_parent)
    }

    /// Puts every pending removal back, most recent first, then clears the
    /// ledger.
    ///
    /// A parent goes back in front of the parent that followed it, a child
    /// in front of its former next sibling. Children only become visible if
    /// the parent is expanded. Parents that were expanded when removed are
    /// expanded again. With the restore-selection
    /// policy each visible restored row is selected again.
    ///
    /// Returns the number of nodes restored.
    ///
    /// # Errors
    ///
    /// Returns an error if a record no longer fits the tree. The failing
    /// record and every older one stay in the ledger.
    pub fn restore_all(&mut self) -> AdapterResult<usize> {
        let _span = crate::trace_operation_debug!(
            span_names::RESTORE_ALL,
            pending = self.ledger.len()
        )
        .entered();
        let mut restored = 0;
        while let Some(record) = self.ledger.records().last().copied() {
            let position = match record.origin {
                RemovalOrigin::Parent { next, was_expanded } => {
                    Some(self.restore_parent(record.node, next, was_expanded)?)
                }
                RemovalOrigin::Child {
                    parent,
                    next_sibling,
                    notify_parent,
                    ..
                } => self.restore_child(record.node, parent, next_sibling, notify_parent)?,
            };
            self.ledger.pop();
            if self.settings.restore_selection
                && let Some(pos) = position
            {
                self.select(pos)?;
            }
            restored += 1;
        }
        tracing::debug!(restored, rows = self.flat.len(), "Restored pending removals");
        Ok(restored)
    }

    /// Makes every pending removal permanent and drops the removed nodes.
    ///
    /// Returns the number of records discarded.
    pub fn commit(&mut self) -> usize {
        let records = self.ledger.take_all();
        for record in &records {
            if let Some(node) = self.store.remove(record.node) {
                for child in node.children() {
                    self.store.remove(*child);
                }
            }
        }
        tracing::debug!(committed = records.len(), "Committed pending removals");
        records.len()
    }

    /// Returns true if a pending removal was recorded at `pos`
    #[must_use]
    pub fn is_pending_removal(&self, pos: usize) -> bool {
        self.ledger.is_pending(pos)
    }

    /// Removed node ids, oldest first
    #[must_use]
    pub fn pending_removals(&self) -> Vec<NodeId> {
        self.ledger.nodes()
    }

    /// Recorded positions of pending removals, oldest first
    #[must_use]
    pub fn pending_positions(&self) -> Vec<usize> {
        self.ledger.positions()
    }

    /// Returns true if anything can be restored
    #[must_use]
    pub fn has_pending_removals(&self) -> bool {
        !self.ledger.is_empty()
    }

    /// Returns the common row kind of `ids`, or `None` for a mixed run
    fn run_kind(&self, ids: &[NodeId]) -> Option<RowKind> {
        let mut kinds = ids
            .iter()
            .map(|id| self.store.get(*id).map(Node::row_kind));
        let first = kinds.next()??;
        kinds.all(|kind| kind == Some(first)).then_some(first)
    }

    fn remove_child_run(
        &mut self,
        start: usize,
        ids: &[NodeId],
        notify_parent: bool,
    ) -> AdapterResult<usize> {
        let Some((parent_pos, parent)) = self.owner_of(ids[0]) else {
            tracing::debug!(position = start, "Child without an expanded owner, ignored");
            return Ok(0);
        };
        let owner = self.store.require(parent)?;
        if let Some(stray) = ids.iter().find(|id| owner.child_index(**id).is_none()) {
            return Err(Self::violation(format!(
                "{stray} in a run of {parent} children is not owned by it"
            )));
        }
        let parent_expanded = owner.is_expanded();

        let mut records = Vec::with_capacity(ids.len());
        for &child in ids {
            let list = self
                .store
                .require_mut(parent)?
                .children_mut()
                .ok_or(AdapterError::NotAParent(parent_pos))?;
            if let Some(index) = list.iter().position(|c| *c == child) {
                list.remove(index);
                let next_sibling = list.get(index).copied();
                records.push(RemovalRecord::child(
                    child,
                    start,
                    parent,
                    index,
                    next_sibling,
                    notify_parent,
                ));
            }
        }

        let count = ids.len();
        self.flat.remove_range(start, count)?;
        self.apply_shift(Shift::removed(start, count).sparing_ledger());
        for record in records {
            self.ledger.push(record);
        }
        if parent_expanded {
            self.notify(ChangeEvent::ItemsRemoved { start, count });
        }
        if notify_parent {
            self.notify(ChangeEvent::ItemChanged {
                position: parent_pos,
            });
        }
        tracing::debug!(
            start,
            count,
            parent = %parent,
            ledger_len = self.ledger.len(),
            "Removed child rows"
        );
        Ok(count)
    }

    fn remove_parent_run(&mut self, start: usize, ids: &[NodeId]) -> AdapterResult<usize> {
        // Back to front, so a collapse never moves a parent still to visit.
        let mut was_expanded = vec![false; ids.len()];
        for (offset, id) in ids.iter().enumerate().rev() {
            if self.store.require(*id)?.is_expanded() {
                self.collapse_at(start + offset, true)?;
                was_expanded[offset] = true;
            }
        }

        let count = ids.len();
        let after = self.flat.as_slice().get(start + count).copied();
        self.flat.remove_range(start, count)?;
        self.apply_shift(Shift::removed(start, count).sparing_ledger());
        for (offset, (id, expanded)) in ids.iter().zip(was_expanded).enumerate() {
            let next = ids.get(offset + 1).copied().or(after);
            self.ledger
                .push(RemovalRecord::parent(*id, start, next, expanded));
        }
        self.notify(ChangeEvent::ItemsRemoved { start, count });
        tracing::debug!(
            start,
            count,
            ledger_len = self.ledger.len(),
            "Removed parent rows"
        );
        Ok(count)
    }

    /// Splits sorted, unique positions into `(start, len)` runs
    fn split_runs(&self, positions: &[usize]) -> AdapterResult<Vec<(usize, usize)>> {
        let mut runs: Vec<(usize, usize)> = Vec::new();
        let mut previous: Option<(usize, RowKind, Option<NodeId>)> = None;
        for &pos in positions {
            let node = self.node(pos)?;
            let kind = node.row_kind();
            let owner = if node.is_parent() {
                None
            } else {
                self.owner_of(node.id()).map(|(_, parent)| parent)
            };
            match (runs.last_mut(), previous) {
                (Some(run), Some((prev_pos, prev_kind, prev_owner)))
                    if pos == prev_pos + 1 && kind == prev_kind && owner == prev_owner =>
                {
                    run.1 += 1;
                }
                _ => runs.push((pos, 1)),
            }
            previous = Some((pos, kind, owner));
        }
        Ok(runs)
    }

    fn remove_runs(&mut self, runs: &[(usize, usize)], notify_parent: bool) -> AdapterResult<usize> {
        let mut parent_runs = Vec::new();
        let mut child_runs = Vec::new();
        for &(start, len) in runs {
            let ids = self.flat.as_slice()[start..start + len].to_vec();
            match self.store.require(ids[0])?.row_kind() {
                RowKind::Expandable => parent_runs.push(ids),
                RowKind::Regular => child_runs.push((start, len)),
            }
        }

        let mut removed = 0;
        // Child records restore by sibling, so their order is free.
        for &(start, len) in child_runs.iter().rev() {
            removed += self.remove_range(start, len, notify_parent)?;
        }
        for ids in parent_runs {
            let start = self.flat.index_of(ids[0]).ok_or_else(|| {
                Self::violation(format!("{} vanished during a batch removal", ids[0]))
            })?;
            removed += self.remove_range(start, ids.len(), notify_parent)?;
        }
        Ok(removed)
    }

    /// Puts `node` back in front of `next`, or at the end
    fn restore_parent(
        &mut self,
        node: NodeId,
        next: Option<NodeId>,
        was_expanded: bool,
    ) -> AdapterResult<usize> {
        let pos = match next {
            Some(next) => self.flat.index_of(next).ok_or_else(|| {
                Self::violation(format!("{next} recorded after {node} is not visible"))
            })?,
            None => self.flat.len(),
        };
        self.flat.insert_range(pos, [node])?;
        self.apply_shift(Shift::inserted(pos, 1).sparing_ledger());
        self.notify(ChangeEvent::ItemsInserted {
            start: pos,
            count: 1,
        });
        if was_expanded {
            self.splice_children(pos, node)?;
        }
        Ok(pos)
    }

    /// Puts `child` back in front of its former next sibling, or last when
    /// it was the last child.
    ///
    /// Returns the flat position of the restored child, if it is visible.
    fn restore_child(
        &mut self,
        child: NodeId,
        parent: NodeId,
        next_sibling: Option<NodeId>,
        notify_parent: bool,
    ) -> AdapterResult<Option<usize>> {
        let owner = self.store.require_mut(parent)?;
        let expanded = owner.is_expanded();
        let index = match owner.children_mut() {
            Some(list) => {
                let index = match next_sibling {
                    Some(next) => list.iter().position(|c| *c == next),
                    None => Some(list.len()),
                };
                let Some(index) = index else {
                    return Err(Self::violation(format!(
                        "{child} recorded before a sibling {parent} no longer owns"
                    )));
                };
                list.insert(index, child);
                index
            }
            None => {
                return Err(Self::violation(format!(
                    "{parent} recorded as owner of {child} is not a parent"
                )));
            }
        };

        let parent_pos = self.flat.index_of(parent);
        let position = match parent_pos {
            Some(parent_pos) if expanded => {
                let pos = parent_pos + 1 + index;
                self.flat.insert_range(pos, [child])?;
                self.apply_shift(Shift::inserted(pos, 1).sparing_ledger());
                self.notify(ChangeEvent::ItemsInserted {
                    start: pos,
                    count: 1,
                });
                Some(pos)
            }
            _ => None,
        };
        if notify_parent && let Some(parent_pos) = parent_pos {
            self.notify(ChangeEvent::ItemChanged {
                position: parent_pos,
            });
        }
        Ok(position)
    }
}

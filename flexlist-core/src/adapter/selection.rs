//! Exclusive parent/child selection

use super::ExpandableAdapter;
use crate::error::AdapterResult;
use crate::models::{Node, RowKind};

impl<T> ExpandableAdapter<T> {
    /// Toggles the selection of the row at `pos`.
    ///
    /// Rows that are not selectable are ignored. A parent can only be
    /// selected while no child is selected, and the other way around.
    /// Returns true if the selection changed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn toggle(&mut self, pos: usize) -> AdapterResult<bool> {
        let node = self.node(pos)?;
        if !node.is_selectable() {
            return Ok(false);
        }
        let kind = node.row_kind();
        let changed = self.selection.toggle(pos, kind);
        tracing::trace!(position = pos, ?kind, changed, "Toggled selection");
        Ok(changed)
    }

    /// Selects the row at `pos` under the same rules as [`toggle`](Self::toggle).
    ///
    /// Returns true if the row was newly selected.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn select(&mut self, pos: usize) -> AdapterResult<bool> {
        let node = self.node(pos)?;
        if !node.is_selectable() {
            return Ok(false);
        }
        let kind = node.row_kind();
        Ok(self.selection.select(pos, kind))
    }

    /// Selects every row of one level.
    ///
    /// If parents are already selected, every selectable parent row is
    /// selected. Otherwise every selectable regular row accepted by `filter`
    /// is selected (all of them when no filter is given). Returns the number
    /// of newly selected rows.
    pub fn select_all(&mut self, filter: Option<&dyn Fn(&Node<T>) -> bool>) -> usize {
        let parents_only = self.selection.any_parent_selected();
        let target = if parents_only {
            RowKind::Expandable
        } else {
            RowKind::Regular
        };
        let candidates: Vec<usize> = self
            .flat
            .iter()
            .enumerate()
            .filter_map(|(pos, id)| {
                let node = self.store.get(id)?;
                let wanted = node.is_selectable()
                    && node.row_kind() == target
                    && (parents_only || filter.is_none_or(|f| f(node)));
                wanted.then_some(pos)
            })
            .collect();

        let mut selected = 0;
        for pos in candidates {
            if self.selection.select(pos, target) {
                selected += 1;
            }
        }
        tracing::debug!(?target, selected, "Selected all");
        selected
    }

    /// Deselects everything. Returns the number of rows deselected.
    pub fn clear_selection(&mut self) -> usize {
        let count = self.selection.len();
        self.selection.clear();
        count
    }

    /// Returns true if the row at `pos` is selected
    #[must_use]
    pub fn is_selected(&self, pos: usize) -> bool {
        self.selection.is_selected(pos)
    }

    /// Selected positions in ascending order
    #[must_use]
    pub fn selected_positions(&self) -> Vec<usize> {
        self.selection.positions()
    }

    /// Number of selected rows
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Returns true if at least one parent row is selected
    #[must_use]
    pub fn is_any_parent_selected(&self) -> bool {
        self.selection.any_parent_selected()
    }

    /// Returns true if at least one child row is selected
    #[must_use]
    pub fn is_any_child_selected(&self) -> bool {
        self.selection.any_child_selected()
    }
}

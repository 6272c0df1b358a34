//! Expand/collapse state machine

use super::ExpandableAdapter;
use crate::error::AdapterResult;
use crate::models::NodeId;
use crate::notify::ChangeEvent;
use crate::reconcile::Shift;
use crate::scroll::{AutoScrollRequest, Viewport, scroll_target};
use crate::tracing::span_names;

impl<T> ExpandableAdapter<T> {
    /// Expands the parent at `pos`, splicing its children in after it.
    ///
    /// Does nothing and returns 0 if the row is not a collapsed parent with
    /// children, or if any parent row is selected. With the auto-collapse
    /// policy every other expanded parent is collapsed first.
    ///
    /// Returns the number of children spliced in.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn expand(&mut self, pos: usize) -> AdapterResult<usize> {
        let auto_collapse = self.settings.auto_collapse_on_expand;
        self.expand_at(pos, auto_collapse)
    }

    /// Collapses the parent at `pos`, removing its children from the flat
    /// sequence.
    ///
    /// Does nothing and returns 0 if the row is not an expanded parent, or if
    /// one of its children is selected and the parent is not pending removal.
    ///
    /// Returns the number of children removed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn collapse(&mut self, pos: usize) -> AdapterResult<usize> {
        let force = self.ledger.is_pending(pos);
        Ok(self.collapse_at(pos, force)?.unwrap_or(0))
    }

    /// Expands every collapsed parent, walking forward from the first row.
    ///
    /// The auto-collapse policy is ignored. Returns the number of parents
    /// expanded.
    ///
    /// # Errors
    ///
    /// Propagates invariant violations from the individual expansions.
    pub fn expand_all(&mut self) -> AdapterResult<usize> {
        let _span = crate::trace_operation_debug!(span_names::EXPAND_ALL).entered();
        let mut expanded = 0;
        let mut pos = 0;
        while pos < self.flat.len() {
            let count = self.expand_at(pos, false)?;
            if count > 0 {
                expanded += 1;
            }
            pos += 1 + count;
        }
        Ok(expanded)
    }

    /// Collapses every expanded parent, walking backward from the last
    /// expanded position so earlier positions stay valid.
    ///
    /// Returns the number of parents collapsed.
    ///
    /// # Errors
    ///
    /// Propagates invariant violations from the individual collapses.
    pub fn collapse_all(&mut self) -> AdapterResult<usize> {
        let _span = crate::trace_operation_debug!(span_names::COLLAPSE_ALL).entered();
        let mut collapsed = 0;
        for pos in self.expansion.positions().into_iter().rev() {
            let force = self.ledger.is_pending(pos);
            if self.collapse_at(pos, force)?.is_some() {
                collapsed += 1;
            }
        }
        Ok(collapsed)
    }

    /// Recomputes the scroll target of a queued request.
    ///
    /// Returns `None` if the request went stale (the parent moved, was
    /// collapsed or changed its child count since the expansion) or if no
    /// scrolling is needed.
    #[must_use]
    pub fn resolve_auto_scroll(
        &self,
        request: &AutoScrollRequest,
        viewport: &dyn Viewport,
    ) -> Option<usize> {
        let still_valid = request.generation == self.generation
            || (self.expansion.get(request.position) == Some(request.parent)
                && self
                    .store
                    .get(request.parent)
                    .is_some_and(|p| p.children().len() == request.child_count));
        if !still_valid {
            tracing::debug!(
                parent = %request.parent,
                position = request.position,
                "Dropped stale auto-scroll request"
            );
            return None;
        }
        scroll_target(
            request.position,
            request.child_count,
            viewport,
            self.settings.scroll_tie_break,
        )
    }

    pub(super) fn expand_at(&mut self, pos: usize, auto_collapse: bool) -> AdapterResult<usize> {
        let node = self.node(pos)?;
        if !node.is_parent()
            || node.is_expanded()
            || !node.has_children()
            || self.selection.any_parent_selected()
        {
            return Ok(0);
        }
        let parent = node.id();

        let mut pos = pos;
        if auto_collapse && self.collapse_all()? > 0 {
            pos = self.flat.index_of(parent).ok_or_else(|| {
                Self::violation(format!("{parent} vanished while collapsing others"))
            })?;
        }

        let count = self.splice_children(pos, parent)?;
        if self.settings.auto_scroll_on_expand {
            self.scroll_requests.push(AutoScrollRequest {
                parent,
                position: pos,
                child_count: count,
                delay: self.settings.scroll_delay(),
                generation: self.generation,
            });
        }
        tracing::debug!(position = pos, child_count = count, "Expanded parent");
        Ok(count)
    }

    /// Inserts the children of `parent` after `pos` and registers the
    /// expansion, without checking preconditions.
    pub(super) fn splice_children(&mut self, pos: usize, parent: NodeId) -> AdapterResult<usize> {
        let children = self.children_of(parent);
        let count = self.flat.insert_range(pos + 1, children)?;
        self.apply_shift(Shift::children_of(pos, count as isize));
        self.expansion.insert(pos, parent);
        self.store.require_mut(parent)?.set_expanded(true);
        if count > 0 {
            self.notify(ChangeEvent::ItemsInserted {
                start: pos + 1,
                count,
            });
        }
        Ok(count)
    }

    /// Collapses the parent at `pos`.
    ///
    /// With `force` the selected-child check is skipped. Returns `None` when
    /// the transition did not fire.
    pub(super) fn collapse_at(&mut self, pos: usize, force: bool) -> AdapterResult<Option<usize>> {
        let node = self.node(pos)?;
        if !node.is_parent() || !node.is_expanded() {
            return Ok(None);
        }
        let parent = node.id();
        let count = node.children().len();
        if self.expansion.get(pos) != Some(parent) {
            return Err(Self::violation(format!(
                "{parent} is expanded but not indexed at {pos}"
            )));
        }
        if !force && self.selection.any_in(pos + 1..pos + 1 + count) {
            tracing::debug!(position = pos, "Collapse blocked by selected child");
            return Ok(None);
        }

        self.expansion.remove(pos);
        self.flat.remove_range(pos + 1, count)?;
        self.store.require_mut(parent)?.set_expanded(false);
        self.apply_shift(Shift::children_of(pos, -(count as isize)));
        if count > 0 {
            self.notify(ChangeEvent::ItemsRemoved {
                start: pos + 1,
                count,
            });
        }
        tracing::debug!(position = pos, child_count = count, "Collapsed parent");
        Ok(Some(count))
    }
}

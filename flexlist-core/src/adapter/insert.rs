//! Adding parents and children, full reset

use super::ExpandableAdapter;
use crate::error::{AdapterError, AdapterResult};
use crate::models::{ChildEntry, Node, NodeId, ParentEntry};
use crate::notify::ChangeEvent;
use crate::reconcile::Shift;

impl<T> ExpandableAdapter<T> {
    /// Inserts a new parent at `pos`, collapsed regardless of the entry's
    /// `expanded` flag. Its children are stored but not spliced in.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos > len()`.
    pub fn add_parent(&mut self, pos: usize, entry: ParentEntry<T>) -> AdapterResult<NodeId> {
        let len = self.flat.len();
        if pos > len {
            return Err(AdapterError::OutOfBounds { position: pos, len });
        }
        let parent = self.insert_entry(entry);
        self.flat.insert_range(pos, [parent])?;
        self.apply_shift(Shift::inserted(pos, 1));
        self.notify(ChangeEvent::ItemsInserted {
            start: pos,
            count: 1,
        });
        tracing::debug!(position = pos, "Added parent");
        Ok(parent)
    }

    /// Inserts a child into the parent at `parent_pos`.
    ///
    /// The child lands at `sub_pos` in the parent's child list, or at the
    /// end when `sub_pos` is past it. With `expand_parent` a collapsed
    /// parent is expanded afterwards. The child only becomes visible if the
    /// parent ends up expanded.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `parent_pos >= len()`, or `NotAParent` if the
    /// row is a child.
    pub fn add_child(
        &mut self,
        parent_pos: usize,
        sub_pos: usize,
        entry: ChildEntry<T>,
        expand_parent: bool,
        notify_parent: bool,
    ) -> AdapterResult<NodeId> {
        let parent = self.node(parent_pos)?;
        if !parent.is_parent() {
            return Err(AdapterError::NotAParent(parent_pos));
        }
        let parent = parent.id();

        let child = self.store.insert(
            Node::child(entry.payload)
                .with_selectable(entry.selectable)
                .with_hidden(entry.hidden),
        );
        let owner = self.store.require_mut(parent)?;
        let was_expanded = owner.is_expanded();
        let index = match owner.children_mut() {
            Some(list) => {
                let index = sub_pos.min(list.len());
                list.insert(index, child);
                index
            }
            None => return Err(AdapterError::NotAParent(parent_pos)),
        };

        if was_expanded {
            let pos = parent_pos + 1 + index;
            self.flat.insert_range(pos, [child])?;
            self.apply_shift(Shift::inserted(pos, 1));
            self.notify(ChangeEvent::ItemsInserted {
                start: pos,
                count: 1,
            });
        } else if expand_parent {
            self.expand(parent_pos)?;
        }

        if notify_parent && let Some(parent_pos) = self.flat.index_of(parent) {
            self.notify(ChangeEvent::ItemChanged {
                position: parent_pos,
            });
        }
        tracing::debug!(parent_position = parent_pos, index, "Added child");
        Ok(child)
    }

    /// Replaces the whole tree.
    ///
    /// Selection, expansion index, ledger and queued scroll requests are
    /// cleared, pending removals are dropped, and a single
    /// `DataSetInvalidated` is emitted.
    pub fn reset(&mut self, items: Vec<ParentEntry<T>>) {
        self.store.clear();
        self.flat.reset(Vec::new());
        self.expansion.clear();
        self.selection.clear();
        self.ledger.take_all();
        self.scroll_requests.clear();
        self.load(items);
        self.generation += 1;
        self.notify(ChangeEvent::DataSetInvalidated);
    }
}

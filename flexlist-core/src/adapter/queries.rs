//! Read-only tree lookups
//!
//! A child never stores its parent. Ownership is resolved by scanning the
//! expansion index, which only holds the few parents currently expanded.

use super::ExpandableAdapter;
use crate::error::{AdapterError, AdapterResult};
use crate::models::{Node, NodeId};

impl<T> ExpandableAdapter<T> {
    /// Returns true if the parent at `pos` is expanded
    #[must_use]
    pub fn is_expanded(&self, pos: usize) -> bool {
        self.expansion.contains(pos)
    }

    /// Returns true if the row at `pos` is a parent
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn is_expandable(&self, pos: usize) -> AdapterResult<bool> {
        self.node(pos).map(Node::is_parent)
    }

    /// Positions of all expanded parents, ascending
    #[must_use]
    pub fn expanded_positions(&self) -> Vec<usize> {
        self.expansion.positions()
    }

    /// Ids of all expanded parents, in flat order
    #[must_use]
    pub fn expanded_items(&self) -> Vec<NodeId> {
        self.expansion.iter().map(|(_, parent)| parent).collect()
    }

    /// Child ids owned by the parent at `pos`, visible or not
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`, or `NotAParent` if the row
    /// is a child.
    pub fn children_at(&self, pos: usize) -> AdapterResult<&[NodeId]> {
        let node = self.node(pos)?;
        if !node.is_parent() {
            return Err(AdapterError::NotAParent(pos));
        }
        Ok(node.children())
    }

    /// Parent of a visible child; `None` for parents and unknown nodes
    #[must_use]
    pub fn parent_of(&self, child: NodeId) -> Option<NodeId> {
        self.owner_of(child).map(|(_, parent)| parent)
    }

    /// Index of a visible child inside its parent's child list
    #[must_use]
    pub fn relative_position_of(&self, child: NodeId) -> Option<usize> {
        self.siblings_of(child).iter().position(|c| *c == child)
    }

    /// The child list a visible child belongs to, itself included.
    /// Empty for parents and unknown nodes.
    #[must_use]
    pub fn siblings_of(&self, child: NodeId) -> &[NodeId] {
        self.owner_of(child)
            .and_then(|(_, parent)| self.store.get(parent))
            .map(Node::children)
            .unwrap_or_default()
    }

    /// Number of parent rows: the flat length minus spliced children
    #[must_use]
    pub fn count_top_level(&self) -> usize {
        let spliced: usize = self
            .expansion
            .iter()
            .filter_map(|(_, parent)| self.store.get(parent))
            .map(|parent| parent.children().len())
            .sum();
        self.flat.len() - spliced
    }

    /// Position and id of the expanded parent owning `child`
    pub(super) fn owner_of(&self, child: NodeId) -> Option<(usize, NodeId)> {
        self.expansion.iter().find(|(_, parent)| {
            self.store
                .get(*parent)
                .is_some_and(|node| node.child_index(child).is_some())
        })
    }
}

//! The flat sequence of visible rows
//!
//! Every parent is always present; a child is present only while its parent
//! is expanded. All positions used across the crate are indices into this
//! sequence.

use crate::error::{AdapterError, AdapterResult};
use crate::models::NodeId;

/// Ordered container of the currently visible node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSequence {
    rows: Vec<NodeId>,
}

impl FlatSequence {
    /// Creates an empty sequence
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Number of visible rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row is visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the node at `pos`
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::OutOfBounds` if `pos >= len()`.
    pub fn at(&self, pos: usize) -> AdapterResult<NodeId> {
        self.rows
            .get(pos)
            .copied()
            .ok_or(AdapterError::OutOfBounds {
                position: pos,
                len: self.rows.len(),
            })
    }

    /// Inserts `nodes` so that the first one lands at `pos`
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::OutOfBounds` if `pos > len()`.
    pub fn insert_range(
        &mut self,
        pos: usize,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> AdapterResult<usize> {
        if pos > self.rows.len() {
            return Err(AdapterError::OutOfBounds {
                position: pos,
                len: self.rows.len(),
            });
        }
        let before = self.rows.len();
        self.rows.splice(pos..pos, nodes);
        Ok(self.rows.len() - before)
    }

    /// Removes `count` rows starting at `pos`, returning them in order
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::OutOfBounds` if the range exceeds the sequence.
    pub fn remove_range(&mut self, pos: usize, count: usize) -> AdapterResult<Vec<NodeId>> {
        let end = pos.checked_add(count).unwrap_or(usize::MAX);
        if end > self.rows.len() {
            return Err(AdapterError::OutOfBounds {
                position: end.saturating_sub(1).max(pos),
                len: self.rows.len(),
            });
        }
        Ok(self.rows.drain(pos..end).collect())
    }

    /// Returns the position of `node`, if visible
    #[must_use]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.rows.iter().position(|id| *id == node)
    }

    /// Returns true if `node` is visible
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.rows.contains(&node)
    }

    /// Returns the visible ids in order
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.rows
    }

    /// Iterates over the visible ids in order
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rows.iter().copied()
    }

    /// Appends one row at the end
    pub fn push(&mut self, node: NodeId) {
        self.rows.push(node);
    }

    /// Appends rows at the end
    pub fn extend(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
        self.rows.extend(nodes);
    }

    /// Replaces the whole sequence
    pub fn reset(&mut self, rows: Vec<NodeId>) {
        self.rows = rows;
    }
}

//! Node storage indexed by id

use std::collections::HashMap;

use super::node::{Node, NodeId};
use crate::error::{AdapterError, AdapterResult};

/// Owns every node known to the adapter, visible or not.
///
/// Collapsed children and nodes waiting in the removal ledger live here
/// while they are absent from the flat sequence.
#[derive(Debug, Clone)]
pub struct NodeStore<T> {
    nodes: HashMap<NodeId, Node<T>>,
}

impl<T> Default for NodeStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeStore<T> {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Adds a node, returning its id
    pub fn insert(&mut self, node: Node<T>) -> NodeId {
        let id = node.id();
        self.nodes.insert(id, node);
        id
    }

    /// Drops a node from the store
    pub fn remove(&mut self, id: NodeId) -> Option<Node<T>> {
        self.nodes.remove(&id)
    }

    /// Gets a node by id
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(&id)
    }

    /// Gets a mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(&id)
    }

    /// Gets a node by id or fails with `NodeNotFound`
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::NodeNotFound` if the id is unknown.
    pub fn require(&self, id: NodeId) -> AdapterResult<&Node<T>> {
        self.nodes.get(&id).ok_or(AdapterError::NodeNotFound(id))
    }

    /// Mutable variant of [`Self::require`]
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::NodeNotFound` if the id is unknown.
    pub fn require_mut(&mut self, id: NodeId) -> AdapterResult<&mut Node<T>> {
        self.nodes
            .get_mut(&id)
            .ok_or(AdapterError::NodeNotFound(id))
    }

    /// Returns true if the id is known
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of stored nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the store holds no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes every node
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

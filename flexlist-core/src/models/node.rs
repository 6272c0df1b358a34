//! Tree node model
//!
//! A node is either a parent, which owns an ordered list of child ids and may
//! be expanded, or a child. Children never store a reference to their
//! parent; ownership runs one way, from parent to child list.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a node.
///
/// Ids stay stable while a node is spliced in and out of the flat sequence,
/// so they are used to re-locate nodes whose position has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Creates a new random node ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Row classification handed to the view layer.
///
/// This is the only information a view needs to choose its binding path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// A parent row that can be expanded or collapsed
    Expandable,
    /// Any other row
    Regular,
}

/// Structural variant of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A top-level node owning an ordered child list
    Parent {
        /// Whether the children are currently spliced into the flat sequence
        expanded: bool,
        /// Owned child ids, in display order
        children: Vec<NodeId>,
    },
    /// A leaf owned by exactly one parent
    Child,
}

/// A node of the two-level tree, carrying a user payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    id: NodeId,
    kind: NodeKind,
    selectable: bool,
    hidden: bool,
    payload: T,
}

impl<T> Node<T> {
    /// Creates a collapsed parent with no children.
    #[must_use]
    pub fn parent(payload: T) -> Self {
        Self {
            id: NodeId::new(),
            kind: NodeKind::Parent {
                expanded: false,
                children: Vec::new(),
            },
            selectable: true,
            hidden: false,
            payload,
        }
    }

    /// Creates a child node.
    #[must_use]
    pub fn child(payload: T) -> Self {
        Self {
            id: NodeId::new(),
            kind: NodeKind::Child,
            selectable: true,
            hidden: false,
            payload,
        }
    }

    /// Sets whether the node can be selected.
    #[must_use]
    pub const fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets the hidden flag.
    #[must_use]
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Returns the node id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the structural variant.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns true for parent nodes.
    #[must_use]
    pub const fn is_parent(&self) -> bool {
        matches!(self.kind, NodeKind::Parent { .. })
    }

    /// Returns the row classification for this node.
    #[must_use]
    pub const fn row_kind(&self) -> RowKind {
        if self.is_parent() {
            RowKind::Expandable
        } else {
            RowKind::Regular
        }
    }

    /// Returns true if this is a parent whose children are spliced in.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        matches!(self.kind, NodeKind::Parent { expanded: true, .. })
    }

    /// Returns the owned child ids; empty for children.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Parent { children, .. } => children,
            NodeKind::Child => &[],
        }
    }

    /// Returns true if this is a parent with at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Returns the index of `child` inside this parent's child list.
    #[must_use]
    pub fn child_index(&self, child: NodeId) -> Option<usize> {
        self.children().iter().position(|c| *c == child)
    }

    /// Returns whether the node can be selected.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Sets whether the node can be selected.
    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    /// Returns whether the node is hidden by an active filter.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Sets the hidden flag.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Returns the user payload.
    #[must_use]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Returns the user payload mutably.
    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// Flips the expanded flag. No effect on children.
    pub(crate) fn set_expanded(&mut self, value: bool) {
        if let NodeKind::Parent { expanded, .. } = &mut self.kind {
            *expanded = value;
        }
    }

    /// Mutable access to the child list; `None` for children.
    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Parent { children, .. } => Some(children),
            NodeKind::Child => None,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Description of a child used for bulk loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEntry<T> {
    /// User payload
    pub payload: T,
    /// Whether the child can be selected
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// Whether the child is hidden by a filter
    #[serde(default)]
    pub hidden: bool,
}

impl<T> ChildEntry<T> {
    /// Creates a selectable, visible child entry.
    #[must_use]
    pub const fn new(payload: T) -> Self {
        Self {
            payload,
            selectable: true,
            hidden: false,
        }
    }
}

/// Description of a parent and its children used for bulk loading.
///
/// Entries with `expanded` set are spliced open when the adapter is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentEntry<T> {
    /// User payload
    pub payload: T,
    /// Whether the parent starts expanded
    #[serde(default)]
    pub expanded: bool,
    /// Whether the parent can be selected
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// Whether the parent is hidden by a filter
    #[serde(default)]
    pub hidden: bool,
    /// Children in display order
    #[serde(default = "Vec::new")]
    pub children: Vec<ChildEntry<T>>,
}

impl<T> ParentEntry<T> {
    /// Creates a collapsed parent entry without children.
    #[must_use]
    pub const fn new(payload: T) -> Self {
        Self {
            payload,
            expanded: false,
            selectable: true,
            hidden: false,
            children: Vec::new(),
        }
    }

    /// Appends children built from payloads.
    #[must_use]
    pub fn with_children(mut self, payloads: impl IntoIterator<Item = T>) -> Self {
        self.children
            .extend(payloads.into_iter().map(ChildEntry::new));
        self
    }

    /// Marks the entry as initially expanded.
    #[must_use]
    pub const fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }
}

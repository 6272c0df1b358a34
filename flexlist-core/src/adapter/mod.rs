//! The expandable adapter
//!
//! [`ExpandableAdapter`] owns the node store, the flat sequence, the
//! expansion index, the selection set and the removal ledger, and keeps
//! them consistent. Every structural mutation follows the same three steps:
//! mutate the flat sequence, reconcile recorded positions, then notify the
//! listener.
//!
//! Operations are split by concern:
//! - `expand` - expand/collapse state machine and auto-scroll requests
//! - `selection` - exclusive parent/child selection
//! - `removal` - removal, batch removal, undo and commit
//! - `insert` - adding parents and children, full reset
//! - `queries` - read-only tree lookups

mod expand;
mod insert;
mod queries;
mod removal;
mod selection;

use std::fmt;

use crate::config::AdapterSettings;
use crate::error::{AdapterError, AdapterResult};
use crate::expansion::ExpansionIndex;
use crate::flat::FlatSequence;
use crate::ledger::RemovalLedger;
use crate::models::{Node, NodeId, NodeStore, ParentEntry, RowKind};
use crate::notify::{ChangeEvent, ChangeListener, NoOpListener, Notification};
use crate::reconcile::{Shift, reconcile};
use crate::scroll::AutoScrollRequest;
use crate::selection::SelectionSet;

/// A flat, position-addressed view of a two-level tree.
///
/// Parents are always present in the flat sequence; children appear right
/// after their parent while it is expanded. Removals are kept in a ledger
/// until [`commit`](Self::commit) and can be undone with
/// [`restore_all`](Self::restore_all).
pub struct ExpandableAdapter<T> {
    store: NodeStore<T>,
    flat: FlatSequence,
    expansion: ExpansionIndex,
    selection: SelectionSet,
    ledger: RemovalLedger,
    settings: AdapterSettings,
    listener: Box<dyn ChangeListener>,
    /// Set while `remove_batch` runs
    multi_remove: bool,
    /// Set while a range removal holds back its notifications
    buffering: bool,
    buffered: Vec<Notification>,
    /// Bumped on every structural mutation
    generation: u64,
    scroll_requests: Vec<AutoScrollRequest>,
}

impl<T> ExpandableAdapter<T> {
    /// Creates an adapter with default settings.
    ///
    /// Parents whose entry is marked `expanded` and that own children start
    /// expanded. No notifications are emitted for the initial load.
    #[must_use]
    pub fn new(items: Vec<ParentEntry<T>>) -> Self {
        Self::with_settings(items, AdapterSettings::default())
    }

    /// Creates an adapter with explicit settings
    #[must_use]
    pub fn with_settings(items: Vec<ParentEntry<T>>, settings: AdapterSettings) -> Self {
        let mut adapter = Self {
            store: NodeStore::new(),
            flat: FlatSequence::new(),
            expansion: ExpansionIndex::new(),
            selection: SelectionSet::new(),
            ledger: RemovalLedger::new(),
            settings,
            listener: Box::new(NoOpListener),
            multi_remove: false,
            buffering: false,
            buffered: Vec::new(),
            generation: 0,
            scroll_requests: Vec::new(),
        };
        adapter.load(items);
        adapter
    }

    /// Replaces the change listener
    pub fn set_listener(&mut self, listener: impl ChangeListener + 'static) {
        self.listener = Box::new(listener);
    }

    /// Returns the active settings
    #[must_use]
    pub const fn settings(&self) -> &AdapterSettings {
        &self.settings
    }

    /// Replaces the settings; takes effect for the next operation
    pub fn set_settings(&mut self, settings: AdapterSettings) {
        self.settings = settings;
    }

    /// Structural generation, bumped on every mutation of the flat sequence
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true while a batch removal is running
    #[must_use]
    pub const fn is_multi_remove(&self) -> bool {
        self.multi_remove
    }

    /// Number of rows in the flat sequence
    #[must_use]
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    /// Returns true if the flat sequence is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Node id at `pos`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn at(&self, pos: usize) -> AdapterResult<NodeId> {
        self.flat.at(pos)
    }

    /// Node at `pos`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn node(&self, pos: usize) -> AdapterResult<&Node<T>> {
        let id = self.flat.at(pos)?;
        self.store.require(id)
    }

    /// Payload of the row at `pos`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn payload(&self, pos: usize) -> AdapterResult<&T> {
        self.node(pos).map(Node::payload)
    }

    /// Looks up any node known to the adapter, visible or not
    #[must_use]
    pub fn node_by_id(&self, id: NodeId) -> Option<&Node<T>> {
        self.store.get(id)
    }

    /// Mutable access to a node's payload and flags
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.store.get_mut(id)
    }

    /// Row classification for view-type dispatch
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos >= len()`.
    pub fn row_kind(&self, pos: usize) -> AdapterResult<RowKind> {
        self.node(pos).map(Node::row_kind)
    }

    /// Flat position of `node`, if it is visible
    #[must_use]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.flat.index_of(node)
    }

    /// The flat sequence as node ids
    #[must_use]
    pub fn rows(&self) -> &[NodeId] {
        self.flat.as_slice()
    }

    /// Drains the auto-scroll requests queued by expansions
    pub fn take_scroll_requests(&mut self) -> Vec<AutoScrollRequest> {
        std::mem::take(&mut self.scroll_requests)
    }

    /// Checks that the flat sequence, expansion index and selection agree.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the first disagreement found.
    pub fn validate(&self) -> AdapterResult<()> {
        let mut spliced = 0;
        for (pos, parent_id) in self.expansion.iter() {
            let parent = self.store.require(parent_id)?;
            if self.flat.at(pos)? != parent_id {
                return Err(Self::violation(format!(
                    "expansion entry {pos} does not point at {parent_id}"
                )));
            }
            if !parent.is_expanded() {
                return Err(Self::violation(format!("{parent_id} indexed but not expanded")));
            }
            for (offset, child) in parent.children().iter().enumerate() {
                if self.flat.at(pos + 1 + offset)? != *child {
                    return Err(Self::violation(format!(
                        "child {offset} of {parent_id} not at position {}",
                        pos + 1 + offset
                    )));
                }
            }
            spliced += parent.children().len();
        }

        let mut parents = 0;
        for (pos, id) in self.flat.iter().enumerate() {
            let node = self.store.require(id)?;
            if node.is_parent() {
                parents += 1;
                if node.is_expanded() != self.expansion.contains(pos) {
                    return Err(Self::violation(format!(
                        "expanded flag of {id} disagrees with the expansion index"
                    )));
                }
            }
        }
        if parents + spliced != self.flat.len() {
            return Err(Self::violation(format!(
                "{} rows but {parents} parents and {spliced} spliced children",
                self.flat.len()
            )));
        }

        if self.selection.any_parent_selected() && self.selection.any_child_selected() {
            return Err(Self::violation("parent and child rows selected together".to_string()));
        }
        for pos in self.selection.positions() {
            if pos >= self.flat.len() {
                return Err(Self::violation(format!("selected position {pos} out of range")));
            }
        }
        Ok(())
    }

    fn load(&mut self, items: Vec<ParentEntry<T>>) {
        for entry in items {
            let expanded = entry.expanded;
            let parent = self.insert_entry(entry);
            self.flat.push(parent);
            if expanded && self.store.get(parent).is_some_and(Node::has_children) {
                let pos = self.flat.len() - 1;
                let children = self.children_of(parent);
                self.flat.extend(children);
                self.expansion.insert(pos, parent);
                if let Some(node) = self.store.get_mut(parent) {
                    node.set_expanded(true);
                }
            }
        }
        tracing::debug!(
            rows = self.flat.len(),
            expanded = self.expansion.len(),
            "Loaded items"
        );
    }

    /// Stores a parent entry and its children, returning the parent id
    fn insert_entry(&mut self, entry: ParentEntry<T>) -> NodeId {
        let mut parent = Node::parent(entry.payload)
            .with_selectable(entry.selectable)
            .with_hidden(entry.hidden);
        let children: Vec<NodeId> = entry
            .children
            .into_iter()
            .map(|child| {
                self.store.insert(
                    Node::child(child.payload)
                        .with_selectable(child.selectable)
                        .with_hidden(child.hidden),
                )
            })
            .collect();
        if let Some(list) = parent.children_mut() {
            *list = children;
        }
        self.store.insert(parent)
    }

    /// Owned child ids of `parent`, empty if unknown
    fn children_of(&self, parent: NodeId) -> Vec<NodeId> {
        self.store
            .get(parent)
            .map(|node| node.children().to_vec())
            .unwrap_or_default()
    }

    /// Runs the reconciler and bumps the generation
    fn apply_shift(&mut self, shift: Shift) {
        if shift.is_empty() {
            return;
        }
        let result = reconcile(
            shift,
            &mut self.selection,
            &mut self.expansion,
            &mut self.ledger,
        );
        if !result.deselected.is_empty() {
            tracing::debug!(
                positions = ?result.deselected,
                "Dropped selection of removed rows"
            );
        }
        for (pos, parent) in result.stale_expansions {
            tracing::error!(
                position = pos,
                parent = %parent,
                "Expanded parent removed without collapsing"
            );
            if let Some(node) = self.store.get_mut(parent) {
                node.set_expanded(false);
            }
        }
        self.generation += 1;
    }

    /// Delivers or buffers a notification
    fn notify(&mut self, event: ChangeEvent) {
        let notification = Notification {
            event,
            multi_remove: self.multi_remove,
        };
        if self.buffering {
            self.buffered.push(notification);
        } else {
            self.listener.on_change(&notification);
        }
    }

    /// Releases notifications held back by a range removal
    fn flush(&mut self) {
        self.buffering = false;
        for notification in std::mem::take(&mut self.buffered) {
            self.listener.on_change(&notification);
        }
    }

    /// Logs and builds an invariant violation
    fn violation(message: String) -> AdapterError {
        tracing::error!("{message}");
        AdapterError::InvariantViolation(message)
    }
}

impl<T: fmt::Debug> fmt::Debug for ExpandableAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandableAdapter")
            .field("flat", &self.flat)
            .field("expansion", &self.expansion)
            .field("selection", &self.selection)
            .field("ledger", &self.ledger)
            .field("settings", &self.settings)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

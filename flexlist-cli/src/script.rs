//! Scripted adapter operations
//!
//! A script is a JSON array of operations tagged by `op`, for example
//! `[{"op":"expand","position":1},{"op":"remove","position":2}]`.

use flexlist_core::{AdapterResult, ChildEntry, ExpandableAdapter, ParentEntry};
use serde::{Deserialize, Serialize};

/// One adapter call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Expand the parent at `position`
    Expand {
        /// Flat position
        position: usize,
    },
    /// Collapse the parent at `position`
    Collapse {
        /// Flat position
        position: usize,
    },
    /// Expand every parent
    ExpandAll,
    /// Collapse every parent
    CollapseAll,
    /// Toggle the selection of a row
    Toggle {
        /// Flat position
        position: usize,
    },
    /// Select every row of the active level
    SelectAll,
    /// Deselect everything
    ClearSelection,
    /// Remove one row
    Remove {
        /// Flat position
        position: usize,
        /// Notify the owning parent of a removed child
        #[serde(default)]
        notify_parent: bool,
    },
    /// Remove consecutive rows
    RemoveRange {
        /// First position
        start: usize,
        /// Number of rows
        count: usize,
        /// Notify the owning parent of removed children
        #[serde(default)]
        notify_parent: bool,
    },
    /// Remove arbitrary positions in one batch
    RemoveBatch {
        /// Positions to remove
        positions: Vec<usize>,
        /// Notify the owning parent of removed children
        #[serde(default)]
        notify_parent: bool,
    },
    /// Remove every selected row
    RemoveSelected {
        /// Notify the owning parent of removed children
        #[serde(default)]
        notify_parent: bool,
    },
    /// Undo every pending removal
    Restore,
    /// Make pending removals permanent
    Commit,
    /// Insert a collapsed parent
    AddParent {
        /// Flat position
        position: usize,
        /// Parent payload
        payload: String,
        /// Child payloads
        #[serde(default)]
        children: Vec<String>,
    },
    /// Insert a child under the parent at `parent`
    AddChild {
        /// Flat position of the parent
        parent: usize,
        /// Index in the parent's child list; appended when past the end
        #[serde(default = "usize_max")]
        index: usize,
        /// Child payload
        payload: String,
        /// Expand the parent afterwards
        #[serde(default)]
        expand_parent: bool,
        /// Notify the parent
        #[serde(default)]
        notify_parent: bool,
    },
}

const fn usize_max() -> usize {
    usize::MAX
}

impl Operation {
    /// Short operation name used in output and errors
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Expand { .. } => "expand",
            Self::Collapse { .. } => "collapse",
            Self::ExpandAll => "expand_all",
            Self::CollapseAll => "collapse_all",
            Self::Toggle { .. } => "toggle",
            Self::SelectAll => "select_all",
            Self::ClearSelection => "clear_selection",
            Self::Remove { .. } => "remove",
            Self::RemoveRange { .. } => "remove_range",
            Self::RemoveBatch { .. } => "remove_batch",
            Self::RemoveSelected { .. } => "remove_selected",
            Self::Restore => "restore",
            Self::Commit => "commit",
            Self::AddParent { .. } => "add_parent",
            Self::AddChild { .. } => "add_child",
        }
    }

    /// Applies the operation and returns its numeric outcome: rows or
    /// parents affected, or 1/0 for boolean results.
    ///
    /// # Errors
    ///
    /// Propagates the adapter error of the underlying call.
    pub fn apply(&self, adapter: &mut ExpandableAdapter<String>) -> AdapterResult<usize> {
        match self {
            Self::Expand { position } => adapter.expand(*position),
            Self::Collapse { position } => adapter.collapse(*position),
            Self::ExpandAll => adapter.expand_all(),
            Self::CollapseAll => adapter.collapse_all(),
            Self::Toggle { position } => adapter.toggle(*position).map(usize::from),
            Self::SelectAll => Ok(adapter.select_all(None)),
            Self::ClearSelection => Ok(adapter.clear_selection()),
            Self::Remove {
                position,
                notify_parent,
            } => adapter.remove(*position, *notify_parent).map(usize::from),
            Self::RemoveRange {
                start,
                count,
                notify_parent,
            } => adapter.remove_range(*start, *count, *notify_parent),
            Self::RemoveBatch {
                positions,
                notify_parent,
            } => adapter.remove_batch(positions, *notify_parent),
            Self::RemoveSelected { notify_parent } => adapter.remove_all_selected(*notify_parent),
            Self::Restore => adapter.restore_all(),
            Self::Commit => Ok(adapter.commit()),
            Self::AddParent {
                position,
                payload,
                children,
            } => {
                let entry = ParentEntry::new(payload.clone()).with_children(children.iter().cloned());
                adapter.add_parent(*position, entry).map(|_| 1)
            }
            Self::AddChild {
                parent,
                index,
                payload,
                expand_parent,
                notify_parent,
            } => adapter
                .add_child(
                    *parent,
                    *index,
                    ChildEntry::new(payload.clone()),
                    *expand_parent,
                    *notify_parent,
                )
                .map(|_| 1),
        }
    }
}

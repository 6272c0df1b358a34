//! Export and import of adapter state across process restarts
//!
//! Only positions are persisted. On import the expansions are replayed
//! first, in recorded order, so that selected child positions point at the
//! same rows they did when the state was exported.

use serde::{Deserialize, Serialize};

use crate::adapter::ExpandableAdapter;
use crate::error::{StateError, StateResult};

/// Persisted expansion and selection positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterState {
    /// Positions of expanded parents, ascending
    #[serde(default)]
    pub expanded: Vec<usize>,
    /// Selected positions, ascending
    #[serde(default)]
    pub selected: Vec<usize>,
}

impl AdapterState {
    /// Returns true if nothing is expanded or selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty() && self.selected.is_empty()
    }

    /// Encodes the state as JSON
    ///
    /// # Errors
    ///
    /// Returns `StateError::Serialize` if encoding fails.
    pub fn to_json(&self) -> StateResult<String> {
        serde_json::to_string(self).map_err(StateError::Serialize)
    }

    /// Decodes a state from JSON
    ///
    /// # Errors
    ///
    /// Returns `StateError::Deserialize` if the JSON is malformed.
    pub fn from_json(json: &str) -> StateResult<Self> {
        serde_json::from_str(json).map_err(StateError::Deserialize)
    }
}

impl<T> ExpandableAdapter<T> {
    /// Captures expanded and selected positions
    #[must_use]
    pub fn export_state(&self) -> AdapterState {
        AdapterState {
            expanded: self.expanded_positions(),
            selected: self.selected_positions(),
        }
    }

    /// Replays `state`: expansions first, then the selection.
    ///
    /// Positions that no longer describe an expandable or selectable row are
    /// skipped silently.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Adapter` if a recorded position is out of bounds.
    pub fn import_state(&mut self, state: &AdapterState) -> StateResult<()> {
        let mut expanded = 0;
        for &pos in &state.expanded {
            if self.expand(pos)? > 0 {
                expanded += 1;
            }
        }
        let mut selected = 0;
        for &pos in &state.selected {
            if self.select(pos)? {
                selected += 1;
            }
        }
        tracing::debug!(expanded, selected, "Imported adapter state");
        Ok(())
    }
}

//! Change notifications for the view layer
//!
//! The adapter reports every visible structural change as a contiguous
//! range event. Views only need these events (and [`crate::RowKind`]) to
//! re-render.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// A logical change of the flat sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// `count` rows were inserted starting at `start`
    ItemsInserted {
        /// First inserted position
        start: usize,
        /// Number of inserted rows
        count: usize,
    },
    /// `count` rows were removed starting at `start`
    ItemsRemoved {
        /// First removed position
        start: usize,
        /// Number of removed rows
        count: usize,
    },
    /// The row at `position` must be re-bound
    ItemChanged {
        /// Position of the changed row
        position: usize,
    },
    /// Everything changed; selection, expansion and ledger were cleared
    DataSetInvalidated,
}

/// A change event together with the adapter context it was emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The change
    pub event: ChangeEvent,
    /// True while a multi-position batch removal is running
    pub multi_remove: bool,
}

/// Receives change notifications from the adapter.
pub trait ChangeListener {
    /// Called once per change, after positions have been reconciled
    fn on_change(&mut self, notification: &Notification);
}

/// Listener that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpListener;

impl ChangeListener for NoOpListener {
    fn on_change(&mut self, _notification: &Notification) {}
}

/// Listener that forwards notifications to a closure
pub struct CallbackListener<F>
where
    F: FnMut(&Notification),
{
    callback: F,
}

impl<F> CallbackListener<F>
where
    F: FnMut(&Notification),
{
    /// Wraps `callback`
    pub const fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ChangeListener for CallbackListener<F>
where
    F: FnMut(&Notification),
{
    fn on_change(&mut self, notification: &Notification) {
        (self.callback)(notification);
    }
}

/// Listener that stores every notification in a shared log.
///
/// Clones share the same log, so one clone can be handed to the adapter
/// while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingListener {
    /// Creates a listener with an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded notification
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the recorded events without their context
    #[must_use]
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.notifications().into_iter().map(|n| n.event).collect()
    }

    /// Removes and returns every recorded notification
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.log.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl ChangeListener for RecordingListener {
    fn on_change(&mut self, notification: &Notification) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*notification);
    }
}

//! `FlexList` Core Library
//!
//! This crate provides the model behind an expandable two-level list: a
//! flat, position-addressed view of parents and their children, with
//! expand/collapse, exclusive selection, undoable removal and change
//! notifications for a view layer.
//!
//! # Crate Structure
//!
//! - [`adapter`] - [`ExpandableAdapter`], the public entry point
//! - [`models`] - Nodes, node ids and bulk-load entries
//! - [`flat`] / [`expansion`] / [`selection`] / [`ledger`] - position stores
//! - [`reconcile`] - keeps the position stores in step with the flat sequence
//! - [`notify`] - Change events and listeners
//! - [`scroll`] - Auto-scroll target computation
//! - [`config`] - Adapter policy settings and persistence
//! - [`state`] - Exporting and importing expansion/selection state
//! - [`tracing`] - Structured logging setup
//!
//! # Example
//!
//! ```
//! use flexlist_core::{ExpandableAdapter, ParentEntry};
//!
//! let mut adapter = ExpandableAdapter::new(vec![
//!     ParentEntry::new("fruit").with_children(["apple", "pear"]),
//!     ParentEntry::new("veg"),
//! ]);
//! assert_eq!(adapter.expand(0).unwrap(), 2);
//! assert_eq!(adapter.len(), 4);
//! assert!(adapter.remove(1, true).unwrap());
//! assert_eq!(adapter.restore_all().unwrap(), 1);
//! assert_eq!(adapter.payload(1).unwrap(), &"apple");
//! ```

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod adapter;
pub mod config;
pub mod error;
pub mod expansion;
pub mod flat;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod reconcile;
pub mod scroll;
pub mod selection;
pub mod state;
pub mod tracing;

pub use adapter::ExpandableAdapter;
pub use config::{AdapterSettings, ConfigManager, DEFAULT_SCROLL_DELAY_MS, ScrollTieBreak};
pub use error::{
    AdapterError, AdapterResult, ConfigError, ConfigResult, FlexListError, StateError,
    StateResult,
};
pub use expansion::ExpansionIndex;
pub use flat::FlatSequence;
pub use ledger::{RemovalLedger, RemovalOrigin, RemovalRecord};
pub use models::{ChildEntry, Node, NodeId, NodeKind, NodeStore, ParentEntry, RowKind};
pub use notify::{
    CallbackListener, ChangeEvent, ChangeListener, NoOpListener, Notification,
    RecordingListener,
};
pub use reconcile::{Reconciliation, Shift, reconcile};
pub use scroll::{AutoScrollRequest, FixedViewport, Viewport, scroll_target};
pub use selection::SelectionSet;
pub use state::AdapterState;
pub use self::tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, init_tracing,
};

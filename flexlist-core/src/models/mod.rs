//! Item model for the two-level tree
//!
//! - [`Node`] - a parent or child with flags and a user payload
//! - [`NodeStore`] - owns every node by [`NodeId`]
//! - [`ParentEntry`] / [`ChildEntry`] - bulk-load descriptions

mod node;
mod store;

pub use node::{ChildEntry, Node, NodeId, NodeKind, ParentEntry, RowKind};
pub use store::NodeStore;

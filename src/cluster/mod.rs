//! Cluster topology model
//!
//! This module provides:
//! - Node, namespace and set models built from info replies
//! - Set dialect detection (legacy and modern key names)
//! - Per-refresh snapshot building with cross-node aggregation
//! - Snapshot publication to concurrent readers
//! - A tree view for display layers

pub mod dialect;
pub mod entity;
pub mod namespace;
pub mod node;
pub mod topology;
pub mod topology_manager;

pub use dialect::SetDialect;
pub use entity::{Folder, TreeEntity, TreeItem};
pub use namespace::Namespace;
pub use node::ClusterNode;
pub use topology::{ClusterSnapshot, SnapshotBuilder};
pub use topology_manager::SnapshotManager;

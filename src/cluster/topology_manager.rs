//! Snapshot publication
//!
//! Refreshes build a new [`ClusterSnapshot`] off to the side and swap it in
//! whole. Readers clone the `Arc` and never see a half-merged refresh.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::info;

use super::topology::{ClusterSnapshot, SnapshotBuilder};
use crate::utils::ClusterError;

/// Shared holder of the latest published snapshot
pub struct SnapshotManager {
    /// Latest snapshot, `None` until the first publish
    current: RwLock<Option<Arc<ClusterSnapshot>>>,

    /// Publish counter, 0 before the first publish
    version: AtomicU64,
}

impl SnapshotManager {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            version: AtomicU64::new(0),
        }
    }

    /// Get current snapshot version
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Latest published snapshot
    pub fn current(&self) -> Option<Arc<ClusterSnapshot>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replace the published snapshot, returning the new version
    pub fn publish(&self, snapshot: ClusterSnapshot) -> u64 {
        self.store(Arc::new(snapshot))
    }

    /// Finish a refresh and publish its result
    ///
    /// On error the previous snapshot stays published.
    pub fn refresh(&self, builder: SnapshotBuilder) -> Result<Arc<ClusterSnapshot>, ClusterError> {
        let snapshot = Arc::new(builder.build()?);
        let version = self.store(Arc::clone(&snapshot));
        info!(
            "Published cluster snapshot v{}: {} nodes, {} namespaces",
            version,
            snapshot.node_count(),
            snapshot.namespaces.len()
        );
        Ok(snapshot)
    }

    fn store(&self, snapshot: Arc<ClusterSnapshot>) -> u64 {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(snapshot);
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl Default for SnapshotManager {
    fn default() -> Self {
        Self::new()
    }
}

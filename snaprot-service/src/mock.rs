//! In-memory snapshot service for tests.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::service::{ServiceError, SnapshotRecord, SnapshotService};

/// In-memory mock of the remote snapshot service.
///
/// Clones share state through an `Arc`, so a test can keep one handle for
/// assertions while the code under test owns another. Created snapshots get
/// sequential ids and creation times advancing one second per create,
/// starting from the value set with [`set_next_created_at`].
///
/// [`set_next_created_at`]: MockSnapshotService::set_next_created_at
#[derive(Debug, Clone, Default)]
pub struct MockSnapshotService {
    inner: Arc<RwLock<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    snapshots: Vec<SnapshotRecord>,
    deleted_ids: Vec<String>,
    next_id: u64,
    next_created_at: i64,
}

impl MockSnapshotService {
    /// Create an empty mock service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service pre-seeded with snapshots.
    pub fn with_snapshots(snapshots: Vec<SnapshotRecord>) -> Self {
        let service = Self::new();
        for record in snapshots {
            service.add_snapshot(record);
        }
        service
    }

    /// Add one snapshot to the service state.
    pub fn add_snapshot(&self, record: SnapshotRecord) {
        self.inner.write().unwrap().snapshots.push(record);
    }

    /// Set the creation time assigned to the next created snapshot.
    pub fn set_next_created_at(&self, unix_sec: i64) {
        self.inner.write().unwrap().next_created_at = unix_sec;
    }

    /// Current service state, in listing order.
    pub fn snapshots(&self) -> Vec<SnapshotRecord> {
        self.inner.read().unwrap().snapshots.clone()
    }

    /// Ids deleted so far, in deletion order.
    pub fn deleted_ids(&self) -> Vec<String> {
        self.inner.read().unwrap().deleted_ids.clone()
    }
}

#[async_trait]
impl SnapshotService for MockSnapshotService {
    async fn create(
        &self,
        volume_id: &str,
        description: &str,
    ) -> Result<SnapshotRecord, ServiceError> {
        let mut state = self.inner.write().unwrap();
        state.next_id += 1;
        let record = SnapshotRecord {
            id: format!("snap-{:08x}", state.next_id),
            volume_id: volume_id.to_string(),
            description: description.to_string(),
            created_at: state.next_created_at,
        };
        state.next_created_at += 1;
        state.snapshots.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<SnapshotRecord>, ServiceError> {
        Ok(self.inner.read().unwrap().snapshots.clone())
    }

    async fn delete(&self, snapshot_id: &str) -> Result<(), ServiceError> {
        let mut state = self.inner.write().unwrap();
        match state.snapshots.iter().position(|s| s.id == snapshot_id) {
            Some(index) => {
                state.snapshots.remove(index);
                state.deleted_ids.push(snapshot_id.to_string());
                Ok(())
            }
            None => Err(ServiceError::DeleteFailed {
                snapshot_id: snapshot_id.to_string(),
                message: "snapshot does not exist".to_string(),
            }),
        }
    }
}

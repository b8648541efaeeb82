//! The contract between rotation logic and the remote snapshot service.

use async_trait::async_trait;
use thiserror::Error;

/// A snapshot as reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    /// Opaque identifier assigned by the service, unique for its lifetime.
    pub id: String,
    /// Volume the snapshot belongs to.
    pub volume_id: String,
    /// Free-text description set at creation, immutable afterwards.
    pub description: String,
    /// Service-assigned creation time, Unix seconds.
    pub created_at: i64,
}

/// Errors from remote snapshot operations.
///
/// Every variant is fatal to the run. Retry policy, if any, belongs to the
/// transport underneath the service implementation, not here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("create snapshot failed for volume {volume_id}: {message}")]
    CreateFailed { volume_id: String, message: String },

    #[error("list snapshots failed: {message}")]
    ListFailed { message: String },

    #[error("delete snapshot failed for {snapshot_id}: {message}")]
    DeleteFailed {
        snapshot_id: String,
        message: String,
    },
}

/// Remote snapshot management operations.
///
/// Calls are issued strictly one at a time by the rotation flow; the trait is
/// async because the production client is, not because calls overlap.
#[async_trait]
pub trait SnapshotService: Send + Sync {
    /// Create a snapshot of `volume_id` carrying `description`.
    async fn create(
        &self,
        volume_id: &str,
        description: &str,
    ) -> Result<SnapshotRecord, ServiceError>;

    /// List every snapshot visible to the caller's credentials.
    ///
    /// The service does not pre-filter by volume; callers filter the result.
    async fn list(&self) -> Result<Vec<SnapshotRecord>, ServiceError>;

    /// Delete the snapshot with the given id. Fails if the id is unknown or
    /// the service rejects the delete.
    async fn delete(&self, snapshot_id: &str) -> Result<(), ServiceError>;
}

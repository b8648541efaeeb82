//! Retention planning and the rotation pass.
//!
//! Rotation considers only snapshots of the configured volume whose
//! description ends with the rotation marker, orders them by creation time,
//! and deletes the oldest ones beyond the retention count.

use snaprot_log::Logger;
use snaprot_service::{ServiceError, SnapshotRecord, SnapshotService};
use thiserror::Error;

/// Errors from the rotation step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RotateError {
    /// A remote list or delete call failed.
    #[error("snapshot service error: {0}")]
    Service(#[from] ServiceError),

    /// Nothing matched the volume + marker filter.
    #[error("no snapshots of volume {volume_id} match rotation marker {marker:?}")]
    NoMatchingSnapshots { volume_id: String, marker: String },
}

/// Deletions and survivors decided for one rotation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPlan {
    /// Snapshots to delete, oldest first.
    pub delete: Vec<SnapshotRecord>,
    /// Snapshots that stay, oldest first.
    pub keep: Vec<SnapshotRecord>,
    /// The most recently created matching snapshot.
    pub latest: SnapshotRecord,
}

/// Outcome of a completed rotation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationOutcome {
    /// Snapshots deleted, oldest first.
    pub deleted: Vec<SnapshotRecord>,
    /// Snapshots retained, oldest first.
    pub retained: Vec<SnapshotRecord>,
}

/// Decide which snapshots a rotation pass deletes and which it keeps.
///
/// Filters `snapshots` to those of `volume_id` whose description ends with
/// the literal `marker` (no pattern interpretation), sorts ascending by
/// creation time (stable, so listing order breaks ties), and marks the
/// oldest `len - retain` for deletion.
///
/// An empty filtered set is an error: a rotation pass runs right after a
/// snapshot was created, so the caller expects a latest snapshot to exist.
pub fn plan_rotation(
    snapshots: Vec<SnapshotRecord>,
    volume_id: &str,
    marker: &str,
    retain: usize,
) -> Result<RotationPlan, RotateError> {
    let mut matching: Vec<SnapshotRecord> = snapshots
        .into_iter()
        .filter(|s| s.volume_id == volume_id && s.description.ends_with(marker))
        .collect();
    matching.sort_by_key(|s| s.created_at);

    let latest = match matching.last() {
        Some(record) => record.clone(),
        None => {
            return Err(RotateError::NoMatchingSnapshots {
                volume_id: volume_id.to_string(),
                marker: marker.to_string(),
            })
        }
    };

    let excess = matching.len().saturating_sub(retain);
    let keep = matching.split_off(excess);

    Ok(RotationPlan {
        delete: matching,
        keep,
        latest,
    })
}

/// Run one rotation pass: list, plan, delete the excess oldest snapshots.
///
/// Logs the latest matching snapshot before deleting, one line per deletion
/// as it is issued, and a final done line. The first failed delete aborts
/// the pass with the service error; deletes already issued are not rolled
/// back.
pub async fn rotate<S, L>(
    service: &S,
    logger: &L,
    volume_id: &str,
    marker: &str,
    retain: usize,
) -> Result<RotationOutcome, RotateError>
where
    S: SnapshotService,
    L: Logger,
{
    let snapshots = service.list().await?;
    let plan = plan_rotation(snapshots, volume_id, marker, retain)?;

    logger.info(&format!(
        "latest snapshot: {} ({})",
        plan.latest.description, plan.latest.id
    ));

    for snapshot in &plan.delete {
        logger.info(&format!(
            "delete snapshot: {} ({})",
            snapshot.description, snapshot.id
        ));
        service.delete(&snapshot.id).await?;
    }

    logger.info("done.");

    Ok(RotationOutcome {
        deleted: plan.delete,
        retained: plan.keep,
    })
}

//! Snapshot creation step.

use snaprot_clock::Clock;
use snaprot_log::Logger;
use snaprot_service::{ServiceError, SnapshotRecord, SnapshotService};
use thiserror::Error;

use crate::description::build_description;

/// Errors from the creation step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreateError {
    /// The remote create call failed.
    #[error("snapshot service error: {0}")]
    Service(#[from] ServiceError),
}

/// Create one snapshot of `volume_id`, described as
/// `"{base_description} {timestamp} {marker}"` with the timestamp read from
/// `clock` at call time.
///
/// Logs one info line on success. A service failure aborts the run; there is
/// no retry.
pub async fn create_snapshot<S, C, L>(
    service: &S,
    clock: &C,
    logger: &L,
    volume_id: &str,
    base_description: &str,
    marker: &str,
) -> Result<SnapshotRecord, CreateError>
where
    S: SnapshotService,
    C: Clock,
    L: Logger,
{
    let description = build_description(base_description, clock.now_unix_sec(), marker);
    let record = service.create(volume_id, &description).await?;
    logger.info(&format!(
        "snapshot created: {} ({})",
        record.description, record.id
    ));
    Ok(record)
}

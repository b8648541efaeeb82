//! Command execution for the snaprot binary.
//!
//! A run is one create followed by one rotation. The flow is generic over
//! its collaborators so the whole thing runs unchanged against the
//! in-memory service and mock logger in tests.

use snaprot_clock::Clock;
use snaprot_core::{create_snapshot, rotate, CreateError, RotateError, RotationOutcome};
use snaprot_log::Logger;
use snaprot_service::{SnapshotRecord, SnapshotService};
use thiserror::Error;

use crate::config::SnapshotConfig;

/// Errors from command execution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("snapshot creation failed: {0}")]
    Create(#[from] CreateError),

    #[error("snapshot rotation failed: {0}")]
    Rotate(#[from] RotateError),
}

/// Outcome of one full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// The snapshot created by this run.
    pub created: SnapshotRecord,
    /// What rotation deleted and retained.
    pub rotation: RotationOutcome,
}

/// Create one snapshot of the configured volume, then rotate.
///
/// `rotate_tag_override` replaces the configured marker in the new
/// snapshot's description only; the deletion filter always uses the
/// configured marker. A snapshot created with an override therefore falls
/// outside the rotation policy and survives later runs.
pub async fn execute_rotation<S, C, L>(
    service: &S,
    clock: &C,
    logger: &L,
    config: &SnapshotConfig,
    rotate_tag_override: Option<&str>,
) -> Result<RunSummary, CommandError>
where
    S: SnapshotService,
    C: Clock,
    L: Logger,
{
    let create_marker = rotate_tag_override.unwrap_or(&config.rotate_tag);

    let created = create_snapshot(
        service,
        clock,
        logger,
        &config.volume_id,
        &config.description,
        create_marker,
    )
    .await?;

    let rotation = rotate(
        service,
        logger,
        &config.volume_id,
        &config.rotate_tag,
        config.retain,
    )
    .await?;

    Ok(RunSummary { created, rotation })
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use snaprot_clock::FixedClock;
    use snaprot_log::MockLogger;
    use snaprot_service::{MockSnapshotService, ServiceError};

    const VOLUME: &str = "vol-abcde123";

    // 2024-05-01 10:15:30 UTC
    const NOW: u64 = 1_714_558_530;

    fn config() -> SnapshotConfig {
        SnapshotConfig {
            access_key: "AKIAEXAMPLE".to_string(),
            secret_key: "secret/example".to_string(),
            region: "ap-northeast-1".to_string(),
            volume_id: VOLUME.to_string(),
            description: "www.example.com backup".to_string(),
            retain: 5,
            rotate_tag: "[rotate]".to_string(),
            log_file: None,
        }
    }

    fn seeded(count: usize) -> MockSnapshotService {
        let snapshots = (0..count)
            .map(|i| SnapshotRecord {
                id: format!("snap-t{}", i + 1),
                volume_id: VOLUME.to_string(),
                description: format!("www.example.com backup seed-{} [rotate]", i + 1),
                created_at: 100 * (i as i64 + 1),
            })
            .collect();
        let service = MockSnapshotService::with_snapshots(snapshots);
        service.set_next_created_at(NOW as i64);
        service
    }

    struct FailingCreateService;

    #[async_trait]
    impl SnapshotService for FailingCreateService {
        async fn create(
            &self,
            volume_id: &str,
            _description: &str,
        ) -> Result<SnapshotRecord, ServiceError> {
            Err(ServiceError::CreateFailed {
                volume_id: volume_id.to_string(),
                message: "request timed out".to_string(),
            })
        }

        async fn list(&self) -> Result<Vec<SnapshotRecord>, ServiceError> {
            Ok(Vec::new())
        }

        async fn delete(&self, _snapshot_id: &str) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    // ------------------------------------------------------------
    // Full runs
    // ------------------------------------------------------------

    #[tokio::test]
    async fn test_run_deletes_excess_oldest_snapshots() {
        let service = seeded(6);
        let clock = FixedClock::new(NOW);
        let logger = MockLogger::new();

        let summary = execute_rotation(&service, &clock, &logger, &config(), None)
            .await
            .unwrap();

        // Six seeds plus the new snapshot, five retained.
        assert_eq!(summary.rotation.deleted.len(), 2);
        assert_eq!(summary.rotation.deleted[0].id, "snap-t1");
        assert_eq!(summary.rotation.deleted[1].id, "snap-t2");
        assert_eq!(summary.rotation.retained.len(), 5);
        assert_eq!(service.deleted_ids(), vec!["snap-t1", "snap-t2"]);
        assert_eq!(service.snapshots().len(), 5);
    }

    #[tokio::test]
    async fn test_run_created_snapshot_is_newest_retained() {
        let service = seeded(6);
        let clock = FixedClock::new(NOW);
        let logger = MockLogger::new();

        let summary = execute_rotation(&service, &clock, &logger, &config(), None)
            .await
            .unwrap();

        assert_eq!(
            summary.created.description,
            "www.example.com backup 2024-05-01 10:15:30 [rotate]"
        );
        let last = summary.rotation.retained.last().unwrap();
        assert_eq!(last.id, summary.created.id);
        assert!(logger
            .messages()
            .iter()
            .any(|m| m.contains("latest snapshot:") && m.contains(&summary.created.id)));
    }

    #[tokio::test]
    async fn test_run_under_retention_deletes_nothing() {
        let service = seeded(2);
        let clock = FixedClock::new(NOW);
        let logger = MockLogger::new();

        let summary = execute_rotation(&service, &clock, &logger, &config(), None)
            .await
            .unwrap();

        assert!(summary.rotation.deleted.is_empty());
        assert_eq!(summary.rotation.retained.len(), 3);
        assert!(service.deleted_ids().is_empty());
    }

    // ------------------------------------------------------------
    // Marker override
    // ------------------------------------------------------------

    #[tokio::test]
    async fn test_override_marks_new_snapshot_only() {
        let service = seeded(6);
        let clock = FixedClock::new(NOW);
        let logger = MockLogger::new();

        let summary = execute_rotation(&service, &clock, &logger, &config(), Some("[keep]"))
            .await
            .unwrap();

        assert!(summary.created.description.ends_with("[keep]"));
        // The new snapshot does not match the configured marker, so only
        // the six seeds rotate and one is deleted.
        assert_eq!(summary.rotation.deleted.len(), 1);
        assert_eq!(summary.rotation.deleted[0].id, "snap-t1");
        assert!(!summary
            .rotation
            .retained
            .iter()
            .any(|s| s.id == summary.created.id));
        assert!(service.snapshots().iter().any(|s| s.id == summary.created.id));
    }

    #[tokio::test]
    async fn test_override_with_no_matching_snapshots() {
        let service = MockSnapshotService::new();
        let clock = FixedClock::new(NOW);
        let logger = MockLogger::new();

        let err = execute_rotation(&service, &clock, &logger, &config(), Some("[keep]"))
            .await
            .unwrap_err();

        // The create side effect stands even though rotation failed.
        assert!(matches!(
            err,
            CommandError::Rotate(RotateError::NoMatchingSnapshots { .. })
        ));
        assert_eq!(service.snapshots().len(), 1);
        assert!(service.deleted_ids().is_empty());
    }

    // ------------------------------------------------------------
    // Failure propagation
    // ------------------------------------------------------------

    #[tokio::test]
    async fn test_create_failure_stops_the_run() {
        let service = FailingCreateService;
        let clock = FixedClock::new(NOW);
        let logger = MockLogger::new();

        let err = execute_rotation(&service, &clock, &logger, &config(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::Create(_)));
        assert_eq!(logger.count(), 0);
    }

    #[tokio::test]
    async fn test_command_error_display() {
        let err = CommandError::Create(CreateError::Service(ServiceError::CreateFailed {
            volume_id: VOLUME.to_string(),
            message: "denied".to_string(),
        }));
        assert_eq!(
            err.to_string(),
            "snapshot creation failed: snapshot service error: \
             create snapshot failed for volume vol-abcde123: denied"
        );
    }
}

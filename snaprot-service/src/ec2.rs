//! EC2-backed snapshot service.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ec2::config::{Credentials, Region};
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::Client;

use crate::service::{ServiceError, SnapshotRecord, SnapshotService};

/// Snapshot service backed by the EC2 API.
pub struct Ec2SnapshotService {
    client: Client,
}

impl Ec2SnapshotService {
    /// Build a service client from static credentials and a region name.
    pub async fn connect(access_key: &str, secret_key: &str, region: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "snaprot-config");
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
        }
    }

    /// Wrap an already-configured EC2 client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SnapshotService for Ec2SnapshotService {
    async fn create(
        &self,
        volume_id: &str,
        description: &str,
    ) -> Result<SnapshotRecord, ServiceError> {
        let output = self
            .client
            .create_snapshot()
            .volume_id(volume_id)
            .description(description)
            .send()
            .await
            .map_err(|e| ServiceError::CreateFailed {
                volume_id: volume_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        // The response echoes the request fields; trust the arguments and
        // take only the service-assigned id and start time from it.
        Ok(SnapshotRecord {
            id: output.snapshot_id().unwrap_or_default().to_string(),
            volume_id: volume_id.to_string(),
            description: description.to_string(),
            created_at: output.start_time().map(|t| t.secs()).unwrap_or_default(),
        })
    }

    async fn list(&self) -> Result<Vec<SnapshotRecord>, ServiceError> {
        let mut records = Vec::new();
        let mut pages = self
            .client
            .describe_snapshots()
            .owner_ids("self")
            .into_paginator()
            .items()
            .send();

        while let Some(item) = pages.next().await {
            let snapshot = item.map_err(|e| ServiceError::ListFailed {
                message: DisplayErrorContext(&e).to_string(),
            })?;
            records.push(SnapshotRecord {
                id: snapshot.snapshot_id().unwrap_or_default().to_string(),
                volume_id: snapshot.volume_id().unwrap_or_default().to_string(),
                description: snapshot.description().unwrap_or_default().to_string(),
                created_at: snapshot.start_time().map(|t| t.secs()).unwrap_or_default(),
            });
        }

        Ok(records)
    }

    async fn delete(&self, snapshot_id: &str) -> Result<(), ServiceError> {
        self.client
            .delete_snapshot()
            .snapshot_id(snapshot_id)
            .send()
            .await
            .map_err(|e| ServiceError::DeleteFailed {
                snapshot_id: snapshot_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}

//! Snapshot service contract, in-memory mock, and EC2 implementation.
//!
//! The rotation logic only ever talks to the remote side through the
//! [`SnapshotService`] trait: one create, one list, and per-snapshot deletes.
//! [`MockSnapshotService`] backs the test suites; [`Ec2SnapshotService`] backs
//! production runs.

pub mod ec2;
pub mod mock;
pub mod service;

pub use ec2::Ec2SnapshotService;
pub use mock::MockSnapshotService;
pub use service::{ServiceError, SnapshotRecord, SnapshotService};

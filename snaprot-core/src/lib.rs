//! Snapshot creation and retention rotation.
//!
//! One run composes two steps over a snapshot service: create one
//! marker-tagged snapshot of the configured volume, then delete the oldest
//! marker-matching snapshots beyond the retention count. Collaborators
//! (service client, clock, logger) are injected as trait-bounded parameters,
//! and both steps return their outcome as values rather than only logging it.

pub mod creator;
pub mod description;
pub mod rotator;

pub use creator::{create_snapshot, CreateError};
pub use description::{build_description, format_timestamp, TIMESTAMP_FORMAT};
pub use rotator::{plan_rotation, rotate, RotateError, RotationOutcome, RotationPlan};

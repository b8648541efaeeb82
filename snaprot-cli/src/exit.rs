//! Exit codes for the snaprot binary.

use snaprot_core::RotateError;

use crate::commands::CommandError;

/// Exit code constants.
pub mod codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Configuration problem: missing file, malformed YAML, missing or
    /// blank required field, unusable log file.
    pub const CONFIG_ERROR: i32 = 1;
    /// A remote service call failed.
    pub const SERVICE_ERROR: i32 = 2;
    /// No snapshot matched the volume and rotation marker.
    pub const NO_MATCHING_SNAPSHOTS: i32 = 3;
}

/// Map a command error to its exit code.
pub fn exit_code(error: &CommandError) -> i32 {
    match error {
        CommandError::Create(_) => codes::SERVICE_ERROR,
        CommandError::Rotate(RotateError::Service(_)) => codes::SERVICE_ERROR,
        CommandError::Rotate(RotateError::NoMatchingSnapshots { .. }) => {
            codes::NO_MATCHING_SNAPSHOTS
        }
    }
}

// ============================================================
// Tests
// ============================================================

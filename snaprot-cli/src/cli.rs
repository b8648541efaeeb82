//! Command-line interface definition for snaprot.

use std::path::PathBuf;

use clap::Parser;

/// Default configuration file path, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Create a tagged snapshot of a volume, then delete the oldest tagged
/// snapshots beyond the configured retention count.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "snaprot")]
#[command(version, about)]
pub struct Cli {
    /// YAML configuration file.
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Marker appended to the new snapshot's description in place of the
    /// configured rotate_tag. Old snapshots are still matched for deletion
    /// against the configured rotate_tag, so a snapshot created with an
    /// override is left alone by later runs.
    pub rotate_tag: Option<String>,
}

/// Parse CLI arguments from an iterator (for testing).
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}

// ============================================================
// Tests
// ============================================================
